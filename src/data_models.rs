use serde::{Deserialize, Serialize};

/// A single prior turn of the conversation, as supplied by the caller.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
}

/// A chat history entry. Callers occasionally send entries that do not match
/// the {sender, text} shape; those are kept as raw JSON and rendered
/// best-effort instead of being dropped.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ChatEntry {
    Message(ChatMessage),
    Other(serde_json::Value),
}

/// One raw hit from the search collaborator. Transient, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub link: String,
    pub title: String,
    pub snippet: Option<String>,
}

impl SearchResult {
    pub fn new(link: impl Into<String>, title: impl Into<String>) -> SearchResult {
        SearchResult {
            link: link.into(),
            title: title.into(),
            snippet: None,
        }
    }
}

/// A citation returned to the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SourceItem {
    pub title: String,
    pub url: String,
}

/// Text content fetched for one surviving URL. Transient.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub content: String,
}

/// The per-request output: a markdown-free answer plus its cited sources.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalysisResponse {
    pub answer: String,
    pub sources: Vec<SourceItem>,
}

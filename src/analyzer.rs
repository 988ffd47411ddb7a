use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, Utc};

use crate::cleaner::remove_markdown;
use crate::data_models::{AnalysisResponse, ChatEntry, Document, SearchResult, SourceItem};
use crate::enhancer::{enhance_query, fallback_query};
use crate::error::AnalyzeError;
use crate::history::format_chat_history;
use crate::ranker::filter_recent_sources;

const ARTICLE_SEPARATOR: &str = "\n\n--- Next Article ---\n\n";

/// Web search collaborator: text query in, ordered raw results out.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Page-fetch collaborator. Implementations skip URLs they cannot load
/// instead of failing the batch; an Err means the loader itself broke.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, urls: &[String]) -> Result<Vec<Document>>;
}

/// Template variables bound into the fixed analysis prompt.
pub struct AnalysisPrompt {
    pub chat_history: String,
    pub context: String,
    pub query: String,
}

/// LLM collaborator: renders the prompt and returns the generated text.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    async fn generate(&self, prompt: &AnalysisPrompt) -> Result<String>;
}

/// Sequences one request end to end: enhance, search, filter, fallback
/// search, fetch, prompt assembly, model call, markdown cleanup. Holds no
/// state across requests; the collaborator handles are read-only after
/// construction.
pub struct Analyzer {
    search: Box<dyn SearchProvider>,
    loader: Box<dyn PageLoader>,
    model: Box<dyn AnswerModel>,
}

impl Analyzer {
    pub fn new(
        search: Box<dyn SearchProvider>,
        loader: Box<dyn PageLoader>,
        model: Box<dyn AnswerModel>,
    ) -> Analyzer {
        Analyzer {
            search,
            loader,
            model,
        }
    }

    pub async fn analyze(
        &self,
        query: &str,
        chat_history: &[ChatEntry],
    ) -> Result<AnalysisResponse, AnalyzeError> {
        let now = Utc::now();
        let year = now.year();
        let month_name = now.format("%B").to_string();

        tracing::info!("original query: {query:?}, history length: {}", chat_history.len());

        let formatted_history = format_chat_history(chat_history);
        let enhanced_query = enhance_query(query, !chat_history.is_empty(), year);
        tracing::info!("enhanced search query: {enhanced_query:?}");

        let results = self
            .search
            .search(&enhanced_query)
            .await
            .map_err(|e| AnalyzeError::Search(format!("{e:#}")))?;
        tracing::info!("found {} initial results", results.len());

        let filtered = filter_recent_sources(&results, query, year, &month_name);
        tracing::info!("after filtering: {} recent relevant results", filtered.len());

        let (mut sources, mut urls) = collect_sources(&filtered);

        if urls.is_empty() {
            tracing::info!("no relevant recent sources found, trying alternative search");
            let alternative_query = fallback_query(query, year);
            let results = self
                .search
                .search(&alternative_query)
                .await
                .map_err(|_| AnalyzeError::NoSources)?;
            if results.is_empty() {
                return Err(AnalyzeError::NoSources);
            }

            // Fallback results go through the same filtering and link+title
            // validation as the primary path.
            let filtered = filter_recent_sources(&results, query, year, &month_name);
            (sources, urls) = collect_sources(&filtered);
            tracing::info!("alternative search found {} sources", urls.len());
        }

        if urls.is_empty() {
            return Err(AnalyzeError::NoUrls);
        }

        tracing::info!("using {} urls for analysis: {urls:?}", urls.len());
        let documents = self
            .loader
            .load(&urls)
            .await
            .map_err(|e| AnalyzeError::Fetch(format!("{e:#}")))?;
        if documents.is_empty() {
            return Err(AnalyzeError::EmptyContent);
        }

        let prompt = AnalysisPrompt {
            chat_history: formatted_history,
            context: combine_context(&documents),
            query: query.to_string(),
        };

        tracing::info!("sending {} documents to the model for analysis", documents.len());
        let raw_answer = self
            .model
            .generate(&prompt)
            .await
            .map_err(|e| AnalyzeError::Analysis(format!("{e:#}")))?;

        let answer = remove_markdown(&raw_answer);
        tracing::info!("analysis complete");

        Ok(AnalysisResponse { answer, sources })
    }
}

/// Builds the response citations and the fetch list from filtered results,
/// keeping only entries that carry both a link and a title.
fn collect_sources(filtered: &[SearchResult]) -> (Vec<SourceItem>, Vec<String>) {
    let mut sources = Vec::with_capacity(filtered.len());
    let mut urls = Vec::with_capacity(filtered.len());
    for result in filtered {
        if result.link.is_empty() || result.title.is_empty() {
            continue;
        }
        sources.push(SourceItem {
            title: result.title.clone(),
            url: result.link.clone(),
        });
        urls.push(result.link.clone());
    }
    (sources, urls)
}

fn combine_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| format!("Source: {}\n\n{}", doc.source, doc.content))
        .collect::<Vec<String>>()
        .join(ARTICLE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_context_separator() {
        let docs = vec![
            Document {
                source: "https://a".to_string(),
                content: "first".to_string(),
            },
            Document {
                source: "https://b".to_string(),
                content: "second".to_string(),
            },
        ];
        let context = combine_context(&docs);
        assert_eq!(
            context,
            "Source: https://a\n\nfirst\n\n--- Next Article ---\n\nSource: https://b\n\nsecond"
        );
    }

    #[test]
    fn test_collect_sources_requires_link_and_title() {
        let filtered = vec![
            SearchResult::new("https://a", "A"),
            SearchResult::new("", "B"),
            SearchResult::new("https://c", ""),
        ];
        let (sources, urls) = collect_sources(&filtered);
        assert_eq!(urls, vec!["https://a".to_string()]);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, "A");
    }
}

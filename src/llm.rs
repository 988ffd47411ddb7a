use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::analyzer::{AnalysisPrompt, AnswerModel};

const MODEL: &str = "gemini-2.5-flash";
const TEMPERATURE: f32 = 0.3;

const SYSTEM_INSTRUCTIONS: &str = "You are a world-class geopolitical and economic analyst. \
Your task is to provide a clear, concise, and unbiased synthesis based ONLY on the provided \
context from web search results. Do not use external knowledge. IMPORTANT: Consider the \
conversation history to maintain context and provide coherent, continuous analysis. Build upon \
previous discussions and refer back to earlier topics when relevant. Focus on providing the \
most current and up-to-date information available in the provided sources. If the sources \
contain recent data, prioritize that information. Provide your answer in plain text format \
without any markdown formatting.";

fn render_user_prompt(prompt: &AnalysisPrompt) -> String {
    format!(
        "Based on the following context and our conversation history, please answer my question.\n\n\
         --- Conversation History ---\n{}\n\n\
         --- Current Web Search Results ---\n{}\n\n\
         --- Current Question ---\n{}",
        prompt.chat_history, prompt.context, prompt.query
    )
}

#[derive(Serialize)]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

/// Gemini generateContent client.
pub struct GeminiModel {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiModel {
    pub fn new(api_key: String) -> Result<GeminiModel> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build llm http client")?;
        Ok(GeminiModel { client, api_key })
    }

    fn endpoint(&self) -> String {
        format!("https://generativelanguage.googleapis.com/v1beta/models/{MODEL}:generateContent")
    }
}

#[async_trait]
impl AnswerModel for GeminiModel {
    async fn generate(&self, prompt: &AnalysisPrompt) -> Result<String> {
        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTIONS.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: render_user_prompt(prompt),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("llm request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("llm responded with status {status}: {body}");
        }

        let body: GenerateResponse = response
            .json()
            .await
            .context("failed to decode llm response")?;

        let text = body
            .candidates
            .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<String>>()
                    .join("")
            })
            .filter(|t| !t.is_empty())
            .context("llm returned no candidates")?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_binds_all_variables() {
        let prompt = AnalysisPrompt {
            chat_history: "User: hi".to_string(),
            context: "Source: https://a\n\nbody".to_string(),
            query: "gold price?".to_string(),
        };
        let rendered = render_user_prompt(&prompt);
        assert!(rendered.contains("--- Conversation History ---\nUser: hi"));
        assert!(rendered.contains("--- Current Web Search Results ---\nSource: https://a"));
        assert!(rendered.contains("--- Current Question ---\ngold price?"));
    }
}

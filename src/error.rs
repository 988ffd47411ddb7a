use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while answering a single /analyze request.
/// Collaborator faults are converted into these variants at the orchestrator
/// boundary; nothing propagates to the caller as a raw error.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Service is not initialized. Check GOOGLE_API_KEY in the backend environment.")]
    NotConfigured,

    #[error("Search function failed: {0}")]
    Search(String),

    #[error(
        "Could not find recent information for this query. Please try rephrasing or check if this is a current topic."
    )]
    NoSources,

    #[error(
        "Web search found no recent relevant URLs for the query. Try rephrasing your question to be more specific about current information."
    )]
    NoUrls,

    #[error("Failed to load content from URLs: {0}")]
    Fetch(String),

    #[error("Web content loader failed to extract any text from the found URLs.")]
    EmptyContent,

    #[error("An error occurred during AI analysis: {0}")]
    Analysis(String),
}

impl AnalyzeError {
    /// Coarse HTTP status category for the failure.
    pub fn status(&self) -> StatusCode {
        match self {
            AnalyzeError::NoSources | AnalyzeError::NoUrls => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

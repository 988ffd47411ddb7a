use serde::{Deserialize, Serialize};

use crate::data_models::ChatEntry;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub chat_history: Vec<ChatEntry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

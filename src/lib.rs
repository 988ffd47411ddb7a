pub mod analyzer;
pub mod api;
pub mod cleaner;
pub mod config;
pub mod data_models;
pub mod enhancer;
pub mod error;
pub mod history;
pub mod llm;
pub mod loader;
pub mod ranker;
pub mod search;

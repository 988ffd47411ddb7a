use dotenvy::dotenv;
use std::env;

/// Process configuration, read once at startup and passed down explicitly.
/// A missing API key does not crash the process; it leaves the service up
/// with every analyze request failing fast as not configured.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Config {
        dotenv().ok(); // Load .env file if present
        Config {
            google_api_key: env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty()),
            bind_addr: get_env_or_default("BIND_ADDR", "0.0.0.0:8000"),
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

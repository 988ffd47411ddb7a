use once_cell::sync::Lazy;
use regex::Regex;

// Compiled once per process; the cleaner runs on every answer.
static HEADERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"#+\s+").unwrap());
static IMAGES: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[(.*?)\]\(.*?\)").unwrap());
static LINKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{1,2}(.*?)\*{1,2}").unwrap());
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{1,2}(.*?)_{1,2}").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`{1,3}(.*?)`{1,3}").unwrap());
static BLOCKQUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*>+\s+").unwrap());
static HORIZONTAL_RULES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-*_]{3,}\s*$").unwrap());

/// Strips markdown formatting from model output, keeping the visible text
/// inside the removed markers. Images go before links so the `![alt](url)`
/// form never leaves a stray `!` behind. Idempotent; empty input passes
/// through unchanged.
pub fn remove_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = HEADERS.replace_all(text, "");
    let text = IMAGES.replace_all(&text, "$1");
    let text = LINKS.replace_all(&text, "$1");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = UNDERSCORES.replace_all(&text, "$1");
    let text = CODE.replace_all(&text, "$1");
    let text = BLOCKQUOTES.replace_all(&text, "");
    let text = HORIZONTAL_RULES.replace_all(&text, "");

    text.trim().to_string()
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{Html, Selector};
use std::time::Duration;

use crate::analyzer::SearchProvider;
use crate::data_models::SearchResult;

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const MAX_RESULTS: usize = 12;
const USER_AGENT: &str = "Mozilla/5.0 (compatible; geolens/0.1)";

// Selector::parse only fails on malformed selector syntax, which these are not.
static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".result").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.result__a").unwrap());
static SNIPPET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result__snippet").unwrap());

/// Web search over the DuckDuckGo HTML endpoint.
pub struct DdgSearch {
    client: reqwest::Client,
}

impl DdgSearch {
    pub fn new() -> Result<DdgSearch> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(15))
            .build()
            .context("failed to build search http client")?;
        Ok(DdgSearch { client })
    }

    fn parse_results(html: &str) -> Vec<SearchResult> {
        let document = Html::parse_document(html);
        let mut results = Vec::new();

        for element in document.select(&RESULT_SELECTOR) {
            let Some(anchor) = element.select(&TITLE_SELECTOR).next() else {
                continue;
            };
            let title = anchor.text().collect::<String>().trim().to_string();
            let href = anchor.value().attr("href").unwrap_or("");
            let Some(link) = normalize_link(href) else {
                continue;
            };
            if title.is_empty() || results.iter().any(|r: &SearchResult| r.link == link) {
                continue;
            }

            let snippet = element
                .select(&SNIPPET_SELECTOR)
                .next()
                .map(|s| s.text().collect::<String>().trim().to_string())
                .filter(|s| !s.is_empty());

            results.push(SearchResult {
                link,
                title,
                snippet,
            });
            if results.len() >= MAX_RESULTS {
                break;
            }
        }

        results
    }
}

/// DuckDuckGo hands back protocol-relative redirect links of the form
/// `//duckduckgo.com/l/?uddg=<encoded target>`; unwrap them to the real URL.
fn normalize_link(href: &str) -> Option<String> {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        href.to_string()
    };

    let url = Url::parse(&absolute).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    if url.host_str() == Some("duckduckgo.com") {
        for (key, value) in url.query_pairs() {
            if key == "uddg" {
                return Some(value.into_owned());
            }
        }
    }

    Some(url.to_string())
}

#[async_trait]
impl SearchProvider for DdgSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{SEARCH_ENDPOINT}?q={}", urlencoding::encode(query));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("search request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("search endpoint responded with status {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("failed to read search response body")?;

        Ok(Self::parse_results(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results_extracts_link_title_snippet() {
        let html = r#"<html><body>
            <div class="result">
              <a class="result__a" href="https://www.reuters.com/markets/gold">Gold prices today</a>
              <div class="result__snippet">Gold rose to a record.</div>
            </div>
            <div class="result">
              <a class="result__a" href="https://www.bbc.com/news/x">Markets latest</a>
            </div>
        </body></html>"#;
        let results = DdgSearch::parse_results(html);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].link, "https://www.reuters.com/markets/gold");
        assert_eq!(results[0].title, "Gold prices today");
        assert_eq!(results[0].snippet.as_deref(), Some("Gold rose to a record."));
        assert_eq!(results[1].snippet, None);
    }

    #[test]
    fn test_parse_results_skips_untitled_and_duplicate() {
        let html = r#"<html><body>
            <div class="result">
              <a class="result__a" href="https://a.example.com/">  </a>
            </div>
            <div class="result">
              <a class="result__a" href="https://b.example.com/">B</a>
            </div>
            <div class="result">
              <a class="result__a" href="https://b.example.com/">B again</a>
            </div>
        </body></html>"#;
        let results = DdgSearch::parse_results(html);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "B");
    }

    #[test]
    fn test_normalize_link_unwraps_redirect() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.reuters.com%2Fmarkets%2Fgold&rut=abc";
        assert_eq!(
            normalize_link(href).as_deref(),
            Some("https://www.reuters.com/markets/gold")
        );
    }

    #[test]
    fn test_normalize_link_rejects_non_http() {
        assert_eq!(normalize_link("javascript:void(0)"), None);
        assert_eq!(normalize_link("not a url"), None);
    }
}

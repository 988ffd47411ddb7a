use crate::data_models::SearchResult;

/// Reputable news, finance and policy outlets. A URL containing any of these
/// substrings earns the trust bonus.
const TRUSTED_DOMAINS: &[&str] = &[
    "reuters.com",
    "bloomberg.com",
    "ft.com",
    "wsj.com",
    "economist.com",
    "foreignpolicy.com",
    "foreignaffairs.com",
    "carnegieendowment.org",
    "brookings.edu",
    "csis.org",
    "cfr.org",
    "rand.org",
    "stratfor.com",
    "aljazeera.com",
    "bbc.com",
    "cnn.com",
    "theguardian.com",
    "apnews.com",
    "politico.com",
    "axios.com",
    "defenseone.com",
    "nationalinterest.org",
    "warontherocks.com",
    "lawfareblog.com",
    "cnbc.com",
    "marketwatch.com",
    "investing.com",
    "kitco.com",
    "scmp.com",
    "in.investing.com",
    "moneycontrol.com",
    "globaltimes.cn",
];

/// Generic platforms that never carry the analysis we want.
const BLOCKED_DOMAINS: &[&str] = &[
    "wikipedia.org",
    "whatsapp.com",
    "facebook.com",
    "twitter.com",
    "youtube.com",
    "instagram.com",
    "tiktok.com",
    "google.com",
    "apps.microsoft.com",
    "play.google.com",
    "reddit.com",
    "quora.com",
    "pinterest.com",
];

const RECENCY_KEYWORDS: &[&str] = &[
    "today",
    "latest",
    "current",
    "recent",
    "update",
    "just",
    "new",
    "this week",
    "this month",
    "breaking",
    "live",
];

const MAX_SOURCES: usize = 6;
const MIN_SCORE: u32 = 2;

/// Composite relevance score for a single result. Pure function of the result,
/// the original query and the current date, so it can be unit tested against
/// fixtures without any I/O.
pub fn score_result(result: &SearchResult, query: &str, year: i32, month_name: &str) -> u32 {
    let url = result.link.to_lowercase();
    let title = result.title.to_lowercase();

    let is_trusted = TRUSTED_DOMAINS.iter().any(|d| url.contains(d));
    let appears_recent = RECENCY_KEYWORDS.iter().any(|k| title.contains(k))
        || title.contains(&year.to_string())
        || title.contains(&month_name.to_lowercase());
    let has_query_terms = query
        .to_lowercase()
        .split_whitespace()
        .filter(|t| t.len() > 3)
        .any(|t| title.contains(t));

    let mut score = 0;
    if is_trusted {
        score += 3;
    }
    if appears_recent {
        score += 2;
    }
    if has_query_terms {
        score += 1;
    }
    score
}

/// Filters and ranks raw search results: drops entries missing a link or
/// title, drops blocklisted platforms, scores the survivors, keeps those at
/// or above the threshold and returns the top six by descending score (stable,
/// so ties keep their input order).
///
/// Precision-biased: an empty return is a legal outcome and is handled by the
/// caller's fallback search, never by lowering the threshold here.
pub fn filter_recent_sources(
    results: &[SearchResult],
    original_query: &str,
    year: i32,
    month_name: &str,
) -> Vec<SearchResult> {
    let mut scored: Vec<(SearchResult, u32)> = results
        .iter()
        .filter(|r| !r.link.is_empty() && !r.title.is_empty())
        .filter(|r| {
            let url = r.link.to_lowercase();
            !BLOCKED_DOMAINS.iter().any(|d| url.contains(d))
        })
        .map(|r| (r.clone(), score_result(r, original_query, year, month_name)))
        .filter(|(_, score)| *score >= MIN_SCORE)
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(MAX_SOURCES)
        .map(|(r, _)| r)
        .collect()
}

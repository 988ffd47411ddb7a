/// One row of the category table: if any keyword appears in the lower-cased
/// query, the matching qualifier is appended and no later row is consulted.
struct Category {
    keywords: &'static [&'static str],
    fresh: &'static str,
    follow_up: &'static str,
}

const ECONOMIC: Category = Category {
    keywords: &[
        "price", "gold", "silver", "oil", "stock", "market", "currency", "dollar", "euro",
        "inflation",
    ],
    fresh: "latest today current market news financial update",
    follow_up: "latest update current market news",
};

const POLITICAL: Category = Category {
    keywords: &[
        "election",
        "government",
        "president",
        "prime minister",
        "war",
        "conflict",
        "treaty",
        "sanctions",
    ],
    fresh: "latest update current affairs geopolitical analysis",
    follow_up: "latest developments update",
};

const GENERAL: Category = Category {
    keywords: &[],
    fresh: "latest news update today current",
    follow_up: "latest update",
};

// Economic is checked before political on purpose: a query mentioning both
// ("oil sanctions") takes the financial qualifier.
const CATEGORIES: [Category; 3] = [ECONOMIC, POLITICAL, GENERAL];

/// Appends recency qualifiers to the raw query, biased by a keyword category
/// match. `is_follow_up` is whether any chat history exists; `year` is the
/// current calendar year (a parameter so the function stays clock-free).
pub fn enhance_query(query: &str, is_follow_up: bool, year: i32) -> String {
    let lowered = query.to_lowercase();
    let category = CATEGORIES
        .iter()
        .find(|c| c.keywords.is_empty() || c.keywords.iter().any(|k| lowered.contains(k)))
        .unwrap_or(&GENERAL);

    let qualifier = if is_follow_up {
        category.follow_up
    } else {
        category.fresh
    };
    format!("{query} {year} {qualifier}")
}

/// The step-5 fallback query, built directly without the category table.
pub fn fallback_query(query: &str, year: i32) -> String {
    format!("{query} {year} latest news today")
}

use crate::responses::{Response, ResponseTable};

/// Trim, lowercase and collapse runs of whitespace to a single space.
pub fn normalize(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Pick the response for a free-text query.
///
/// Exact entries are tried first, then keyword rules in declaration order; the
/// first rule with any keyword contained in the query wins. Falls back to
/// `table.fallback`, so there is always an answer.
pub fn match_query<'a>(table: &'a ResponseTable, query: &str) -> &'a Response {
    let q = normalize(query);

    if let Some(entry) = table.exact.iter().find(|e| normalize(&e.query) == q) {
        return &entry.response;
    }

    if !q.is_empty() {
        for rule in &table.rules {
            let hit = rule
                .keywords
                .iter()
                .map(|k| normalize(k))
                .any(|k| !k.is_empty() && q.contains(&k));
            if hit {
                return &rule.response;
            }
        }
    }

    &table.fallback
}

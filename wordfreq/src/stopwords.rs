use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Words excluded from every tally
pub const STOPWORDS: [&str; 12] = [
    "the", "a", "an", "is", "to", "and", "or", "in", "at", "of", "for", "that",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.into_iter().collect());

/// Checks membership in the stopword set. Expects a lowercase token.
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// A token is counted only if it is non-empty and not a stopword
pub fn is_countable(token: &str) -> bool {
    !token.is_empty() && !is_stopword(token)
}

use once_cell::sync::Lazy;
use regex::Regex;

/// Any run of characters that cannot be part of a word.
static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}'\-]+").expect("separator pattern is valid"));

/// Case-folds a raw line. Must run before [`tokens`] so separators see folded text.
pub fn normalize(line: &str) -> String {
    line.to_lowercase()
}

/// Splits an already normalized line into tokens.
///
/// Separators at either end of the line, or back to back, produce empty tokens. Those are
/// left in the stream; [`crate::stopwords::is_countable`] drops them.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> + '_ {
    SEPARATOR.split(normalized)
}

/// Normalizes and splits a line in one step, returning owned tokens
pub fn tokenize(line: &str) -> Vec<String> {
    let normalized = normalize(line);
    tokens(&normalized).map(str::to_owned).collect()
}

//! Text tokenization
//!
//! Turns free text into the lowercase word tokens the index counts. A token
//! is a maximal run of letters, digits, or underscore; every other character
//! acts as a separator, so `sign-in` splits into `sign` and `in`, and
//! `page.` becomes `page`.

use once_cell::sync::Lazy;
use regex::Regex;

// Unicode-aware: \W matches anything outside [letter, digit, underscore]
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("valid regex"));

/// Tokenizes text into an ordered sequence of lowercase word tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let folded = text.to_lowercase();
    let separated = NON_WORD.replace_all(&folded, " ");
    separated
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Returns the first token of `term`, or None when it contains no word
/// characters at all
///
/// Count queries reduce a multi-word or punctuated term to its first token
/// before lookup. Querying `"sign-in"` therefore counts occurrences of the
/// token `sign` alone; callers depending on that behavior exist, so it is
/// kept as is.
pub fn first_token(term: &str) -> Option<String> {
    tokenize(term).into_iter().next()
}

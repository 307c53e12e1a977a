//! Word tokenizer.
//!
//! Turns raw document text into the normalized tokens that the corpus index
//! counts. Query keywords go through [`normalize`] so that they compare equal
//! to indexed tokens.
//!
//! # Rules
//!
//! 1. Split on runs of whitespace.
//! 2. Lower-case each fragment.
//! 3. Remove every character in [`PUNCTUATION`], wherever it appears.
//! 4. Drop the fragment if fewer than [`MIN_TOKEN_CHARS`] characters remain.
//!
//! # Example
//!
//! ```rust
//! use corpus_core::tokenize::tokenize;
//!
//! let tokens: Vec<String> = tokenize("The cat sat. \"Yes!\" 42 ...").collect();
//! assert_eq!(tokens, vec!["the", "cat", "sat", "yes"]);
//! ```

/// Characters stripped from every fragment.
pub const PUNCTUATION: [char; 10] = ['.', ',', '!', '?', ';', ':', '"', '\'', '(', ')'];

/// Shortest token kept, in characters.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Lower-case `word` and strip [`PUNCTUATION`] from it.
///
/// Surrounding whitespace is not touched; callers trim first.
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect()
}

/// Normalize a single whitespace-free fragment, returning `None` if it is
/// too short to be a token.
pub fn token_of(fragment: &str) -> Option<String> {
    let normalized = normalize(fragment);
    if normalized.chars().count() < MIN_TOKEN_CHARS {
        None
    } else {
        Some(normalized)
    }
}

/// Lazily tokenize `text` in left-to-right order.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(token_of)
}

/// Like [`tokenize`], but pairs each token with the index of the
/// whitespace-separated word it came from.
///
/// The offset counts every word, including the ones dropped as too short,
/// so it can be used to locate the word in the original text.
pub fn tokenize_with_offsets(text: &str) -> impl Iterator<Item = (usize, String)> + '_ {
    text.split_whitespace()
        .enumerate()
        .filter_map(|(offset, fragment)| token_of(fragment).map(|token| (offset, token)))
}

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

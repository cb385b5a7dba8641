//! Query tokenizer.
//!
//! Lower-cases the raw query and splits it on a fixed delimiter set.
//! Everything outside that set is a word character, so non-ASCII
//! letters, digits, `_`, `@`, `~` and friends stay inside terms.

/// Characters that separate terms.
pub const DELIMITERS: &[char] = &[
    '\t', '\n', '\r', ' ', '"', '\'', '!', '?', '#', '$', '%', '&', '|', '(', ')', '{', '}', '[',
    ']', '*', '/', '+', '-', ':', ';', '<', '>', '=', '.', ',',
];

/// Check whether `c` separates terms
pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Split a raw query into normalized terms.
///
/// Terms come back in input order with duplicates kept. The result is
/// empty when the query holds nothing but delimiters.
///
/// ```
/// use kwsearch::core::search::tokenize;
///
/// assert_eq!(tokenize("Cats & DOGS!"), vec!["cats", "dogs"]);
/// assert!(tokenize("?!  ...").is_empty());
/// ```
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(is_delimiter)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

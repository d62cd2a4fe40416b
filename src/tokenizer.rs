//! Raw input tokenization

/// Split one input line into whitespace-delimited tokens.
///
/// Tokens keep their original case and are never empty; a blank or
/// whitespace-only line yields an empty sequence.
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

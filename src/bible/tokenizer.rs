//! Input tokenizer.
//!
//! Splits on whitespace after separating glued letter/digit runs, so "Jn3"
//! and "2Jn1" become separate book and locus tokens.

use std::sync::LazyLock;

use regex::Regex;

/// A letter directly followed by a digit, or a digit directly followed by a letter.
#[allow(clippy::expect_used)]
static RE_GLUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{L}[0-9]|[0-9]\p{L}").expect("valid regex: RE_GLUE")
});

/// Whether the letter at `at` is a verse subscript ending its word ("16b").
fn is_trailing_subscript(input: &str, at: usize) -> bool {
    let mut rest = input[at..].chars();
    let subscript = rest.next().is_some_and(|c| matches!(c, 'a' | 'b' | 'c' | 'A' | 'B' | 'C'));
    subscript && rest.next().is_none_or(|c| !c.is_alphabetic())
}

/// Insert a space at every letter/digit boundary.
///
/// Boundary matches overlap ("a1b" has two), so the scan resumes at each
/// boundary rather than after the match, and `shift` tracks how far the
/// output has moved from the input.
fn split_glued(input: &str) -> String {
    let mut out = input.to_string();
    let mut shift = 0;
    let mut at = 0;

    while let Some(m) = RE_GLUE.find_at(input, at) {
        let first_len = input[m.start()..].chars().next().map_or(1, char::len_utf8);
        let boundary = m.start() + first_len;
        let digit_first = input[m.start()..].starts_with(|c: char| c.is_ascii_digit());

        if !(digit_first && is_trailing_subscript(input, boundary)) {
            out.insert(boundary + shift, ' ');
            shift += 1;
        }
        at = boundary;
    }

    out
}

/// Split input into at most `max_tokens` word and number tokens.
pub fn tokenize(input: &str, max_tokens: usize) -> Vec<String> {
    split_glued(input)
        .split_whitespace()
        .take(max_tokens)
        .map(str::to_string)
        .collect()
}

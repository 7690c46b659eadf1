//! Text folding shared by book matching, version lookup and verse search.
//!
//! Folding is: trim, lowercase each char, decompose (NFD) and drop combining
//! marks, so "Génesis" and "GENESIS" compare equal. Final sigma folds to
//! plain sigma, so "ΛΟΓΟΣ" and "λόγος" compare equal too.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Remove diacritics by decomposing and dropping combining marks.
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Trim, lowercase and strip diacritics.
///
/// Same per-char folding as [`fold_with_offsets`], so a folded query is
/// always found in the folded text it was copied from.
pub fn fold(s: &str) -> String {
    fold_with_offsets(s.trim()).text
}

/// Lowercase one char, without context-dependent forms.
fn lower_chars(ch: char) -> impl Iterator<Item = char> {
    ch.to_lowercase().map(|c| if c == 'ς' { 'σ' } else { c })
}

/// Folded text along with a map back onto the source string.
///
/// `offsets[i]` is the byte offset in the source of the char that produced
/// the `i`-th folded char. One sentinel entry equal to the source length is
/// appended so that `offsets[end]` is always valid for an exclusive end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedText {
    /// The folded text (not trimmed, so offsets stay aligned).
    pub text: String,
    /// Source byte offset per folded char, plus the sentinel.
    pub offsets: Vec<usize>,
}

impl FoldedText {
    /// Number of chars in the folded text.
    pub fn char_len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Map a folded char range onto a source byte range.
    pub fn source_range(&self, start_char: usize, char_len: usize) -> Option<(usize, usize)> {
        let start = *self.offsets.get(start_char)?;
        if char_len == 0 {
            return Some((start, 0));
        }
        let last = start_char.checked_add(char_len)?;
        let last_source = *self.offsets.get(last - 1)?;
        // A source char can fold to several chars; the range always ends on
        // the next source char boundary.
        let end = self.offsets.get(last..)?.iter().copied().find(|&o| o > last_source)?;
        Some((start, end - start))
    }
}

/// Fold `source` one char at a time, recording where each folded char came from.
///
/// Lowercasing and decomposition are applied per source char, so the result
/// equals [`fold`] of the text for everything except leading and trailing
/// whitespace.
pub fn fold_with_offsets(source: &str) -> FoldedText {
    let mut text = String::with_capacity(source.len());
    let mut offsets = Vec::with_capacity(source.len() + 1);

    for (byte, ch) in source.char_indices() {
        for lower in lower_chars(ch) {
            for c in std::iter::once(lower).nfd().filter(|c| !is_combining_mark(*c)) {
                text.push(c);
                offsets.push(byte);
            }
        }
    }
    offsets.push(source.len());

    FoldedText { text, offsets }
}

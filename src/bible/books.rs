//! Book-name resolution against the names of the targeted text.
//!
//! Names differ per translation and language, so there is no fixed list:
//! every call receives the ordered names of the text being navigated.

use rayon::prelude::*;

use crate::types::{BookIndex, BookMatch};
use crate::utils::normalize::fold;
use crate::utils::similarity::similarity;

/// Floor of the abbreviation score; a two-letter prefix of a long name
/// still beats most edit-distance matches.
const ABBREVIATION_FLOOR: f64 = 0.5;

/// Span above the floor; the full-length prefix tops out just below 1.0.
const ABBREVIATION_SPAN: f64 = 0.49;

/// Score `needle` as an abbreviation of `name`, ignoring spaces.
///
/// "2cor" against "2 corinthians" scores by how much of the name it covers.
/// Always below 1.0 so only exact equality reaches 1.0.
fn abbreviation_score(needle: &str, name: &str) -> f64 {
    let needle: String = needle.chars().filter(|c| !c.is_whitespace()).collect();
    let name: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    let needle_len = needle.chars().count();
    if needle_len < 2 || !name.starts_with(&needle) {
        return 0.0;
    }
    // Book names are short.
    #[allow(clippy::cast_precision_loss)]
    let coverage = needle_len as f64 / name.chars().count() as f64;
    ABBREVIATION_FLOOR + ABBREVIATION_SPAN * coverage
}

/// Find the book name closest to `token`.
///
/// An exact match (ignoring case and accents) wins immediately with
/// similarity 1.0. Otherwise each name scores the better of its edit-distance
/// similarity and its abbreviation score; the highest wins and ties keep the
/// earliest book. Returns `None` only when `names` is empty.
pub fn resolve_book<S: AsRef<str>>(token: &str, names: &[S]) -> Option<BookMatch> {
    let needle = fold(token);
    let folded: Vec<String> = names.iter().map(|n| fold(n.as_ref())).collect();

    if let Some(idx) = folded.iter().position(|n| *n == needle) {
        return Some(make_match(idx, names, 1.0));
    }

    // Score in parallel; the collect keeps book order for the tie-break.
    let scores: Vec<f64> = folded
        .par_iter()
        .map(|n| similarity(&needle, n).max(abbreviation_score(&needle, n)))
        .collect();

    let mut best: Option<(usize, f64)> = None;
    for (idx, score) in scores.into_iter().enumerate() {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((idx, score));
        }
    }

    let (idx, score) = best?;
    tracing::debug!("Book token {token:?} closest to {:?} ({score:.3})", names[idx].as_ref());
    Some(make_match(idx, names, score))
}

fn make_match<S: AsRef<str>>(idx: usize, names: &[S], similarity: f64) -> BookMatch {
    BookMatch {
        book: BookIndex(idx),
        name: names[idx].as_ref().to_string(),
        similarity,
    }
}

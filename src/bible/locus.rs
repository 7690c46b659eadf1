//! Chapter/verse locus parsing ("3", "3:16", "3.16-18", "3:32-34b").

use crate::constants::resolver::{CHAPTER_SEPARATORS, RANGE_SEPARATORS};
use crate::error::{Error, Result};
use crate::types::{ChapterVerseSpan, Subscript};

/// Whether `text` is made only of digits and locus punctuation.
///
/// Tokens that fail this are book-name candidates.
pub fn looks_like_chapter_verse(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(|c| {
            c.is_ascii_digit()
                || CHAPTER_SEPARATORS.contains(&c)
                || RANGE_SEPARATORS.contains(&c)
                || Subscript::from_char(c).is_some()
        })
}

/// Parse a run of ASCII digits, saturating instead of overflowing.
///
/// Saturation lets an absurd chapter like "99999999999" clamp to the last
/// chapter later on rather than fail here.
fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// Parse one verse part, splitting off a trailing subscript letter.
fn parse_verse_part(token: &str, part: &str) -> Result<(u32, Subscript)> {
    let (digits, subscript) = match part.chars().last().and_then(Subscript::from_char) {
        Some(s) => (&part[..part.len() - 1], s),
        None => (part, Subscript::None),
    };
    let verse = parse_number(digits)
        .ok_or_else(|| Error::invalid_format(token, "verse is not a number"))?;
    if verse == 0 {
        return Err(Error::out_of_range("verse", verse, "verses start at 1"));
    }
    Ok((verse, subscript))
}

/// Parse a single locus token into a span.
///
/// A token names at most one chapter: "2:1:5" is rejected. A verse range may
/// use `-` or `+`; with three or more parts only the first and last count.
pub fn parse(token: &str) -> Result<ChapterVerseSpan> {
    let segments: Vec<&str> = token.split(CHAPTER_SEPARATORS).collect();
    if segments.len() > 2 {
        return Err(Error::invalid_format(token, "more than one chapter separator"));
    }

    let chapter = segments.first().and_then(|s| parse_number(s)).unwrap_or(0);

    let Some(verses) = segments.get(1).filter(|s| !s.is_empty()) else {
        return ChapterVerseSpan::new(chapter, 0, 0, Subscript::None);
    };

    let parts: Vec<&str> = verses.split(RANGE_SEPARATORS).collect();
    let first = parts.first().copied().unwrap_or_default();
    let (verse, mut subscript) = parse_verse_part(token, first)?;

    let mut end_verse = 0;
    if parts.len() > 1 {
        let last = parts.last().copied().unwrap_or_default();
        if !last.is_empty() {
            let (end, end_subscript) = parse_verse_part(token, last)?;
            end_verse = end;
            if end_subscript.is_set() {
                subscript = end_subscript;
            }
        }
    }

    ChapterVerseSpan::new(chapter, verse, end_verse, subscript)
}

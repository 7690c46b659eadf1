//! Core data model: references, loci, book matches and search hits.
//!
//! `Reference` and `ChapterVerseSpan` validate their invariants on
//! construction and expose no setters; a changed locus is a new value.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// Index of a book in a text's ordered book-name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct BookIndex(pub usize);

impl BookIndex {
    /// Get the inner index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for BookIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for BookIndex {
    fn from(i: usize) -> Self {
        Self(i)
    }
}

/// Sub-part of a verse ("16a", "16b").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscript {
    /// No subscript.
    #[default]
    None,
    /// First part of the verse.
    A,
    /// Second part of the verse.
    B,
    /// Third part of the verse.
    C,
}

impl Subscript {
    /// Parse a subscript letter (case-insensitive).
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a' | 'A' => Some(Self::A),
            'b' | 'B' => Some(Self::B),
            'c' | 'C' => Some(Self::C),
            _ => None,
        }
    }

    /// Letter form, empty for [`Subscript::None`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        }
    }

    /// Whether a subscript is present.
    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check the shared locus invariants.
fn validate_locus(chapter: u32, verse: u32, end_verse: u32, subscript: Subscript) -> Result<()> {
    if verse > 0 && chapter == 0 {
        return Err(Error::out_of_range("chapter", chapter, "a verse requires a chapter"));
    }
    if end_verse > 0 && verse == 0 {
        return Err(Error::out_of_range("end verse", end_verse, "an end verse requires a verse"));
    }
    if subscript.is_set() && verse == 0 {
        return Err(Error::out_of_range("verse", verse, "a subscript requires a verse"));
    }
    if end_verse > 0 && end_verse < verse {
        return Err(Error::out_of_range("end verse", end_verse, "end precedes start"));
    }
    Ok(())
}

/// Render `chapter[:verse[-end]][subscript]`, the form the locus parser reads.
fn write_locus(
    f: &mut impl fmt::Write,
    chapter: u32,
    verse: u32,
    end_verse: u32,
    subscript: Subscript,
) -> fmt::Result {
    if chapter == 0 {
        return Ok(());
    }
    write!(f, "{chapter}")?;
    if verse > 0 {
        write!(f, ":{verse}")?;
        if end_verse > 0 {
            write!(f, "-{end_verse}")?;
        }
        write!(f, "{subscript}")?;
    }
    Ok(())
}

/// One parsed chapter/verse group, before it is bound to a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ChapterVerseSpan {
    chapter: u32,
    verse: u32,
    end_verse: u32,
    subscript: Subscript,
}

impl ChapterVerseSpan {
    /// Build a span, enforcing the locus invariants.
    pub fn new(chapter: u32, verse: u32, end_verse: u32, subscript: Subscript) -> Result<Self> {
        validate_locus(chapter, verse, end_verse, subscript)?;
        Ok(Self { chapter, verse, end_verse, subscript })
    }

    /// Chapter, 0 when unset.
    pub const fn chapter(&self) -> u32 {
        self.chapter
    }

    /// Verse, 0 for the whole chapter.
    pub const fn verse(&self) -> u32 {
        self.verse
    }

    /// End verse, 0 when unset.
    pub const fn end_verse(&self) -> u32 {
        self.end_verse
    }

    /// Verse subscript.
    pub const fn subscript(&self) -> Subscript {
        self.subscript
    }

    /// Whether the span names a whole chapter.
    pub const fn is_whole_chapter(&self) -> bool {
        self.chapter > 0 && self.verse == 0
    }

    /// Lexicographic ordering on (chapter, verse).
    pub fn locus_cmp(&self, other: &Self) -> Ordering {
        (self.chapter, self.verse).cmp(&(other.chapter, other.verse))
    }
}

impl fmt::Display for ChapterVerseSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_locus(f, self.chapter, self.verse, self.end_verse, self.subscript)
    }
}

/// A validated passage locus in one text.
///
/// Derived ordering is canonical order: book index, then chapter, then verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Reference {
    book: BookIndex,
    chapter: u32,
    verse: u32,
    end_verse: u32,
    subscript: Subscript,
}

impl Reference {
    /// Build a reference, enforcing the locus invariants.
    pub fn new(
        book: BookIndex,
        chapter: u32,
        verse: u32,
        end_verse: u32,
        subscript: Subscript,
    ) -> Result<Self> {
        validate_locus(chapter, verse, end_verse, subscript)?;
        Ok(Self { book, chapter, verse, end_verse, subscript })
    }

    /// A reference to a whole book.
    pub const fn book_only(book: BookIndex) -> Self {
        Self { book, chapter: 0, verse: 0, end_verse: 0, subscript: Subscript::None }
    }

    /// A reference to a single verse.
    pub fn verse_at(book: BookIndex, chapter: u32, verse: u32) -> Result<Self> {
        Self::new(book, chapter, verse, 0, Subscript::None)
    }

    /// Book index.
    pub const fn book(&self) -> BookIndex {
        self.book
    }

    /// Chapter, 0 when unset.
    pub const fn chapter(&self) -> u32 {
        self.chapter
    }

    /// Verse, 0 when unset.
    pub const fn verse(&self) -> u32 {
        self.verse
    }

    /// End verse, 0 when unset.
    pub const fn end_verse(&self) -> u32 {
        self.end_verse
    }

    /// Verse subscript.
    pub const fn subscript(&self) -> Subscript {
        self.subscript
    }

    /// The locus part as a span.
    pub const fn span(&self) -> ChapterVerseSpan {
        ChapterVerseSpan {
            chapter: self.chapter,
            verse: self.verse,
            end_verse: self.end_verse,
            subscript: self.subscript,
        }
    }

    /// Locus string (e.g., "3:16-18a"), empty for a whole book.
    pub fn locus(&self) -> String {
        self.span().to_string()
    }

    /// Format for display using the text's book names (e.g., "John 3:16-18").
    pub fn display(&self, book_names: &[String]) -> String {
        let book = book_names
            .get(self.book.get())
            .map_or_else(|| format!("#{}", self.book), Clone::clone);
        let locus = self.locus();
        if locus.is_empty() {
            book
        } else {
            format!("{book} {locus}")
        }
    }
}

/// Best book-name match for a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookMatch {
    /// Index of the matched book.
    pub book: BookIndex,
    /// The matched name as the text spells it.
    pub name: String,
    /// Similarity in `[0, 1]`; 1.0 only for an exact folded match.
    pub similarity: f64,
}

impl BookMatch {
    /// Whether the token matched the name exactly (ignoring case and accents).
    pub fn is_exact(&self) -> bool {
        self.similarity >= 1.0
    }
}

/// Byte range of a highlighted match within a verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MatchSpan {
    /// Byte offset into the source verse text.
    pub start: usize,
    /// Byte length of the match.
    pub len: usize,
}

/// One verse matched by a search.
///
/// Derived ordering starts with the reference, so hits sort in canonical
/// order regardless of how the books are named.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SearchHit {
    /// Where the verse is.
    pub reference: Reference,
    /// Highlighted range within `verse_text`.
    pub span: MatchSpan,
    /// The verse text as the corpus supplied it.
    pub verse_text: String,
    /// The literal matched substring of `verse_text`.
    pub highlight: String,
}

impl SearchHit {
    /// Verse text split around the highlight.
    pub fn parts(&self) -> (&str, &str, &str) {
        let end = self.span.start + self.span.len;
        match (
            self.verse_text.get(..self.span.start),
            self.verse_text.get(self.span.start..end),
            self.verse_text.get(end..),
        ) {
            (Some(before), Some(matched), Some(after)) => (before, matched, after),
            _ => (self.verse_text.as_str(), "", ""),
        }
    }
}

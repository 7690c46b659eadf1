//! Scripture text access.
//!
//! [`Corpus`] is the only view of a loaded text the rest of the crate needs:
//! ordered book names, chapter and verse counts, and raw verse text.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BookIndex, Reference};

/// Superscript digit mapping
const SUPERSCRIPT_DIGITS: &[char] = &['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Read access to one loaded text.
///
/// Book indices are positions in [`Corpus::book_names`]; chapters and verses
/// are 1-based. Counts for unknown books or chapters are 0.
pub trait Corpus {
    /// Version abbreviation of this text (e.g., "KJV").
    fn abbreviation(&self) -> &str;

    /// Ordered, index-stable book names as this text spells them.
    fn book_names(&self) -> &[String];

    /// Number of chapters in a book.
    fn chapter_count(&self, book: BookIndex) -> u32;

    /// Number of verses in a chapter.
    fn verse_count(&self, book: BookIndex, chapter: u32) -> u32;

    /// Raw text of one verse.
    fn verse_text(&self, book: BookIndex, chapter: u32, verse: u32) -> Option<&str>;

    /// Total number of verses in the text.
    fn total_verses(&self) -> usize {
        (0..self.book_names().len())
            .map(BookIndex)
            .map(|book| {
                (1..=self.chapter_count(book))
                    .map(|chapter| self.verse_count(book, chapter) as usize)
                    .sum::<usize>()
            })
            .sum()
    }
}

/// One book of an [`InMemoryCorpus`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookText {
    /// Book name as this text spells it.
    pub name: String,
    /// Chapters in order, each a list of verses in order.
    pub chapters: Vec<Vec<String>>,
}

/// On-disk shape of a text: ordered books, chapters and verses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CorpusFile {
    abbreviation: String,
    #[serde(default)]
    name: String,
    books: Vec<BookText>,
}

/// A text held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    abbreviation: String,
    name: String,
    books: Vec<BookText>,
    /// Book names, cached for [`Corpus::book_names`]
    names: Vec<String>,
}

impl InMemoryCorpus {
    /// Create a corpus from its books.
    pub fn new(abbreviation: impl Into<String>, name: impl Into<String>, books: Vec<BookText>) -> Self {
        let names = books.iter().map(|b| b.name.clone()).collect();
        Self {
            abbreviation: abbreviation.into(),
            name: name.into(),
            books,
            names,
        }
    }

    /// Parse a text from JSON (`{"abbreviation", "name", "books": [{"name", "chapters"}]}`).
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CorpusFile = serde_json::from_str(json)
            .map_err(|e| Error::parse(format!("Invalid text JSON: {e}"), None))?;
        if file.abbreviation.trim().is_empty() {
            return Err(Error::parse("Text has no abbreviation", None));
        }
        Ok(Self::new(file.abbreviation, file.name, file.books))
    }

    /// Full name of the text.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn chapter(&self, book: BookIndex, chapter: u32) -> Option<&Vec<String>> {
        let idx = usize::try_from(chapter.checked_sub(1)?).ok()?;
        self.books.get(book.get())?.chapters.get(idx)
    }
}

impl Corpus for InMemoryCorpus {
    fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    fn book_names(&self) -> &[String] {
        &self.names
    }

    fn chapter_count(&self, book: BookIndex) -> u32 {
        self.books
            .get(book.get())
            .map_or(0, |b| u32::try_from(b.chapters.len()).unwrap_or(u32::MAX))
    }

    fn verse_count(&self, book: BookIndex, chapter: u32) -> u32 {
        self.chapter(book, chapter)
            .map_or(0, |c| u32::try_from(c.len()).unwrap_or(u32::MAX))
    }

    fn verse_text(&self, book: BookIndex, chapter: u32, verse: u32) -> Option<&str> {
        let idx = usize::try_from(verse.checked_sub(1)?).ok()?;
        self.chapter(book, chapter)?.get(idx).map(String::as_str)
    }
}

/// A single verse with its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    /// Verse number.
    pub number: u32,
    /// Verse text.
    pub text: String,
}

/// Collect the verses a reference covers.
///
/// A whole-book reference yields its first chapter; a whole-chapter
/// reference yields every verse of the chapter.
pub fn passage<C: Corpus + ?Sized>(corpus: &C, reference: &Reference) -> Result<Vec<Verse>> {
    let book = reference.book();
    if book.get() >= corpus.book_names().len() {
        return Err(Error::out_of_range(
            "book",
            u64::try_from(book.get()).unwrap_or(u64::MAX),
            "no such book in this text",
        ));
    }

    let chapter = reference.chapter().max(1);
    let count = corpus.verse_count(book, chapter);
    if count == 0 {
        return Err(Error::out_of_range("chapter", chapter, "chapter has no verses"));
    }

    let (start, end) = match (reference.verse(), reference.end_verse()) {
        (0, _) => (1, count),
        (v, 0) => (v, v),
        (v, e) => (v, e),
    };

    Ok((start..=end.min(count))
        .filter_map(|number| {
            corpus.verse_text(book, chapter, number).map(|text| Verse {
                number,
                text: text.to_string(),
            })
        })
        .collect())
}

/// Convert a number to superscript Unicode characters
fn to_superscript(n: u32) -> String {
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter_map(|d| SUPERSCRIPT_DIGITS.get(d as usize))
        .collect()
}

/// Join verses into one block with superscript verse numbers.
pub fn format_passage(verses: &[Verse]) -> String {
    let mut text = String::new();
    for verse in verses {
        // Normalize whitespace in source text
        let clean: String = verse.text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&to_superscript(verse.number));
        text.push_str(&clean);
    }
    text
}

/// Small three-book text shared by unit tests.
#[cfg(test)]
pub(crate) fn sample_corpus() -> InMemoryCorpus {
    let chapter = |verses: &[&str]| verses.iter().map(|v| (*v).to_string()).collect::<Vec<_>>();
    InMemoryCorpus::new(
        "TST",
        "Test Version",
        vec![
            BookText {
                name: "Genesis".into(),
                chapters: vec![
                    chapter(&[
                        "In the beginning God created the heaven and the earth.",
                        "And the earth was without form, and void.",
                        "And God said, Let there be light: and there was light.",
                    ]),
                    chapter(&["Thus the heavens and the earth were finished.", "And on the seventh day God ended his work."]),
                ],
            },
            BookText {
                name: "John".into(),
                chapters: vec![
                    chapter(&["In the beginning was the Word.", "The same was in the beginning with God."]),
                    chapter(&["And the third day there was a marriage in Cana."]),
                    chapter(&[
                        "There was a man of the Pharisees, named Nicodemus.",
                        "The same came to Jesus by night.",
                        "Jesus answered and said unto him.",
                        "For God so Loved the world, that he gave his only begotten Son.",
                        "He that loveth not knoweth not God; for God is love.",
                    ]),
                ],
            },
            BookText {
                name: "1 John".into(),
                chapters: vec![chapter(&["That which was from the beginning.", "Beloved, let us love one another."])],
            },
        ],
    )
}

//! Turns a whole input string into a reference, a version switch, a literal
//! search phrase, or an ambiguous outcome the caller treats as a search.

use serde::Serialize;

use crate::bible::books::resolve_book;
use crate::bible::locus::{self, looks_like_chapter_verse};
use crate::bible::tokenizer::tokenize;
use crate::bible::VersionCatalog;
use crate::constants::resolver::{CHAPTER_SEPARATORS, CONFIDENCE_THRESHOLD, MAX_TOKENS, READING_LABELS};
use crate::error::{Error, Result};
use crate::services::scripture::Corpus;
use crate::types::{BookIndex, BookMatch, ChapterVerseSpan, Reference};

/// Quote pairs that mark input as a literal phrase.
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’'), ('«', '»')];

/// Tunables for reference resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Minimum book similarity to commit to a reference.
    pub confidence_threshold: f64,
    /// Maximum number of tokens read from one input.
    pub max_tokens: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Caller state a resolution may depend on.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Book currently shown, used for locus-only input ("5:17").
    pub current_book: Option<BookIndex>,
    /// Versions that a leading abbreviation may switch to.
    pub versions: &'a VersionCatalog,
}

/// Outcome of resolving one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    /// A validated reference in the targeted text.
    Reference(Reference),
    /// Input began with a version abbreviation.
    VersionSwitch {
        /// Abbreviation of the version to switch to.
        version: String,
        /// Abbreviation of a version to show alongside, if given as `A:B`.
        compare_with: Option<String>,
        /// Tokens after the version prefix, to resolve against the new text.
        remaining: Vec<String>,
        /// The words after the version prefix as typed, for searching.
        rest: String,
    },
    /// Input was quoted; search for it literally.
    Phrase(String),
    /// No confident book match; treat the input as a search.
    Ambiguous {
        /// Best similarity found, 0.0 when there was no book token.
        score: f64,
        /// The best candidate, if any.
        best_guess: Option<BookMatch>,
    },
}

/// What a single pass over the tokens found.
#[derive(Debug, Default)]
struct TokenScan {
    book: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

/// Value of a multi-book numeral prefix ("1", "ii", "III").
fn numeral_prefix(token: &str) -> Option<u8> {
    match token.to_ascii_lowercase().as_str() {
        "1" | "i" => Some(1),
        "2" | "ii" => Some(2),
        "3" | "iii" => Some(3),
        _ => None,
    }
}

/// Inner text of input wrapped in a matching quote pair.
fn quoted_phrase(input: &str) -> Option<&str> {
    let mut chars = input.chars();
    let open = chars.next()?;
    let close = chars.next_back()?;
    QUOTE_PAIRS
        .iter()
        .any(|&(o, c)| o == open && c == close)
        .then(|| input[open.len_utf8()..input.len() - close.len_utf8()].trim())
}

/// Single left-to-right pass: book run, start locus, end locus.
///
/// The book is the first run of non-locus tokens, so multi-word names
/// ("Song of Solomon") stay together. A numeral prefix directly before the
/// run is converted to Arabic and concatenated ("1" + "John" = "1John").
/// Scanning stops at the second locus.
fn scan_tokens(tokens: &[String]) -> TokenScan {
    let mut scan = TokenScan::default();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let next_is_word = tokens.get(i + 1).is_some_and(|t| !looks_like_chapter_verse(t));

        if scan.book.is_none() && next_is_word {
            if let Some(n) = numeral_prefix(token) {
                let (run, consumed) = word_run(&tokens[i + 1..]);
                scan.book = Some(format!("{n}{run}"));
                i += 1 + consumed;
                continue;
            }
        }

        if looks_like_chapter_verse(token) {
            if scan.start.is_none() {
                scan.start = Some(token.clone());
            } else {
                scan.end = Some(token.clone());
                break;
            }
            i += 1;
        } else if scan.book.is_none() {
            let (run, consumed) = word_run(&tokens[i..]);
            scan.book = Some(run);
            i += consumed;
        } else {
            i += 1;
        }
    }

    scan
}

/// Join the leading run of non-locus tokens; returns the run and its length.
fn word_run(tokens: &[String]) -> (String, usize) {
    let words: Vec<&str> = tokens
        .iter()
        .take_while(|t| !looks_like_chapter_verse(t))
        .map(String::as_str)
        .collect();
    (words.join(" "), words.len())
}

/// Clamp a 1-based value into `[1, max]`; values below 1 are rejected.
fn clamp_high(value: u32, max: u32, what: &'static str) -> Result<u32> {
    if value == 0 {
        return Err(Error::out_of_range(what, value, "numbering starts at 1"));
    }
    if max == 0 {
        return Err(Error::out_of_range(what, value, "not present in this text"));
    }
    if value > max {
        tracing::debug!("Clamping {what} {value} to {max}");
    }
    Ok(value.min(max))
}

/// Start locus plus how the range ends.
#[derive(Debug, Clone, Copy)]
struct Loci {
    start: ChapterVerseSpan,
    /// End verse in the start chapter, 0 for none
    end_verse: u32,
    /// The range runs past the start chapter; end at its last verse
    to_chapter_end: bool,
}

/// Parse the start and optional end locus tokens into one range.
fn combine_loci(start_token: &str, end_token: Option<&str>) -> Result<Loci> {
    let mut start = locus::parse(start_token)?;
    let mut loci = Loci { start, end_verse: start.end_verse(), to_chapter_end: false };

    let Some(end_token) = end_token else {
        return Ok(loci);
    };

    let end_has_chapter = end_token.contains(CHAPTER_SEPARATORS);

    // "Jn 3 16": a bare chapter followed by a bare number is chapter and verse.
    if start.is_whole_chapter() && !end_has_chapter {
        start = locus::parse(&format!("{}:{end_token}", start.chapter()))?;
        return Ok(Loci { start, end_verse: start.end_verse(), to_chapter_end: false });
    }

    let end = locus::parse(end_token)?;

    if !end_has_chapter {
        // "Jn 3:16 18": a bare number after a verse is the end verse.
        if start.verse() > 0 {
            loci.end_verse = end.chapter();
        }
        return Ok(loci);
    }

    // "Jn 3:2 3:": the start chapter with no verse runs to its end
    if start.verse() > 0 && end.is_whole_chapter() && end.chapter() == start.chapter() {
        loci.to_chapter_end = true;
        return Ok(loci);
    }

    if end.locus_cmp(&start).is_lt() {
        return Err(Error::out_of_range("end verse", end.verse(), "end precedes start"));
    }
    if start.verse() == 0 {
        tracing::debug!("Ignoring end locus {end_token:?} after a whole chapter");
    } else if end.chapter() == start.chapter() {
        loci.end_verse = if end.end_verse() > 0 { end.end_verse() } else { end.verse() };
    } else {
        loci.to_chapter_end = true;
    }
    Ok(loci)
}

/// Bind parsed loci to a book, clamping to what the text contains.
fn build_reference<C: Corpus + ?Sized>(
    corpus: &C,
    book: BookIndex,
    loci: Option<Loci>,
) -> Result<Reference> {
    if book.get() >= corpus.book_names().len() {
        return Err(Error::out_of_range(
            "book",
            u64::try_from(book.get()).unwrap_or(u64::MAX),
            "no such book in this text",
        ));
    }

    let Some(loci) = loci else {
        return Ok(Reference::book_only(book));
    };
    let start = loci.start;

    let chapter = clamp_high(start.chapter(), corpus.chapter_count(book), "chapter")?;
    if start.verse() == 0 {
        return Reference::new(book, chapter, 0, 0, start.subscript());
    }

    let verse_count = corpus.verse_count(book, chapter);
    let verse = clamp_high(start.verse(), verse_count, "verse")?;
    let end_verse = if loci.to_chapter_end {
        verse_count
    } else if loci.end_verse > 0 {
        clamp_high(loci.end_verse, verse_count, "end verse")?
    } else {
        0
    };
    // a range clamped down to one verse is just that verse
    let end_verse = if end_verse == verse { 0 } else { end_verse };

    Reference::new(book, chapter, verse, end_verse, start.subscript())
}

/// Resolves typed input against one text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceResolver {
    config: ResolverConfig,
}

impl ReferenceResolver {
    /// Create a resolver with the given tunables.
    pub const fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The resolver's tunables.
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one input string against `corpus`.
    pub fn resolve<C: Corpus + ?Sized>(
        &self,
        input: &str,
        corpus: &C,
        ctx: &ResolveContext<'_>,
    ) -> Result<Resolution> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::NullOrEmptyInput);
        }

        if let Some(phrase) = quoted_phrase(input) {
            tracing::debug!("Quoted input {phrase:?} is a literal search");
            return Ok(Resolution::Phrase(phrase.to_string()));
        }

        if let Some(switch) = self.version_prefix(input, ctx.versions) {
            return Ok(switch);
        }

        let tokens = tokenize(input, self.config.max_tokens);
        self.resolve_tokens(&tokens, corpus, ctx.current_book)
    }

    /// Resolve already-tokenized input, e.g. the remainder of a version switch.
    pub fn resolve_tokens<C: Corpus + ?Sized>(
        &self,
        tokens: &[String],
        corpus: &C,
        current_book: Option<BookIndex>,
    ) -> Result<Resolution> {
        if tokens.is_empty() {
            return Err(Error::NullOrEmptyInput);
        }

        let scan = scan_tokens(tokens);
        tracing::debug!(
            "Scanned {tokens:?}: book={:?} start={:?} end={:?}",
            scan.book,
            scan.start,
            scan.end
        );

        let Some(book_token) = scan.book else {
            return Self::resolve_locus_only(corpus, &scan, tokens, current_book);
        };

        let found = resolve_book(&book_token, corpus.book_names())
            .ok_or_else(|| Error::UnknownBook(book_token.clone()))?;

        if found.similarity < self.config.confidence_threshold {
            tracing::debug!("Book {book_token:?} below threshold ({:.3})", found.similarity);
            return Ok(Resolution::Ambiguous {
                score: found.similarity,
                best_guess: Some(found),
            });
        }

        let loci = scan
            .start
            .as_deref()
            .map(|start| combine_loci(start, scan.end.as_deref()))
            .transpose()?;
        build_reference(corpus, found.book, loci).map(Resolution::Reference)
    }

    /// Resolve what followed a version prefix against the switched-to text.
    ///
    /// `rest` is the `rest` of a [`Resolution::VersionSwitch`]. A quoted
    /// remainder is a phrase, the same as quoted input without a prefix.
    pub fn resolve_after_switch<C: Corpus + ?Sized>(
        &self,
        rest: &str,
        corpus: &C,
        current_book: Option<BookIndex>,
    ) -> Result<Resolution> {
        let rest = rest.trim();
        if let Some(phrase) = quoted_phrase(rest) {
            tracing::debug!("Quoted remainder {phrase:?} is a literal search");
            return Ok(Resolution::Phrase(phrase.to_string()));
        }
        self.resolve_tokens(&tokenize(rest, self.config.max_tokens), corpus, current_book)
    }

    /// Strip a reading label, then resolve each `;`-separated reference.
    ///
    /// Parenthetical notes after a reference are dropped.
    pub fn resolve_all<C: Corpus + ?Sized>(
        &self,
        input: &str,
        corpus: &C,
        ctx: &ResolveContext<'_>,
    ) -> Vec<Result<Resolution>> {
        let mut text = input.trim();
        for label in READING_LABELS {
            text = text.trim_start_matches(label).trim();
        }

        // "(Hope)" style notes after a reference are not part of it
        text.split(';')
            .map(|part| part.split('(').next().unwrap_or(part).trim())
            .filter(|part| !part.is_empty())
            .map(|part| self.resolve(part, corpus, ctx))
            .collect()
    }

    /// Input with no book token: navigate within the current book.
    fn resolve_locus_only<C: Corpus + ?Sized>(
        corpus: &C,
        scan: &TokenScan,
        tokens: &[String],
        current_book: Option<BookIndex>,
    ) -> Result<Resolution> {
        let Some(start) = scan.start.as_deref() else {
            return Ok(Resolution::Ambiguous { score: 0.0, best_guess: None });
        };
        let loci = combine_loci(start, scan.end.as_deref())?;
        if loci.start.chapter() == 0 {
            return Ok(Resolution::Ambiguous { score: 0.0, best_guess: None });
        }
        let Some(book) = current_book else {
            return Err(Error::UnknownBook(tokens.join(" ")));
        };
        build_reference(corpus, book, Some(loci)).map(Resolution::Reference)
    }

    /// A leading version abbreviation, optionally `A:B` for a comparison.
    fn version_prefix(&self, input: &str, versions: &VersionCatalog) -> Option<Resolution> {
        if versions.is_empty() {
            return None;
        }

        let mut words = input.split_whitespace().peekable();
        let first = words.next()?;
        let (primary, mut compare) = match first.split_once(':') {
            Some((a, b)) => (a, Some(b)),
            None => (first, None),
        };
        let version = versions.lookup(primary)?;

        // "KJV: NIV" and "KJV : NIV"
        if compare.is_some_and(str::is_empty) || words.peek() == Some(&":") {
            if words.peek() == Some(&":") {
                words.next();
            }
            compare = words.next_if(|w| versions.lookup(w).is_some());
        }

        let compare_with = match compare {
            Some(c) if !c.is_empty() => Some(versions.lookup(c)?.abbreviation.clone()),
            _ => None,
        };

        let rest = words.collect::<Vec<_>>().join(" ");
        let remaining = tokenize(&rest, self.config.max_tokens);
        tracing::debug!("Version prefix {} (compare {compare_with:?})", version.abbreviation);

        Some(Resolution::VersionSwitch {
            version: version.abbreviation.clone(),
            compare_with,
            remaining,
            rest,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::VersionInfo;
    use crate::services::scripture::{sample_corpus, BookText, InMemoryCorpus};
    use crate::types::Subscript;

    fn catalog() -> VersionCatalog {
        VersionCatalog::new(vec![
            VersionInfo::new("TST", "Test Version"),
            VersionInfo::new("KJV", "King James Version"),
        ])
    }

    fn resolve_in(input: &str, current_book: Option<BookIndex>) -> Result<Resolution> {
        let versions = catalog();
        let ctx = ResolveContext { current_book, versions: &versions };
        ReferenceResolver::default().resolve(input, &sample_corpus(), &ctx)
    }

    fn resolve(input: &str) -> Result<Resolution> {
        resolve_in(input, None)
    }

    fn reference(input: &str) -> Reference {
        match resolve(input).unwrap() {
            Resolution::Reference(r) => r,
            other => panic!("{input:?} resolved to {other:?}"),
        }
    }

    fn parts(r: Reference) -> (usize, u32, u32, u32, Subscript) {
        (r.book().get(), r.chapter(), r.verse(), r.end_verse(), r.subscript())
    }

    #[test]
    fn simple_reference() {
        assert_eq!(parts(reference("John 3:16")), (1, 3, 4, 0, Subscript::None));
        assert_eq!(parts(reference("Genesis 1:1-2")), (0, 1, 1, 2, Subscript::None));
    }

    #[test]
    fn glued_and_abbreviated() {
        assert_eq!(parts(reference("Genesis1")), (0, 1, 0, 0, Subscript::None));
        assert_eq!(parts(reference("Jn3 4")), (1, 3, 4, 0, Subscript::None));
        assert_eq!(parts(reference("gen 2.1")), (0, 2, 1, 0, Subscript::None));
    }

    #[test]
    fn numeral_prefix_selects_numbered_book() {
        assert_eq!(reference("1 John 1:2").book(), BookIndex(2));
        assert_eq!(reference("1Jn 1").book(), BookIndex(2));
        assert_eq!(reference("I John 1:1").book(), BookIndex(2));
        assert_eq!(reference("John 1:1").book(), BookIndex(1));
    }

    #[test]
    fn subscripts_survive() {
        assert_eq!(parts(reference("Jn 3:2b")), (1, 3, 2, 0, Subscript::B));
        assert_eq!(parts(reference("Jn 3:1-2a")), (1, 3, 1, 2, Subscript::A));
    }

    #[test]
    fn book_only() {
        assert_eq!(parts(reference("Genesis")), (0, 0, 0, 0, Subscript::None));
    }

    #[test]
    fn clamps_high_values() {
        assert_eq!(parts(reference("Genesis 9999")), (0, 2, 0, 0, Subscript::None));
        assert_eq!(parts(reference("John 3:99")), (1, 3, 5, 0, Subscript::None));
        assert_eq!(parts(reference("John 3:2-99")), (1, 3, 2, 5, Subscript::None));
    }

    #[test]
    fn rejects_zero_chapter() {
        assert!(matches!(resolve("Genesis 0"), Err(Error::OutOfRange { .. })));
        assert!(matches!(resolve("Genesis 1:0"), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn invalid_locus_format() {
        assert!(matches!(resolve("John 2:1:5"), Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn end_locus_tokens() {
        // bare number after a verse is the end verse
        assert_eq!(parts(reference("John 3:2 4")), (1, 3, 2, 4, Subscript::None));
        // same-chapter end locus
        assert_eq!(parts(reference("John 3:2 3:4")), (1, 3, 2, 4, Subscript::None));
        // later chapter runs to the end of the start chapter
        assert_eq!(parts(reference("Genesis 1:2 2:1")), (0, 1, 2, 3, Subscript::None));
    }

    #[test]
    fn same_chapter_without_verse_runs_to_chapter_end() {
        assert_eq!(parts(reference("John 3:2 3:")), (1, 3, 2, 5, Subscript::None));
        assert_eq!(parts(reference("Genesis 1:1 1:")), (0, 1, 1, 3, Subscript::None));
        // an earlier chapter is still out of range
        assert!(matches!(resolve("John 3:2 2:"), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn end_before_start_is_out_of_range() {
        assert!(matches!(resolve("John 3:4 2:1"), Err(Error::OutOfRange { .. })));
        assert!(matches!(resolve("John 3:4 2"), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn low_similarity_is_ambiguous() {
        match resolve("xyzzy quux").unwrap() {
            Resolution::Ambiguous { score, best_guess } => {
                assert!(score < 0.25);
                assert!(best_guess.is_some());
            }
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn threshold_is_configurable() {
        let versions = catalog();
        let ctx = ResolveContext { current_book: None, versions: &versions };
        let strict = ReferenceResolver::new(ResolverConfig { confidence_threshold: 0.9, ..ResolverConfig::default() });
        let out = strict.resolve("Jn 3:16", &sample_corpus(), &ctx).unwrap();
        assert!(matches!(out, Resolution::Ambiguous { .. }));
    }

    #[test]
    fn quoted_input_is_a_phrase() {
        assert_eq!(resolve("\"John 3:16\"").unwrap(), Resolution::Phrase("John 3:16".into()));
        assert_eq!(resolve("“so loved”").unwrap(), Resolution::Phrase("so loved".into()));
        // unmatched quote is not a phrase
        assert!(!matches!(resolve("\"John 3:16").unwrap(), Resolution::Phrase(_)));
    }

    #[test]
    fn version_prefix_switches() {
        match resolve("kjv John 3:16").unwrap() {
            Resolution::VersionSwitch { version, compare_with, remaining, rest } => {
                assert_eq!(version, "KJV");
                assert_eq!(compare_with, None);
                assert_eq!(remaining, vec!["John", "3:16"]);
                assert_eq!(rest, "John 3:16");
            }
            other => panic!("expected version switch, got {other:?}"),
        }
    }

    #[test]
    fn version_prefix_with_comparison() {
        for input in ["KJV:TST Jn3", "KJV: TST Jn3", "KJV : TST Jn3"] {
            match resolve(input).unwrap() {
                Resolution::VersionSwitch { version, compare_with, remaining, .. } => {
                    assert_eq!(version, "KJV");
                    assert_eq!(compare_with.as_deref(), Some("TST"), "{input}");
                    assert_eq!(remaining, vec!["Jn", "3"]);
                }
                other => panic!("expected version switch, got {other:?}"),
            }
        }
    }

    #[test]
    fn remaining_tokens_resolve_against_new_text() {
        let Resolution::VersionSwitch { remaining, .. } = resolve("KJV Jn 3 4").unwrap() else {
            panic!("expected version switch");
        };
        let out = ReferenceResolver::default().resolve_tokens(&remaining, &sample_corpus(), None).unwrap();
        let Resolution::Reference(r) = out else { panic!("expected reference") };
        assert_eq!(parts(r), (1, 3, 4, 0, Subscript::None));
    }

    #[test]
    fn quoted_remainder_after_prefix_is_a_phrase() {
        let Resolution::VersionSwitch { rest, .. } = resolve("KJV \"so loved\"").unwrap() else {
            panic!("expected version switch");
        };
        assert_eq!(rest, "\"so loved\"");
        let out = ReferenceResolver::default().resolve_after_switch(&rest, &sample_corpus(), None).unwrap();
        assert_eq!(out, Resolution::Phrase("so loved".into()));
    }

    #[test]
    fn unquoted_remainder_after_prefix_resolves() {
        let Resolution::VersionSwitch { rest, .. } = resolve("TST Jn3 4").unwrap() else {
            panic!("expected version switch");
        };
        assert_eq!(rest, "Jn3 4");
        let out = ReferenceResolver::default().resolve_after_switch(&rest, &sample_corpus(), None).unwrap();
        let Resolution::Reference(r) = out else { panic!("expected reference") };
        assert_eq!(parts(r), (1, 3, 4, 0, Subscript::None));
    }

    #[test]
    fn locus_only_uses_current_book() {
        let out = resolve_in("3:2", Some(BookIndex(1))).unwrap();
        let Resolution::Reference(r) = out else { panic!("expected reference") };
        assert_eq!(parts(r), (1, 3, 2, 0, Subscript::None));

        assert!(matches!(resolve("3:2"), Err(Error::UnknownBook(_))));
    }

    #[test]
    fn locus_only_without_chapter_is_ambiguous() {
        assert!(matches!(
            resolve_in("a", Some(BookIndex(0))).unwrap(),
            Resolution::Ambiguous { best_guess: None, .. }
        ));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(resolve("   "), Err(Error::NullOrEmptyInput)));
    }

    #[test]
    fn empty_text_has_no_books() {
        let versions = VersionCatalog::default();
        let ctx = ResolveContext { current_book: None, versions: &versions };
        let empty = InMemoryCorpus::default();
        let out = ReferenceResolver::default().resolve("John 3:16", &empty, &ctx);
        assert!(matches!(out, Err(Error::UnknownBook(_))));
    }

    #[test]
    fn multi_word_book_names() {
        let corpus = InMemoryCorpus::new(
            "TST",
            "With Song",
            vec![BookText {
                name: "Song of Solomon".into(),
                chapters: vec![vec!["I am the rose of Sharon.".into()]],
            }],
        );
        let versions = VersionCatalog::default();
        let ctx = ResolveContext { current_book: None, versions: &versions };
        let out = ReferenceResolver::default().resolve("Song of Solomon 1:1", &corpus, &ctx).unwrap();
        let Resolution::Reference(r) = out else { panic!("expected reference") };
        assert_eq!(parts(r), (0, 1, 1, 0, Subscript::None));
    }

    #[test]
    fn reading_lists() {
        let versions = catalog();
        let ctx = ResolveContext { current_book: None, versions: &versions };
        let results = ReferenceResolver::default().resolve_all(
            "Scripture: Genesis 1:1; John 3:16 (Advent); ",
            &sample_corpus(),
            &ctx,
        );
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(r, Ok(Resolution::Reference(_)))));
    }

    #[test]
    fn locus_round_trips_through_parser() {
        let r = reference("John 3:1-2b");
        let span = locus::parse(&r.locus()).unwrap();
        assert_eq!(span, r.span());
    }
}

//! End-to-end resolution and search against in-memory texts.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use versenav::bible::{
    looks_like_chapter_verse, parse_locus, resolve_book, tokenize, ReferenceResolver, ResolveContext, Resolution,
    VersionCatalog, VersionInfo,
};
use versenav::constants::resolver::MAX_TOKENS;
use versenav::error::Error;
use versenav::services::scripture::{passage, BookText, Corpus, InMemoryCorpus};
use versenav::services::search::{scan, SearchEngine, SearchProgress, SearchStatus};
use versenav::types::{BookIndex, Reference};
use versenav::utils::normalize::fold;
use versenav::utils::similarity::similarity;

/// A book whose chapters have the given verse counts, filled with plain text.
fn book(name: &str, verse_counts: &[usize]) -> BookText {
    BookText {
        name: name.to_string(),
        chapters: verse_counts
            .iter()
            .enumerate()
            .map(|(c, &n)| (1..=n).map(|v| format!("{name} chapter {} verse {v}.", c + 1)).collect())
            .collect(),
    }
}

fn english() -> InMemoryCorpus {
    let mut genesis = book("Genesis", &[31; 50]);
    genesis.chapters[0][0] = "In the beginning God created the heaven and the earth.".into();
    let mut john = book("John", &[51, 25, 36]);
    john.chapters[2][15] = "For God so loved the world, that he gave his only begotten Son.".into();
    let mut first_john = book("1 John", &[10, 29, 24, 21]);
    first_john.chapters[3][7] = "He that loveth not knoweth not God; for God is love.".into();

    InMemoryCorpus::new(
        "KJV",
        "King James Version",
        vec![
            genesis,
            book("Exodus", &[22, 25]),
            book("Job", &[22]),
            book("Song of Solomon", &[17, 17]),
            john,
            book("2 Corinthians", &[24, 17, 18, 18, 21]),
            first_john,
            book("2 John", &[13]),
            book("3 John", &[14]),
        ],
    )
}

fn spanish() -> InMemoryCorpus {
    let mut genesis = book("Génesis", &[31]);
    genesis.chapters[0][0] = "En el principio creó Dios los cielos y la tierra.".into();
    let mut exodus = book("Éxodo", &[22]);
    exodus.chapters[0][0] = "Estos son los nombres de los hijos de Israel; Dios los vio.".into();
    InMemoryCorpus::new("RVR1960", "Reina-Valera 1960", vec![genesis, exodus, book("Juan", &[51, 25, 36])])
}

fn catalog() -> VersionCatalog {
    VersionCatalog::new(vec![
        VersionInfo::new("KJV", "King James Version"),
        VersionInfo::new("RVR1960", "Reina-Valera 1960"),
    ])
}

fn resolve_in(corpus: &InMemoryCorpus, input: &str) -> versenav::error::Result<Resolution> {
    let versions = catalog();
    let ctx = ResolveContext { current_book: None, versions: &versions };
    ReferenceResolver::default().resolve(input, corpus, &ctx)
}

fn display(corpus: &InMemoryCorpus, input: &str) -> String {
    match resolve_in(corpus, input).unwrap() {
        Resolution::Reference(r) => r.display(corpus.book_names()),
        other => panic!("{input:?} resolved to {other:?}"),
    }
}

#[test]
fn typed_references_resolve() {
    let kjv = english();
    assert_eq!(display(&kjv, "2 Cor 5:17"), "2 Corinthians 5:17");
    assert_eq!(display(&kjv, "Jn3 16"), "John 3:16");
    assert_eq!(display(&kjv, "Genesis1"), "Genesis 1");
    assert_eq!(display(&kjv, "1 Jn 4:8"), "1 John 4:8");
    assert_eq!(display(&kjv, "II Cor 5:17"), "2 Corinthians 5:17");
    assert_eq!(display(&kjv, "iii john 1:4"), "3 John 1:4");
    assert_eq!(display(&kjv, "Song 2:4"), "Song of Solomon 2:4");
    assert_eq!(display(&kjv, "John 3:16-18a"), "John 3:16-18a");
    assert_eq!(display(&kjv, "gen 1.1"), "Genesis 1:1");
}

#[test]
fn book_names_come_from_the_loaded_text() {
    let rvr = spanish();
    assert_eq!(display(&rvr, "Juan 3:16"), "Juan 3:16");
    assert_eq!(display(&rvr, "genesis 1:1"), "Génesis 1:1");
    assert_eq!(display(&rvr, "Exodo 1"), "Éxodo 1");

    let m = resolve_book("Juan", english().book_names()).unwrap();
    assert!(!m.is_exact());
}

#[test]
fn exact_similarity_only_for_equal_names() {
    let kjv = english();
    for token in ["John", "jOhN", "Jn", "1John", "Genesis1", "Song of Solomon", "Corinthians", "Jobb"] {
        assert!(!looks_like_chapter_verse(token));
        let m = resolve_book(token, kjv.book_names()).unwrap();
        let equal = kjv.book_names().iter().any(|n| n.to_lowercase() == token.to_lowercase());
        assert_eq!(m.is_exact(), equal, "{token}");
    }
}

#[test]
fn reference_locus_round_trips() {
    let kjv = english();
    for input in ["John 3:16", "John 3:16-18", "Genesis 2", "2 Cor 5:17b", "1 John 4:7-8a"] {
        let Resolution::Reference(r) = resolve_in(&kjv, input).unwrap() else {
            panic!("{input} did not resolve");
        };
        assert_eq!(parse_locus(&r.locus()).unwrap(), r.span(), "{input}");
    }
}

#[test]
fn similarity_bounds() {
    for a in ["a", "John", "Génesis"] {
        assert!((similarity(a, a) - 1.0).abs() < f64::EPSILON);
        assert!(similarity(a, "").abs() < f64::EPSILON);
    }
    assert!(similarity("", "").abs() < f64::EPSILON);
}

#[test]
fn tokenizer_and_parser_examples() {
    assert_eq!(tokenize("2Jn1", MAX_TOKENS), vec!["2", "Jn", "1"]);
    let span = parse_locus("3:32-34b").unwrap();
    assert_eq!((span.chapter(), span.verse(), span.end_verse(), span.subscript().as_str()), (3, 32, 34, "b"));
    assert!(matches!(parse_locus("2:1:5"), Err(Error::InvalidFormat { .. })));
}

#[test]
fn chapters_clamp_high_and_reject_zero() {
    let kjv = english();
    assert_eq!(display(&kjv, "Genesis 9999"), "Genesis 50");
    assert_eq!(display(&kjv, "John 3:99"), "John 3:36");
    assert!(matches!(resolve_in(&kjv, "Genesis 0"), Err(Error::OutOfRange { .. })));
}

#[test]
fn non_references_fall_back_to_search() {
    let kjv = english();
    assert!(matches!(resolve_in(&kjv, "\"so loved\"").unwrap(), Resolution::Phrase(q) if q == "so loved"));
    assert!(matches!(resolve_in(&kjv, "qqqqqqqq").unwrap(), Resolution::Ambiguous { .. }));
    assert!(matches!(resolve_in(&kjv, ""), Err(Error::NullOrEmptyInput)));
}

#[test]
fn version_prefix_switches_text() {
    let kjv = english();
    let rvr = spanish();
    let Resolution::VersionSwitch { version, compare_with, remaining, .. } =
        resolve_in(&kjv, "RVR1960:KJV Juan 3:16").unwrap()
    else {
        panic!("expected a version switch");
    };
    assert_eq!(version, "RVR1960");
    assert_eq!(compare_with.as_deref(), Some("KJV"));

    let out = ReferenceResolver::default().resolve_tokens(&remaining, &rvr, None).unwrap();
    let Resolution::Reference(r) = out else { panic!("expected a reference") };
    assert_eq!(r.display(rvr.book_names()), "Juan 3:16");
    assert_eq!(passage(&rvr, &r).unwrap().len(), 1);
}

#[test]
fn search_after_version_prefix_uses_only_the_remainder() {
    let kjv = english();
    let Resolution::VersionSwitch { version, rest, .. } = resolve_in(&kjv, "KJV so loved").unwrap() else {
        panic!("expected a version switch");
    };
    assert_eq!(version, "KJV");
    assert_eq!(rest, "so loved");
    let hits: Vec<_> = scan(&kjv, &rest, CancellationToken::new()).collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].highlight, "so loved");

    let Resolution::VersionSwitch { rest, .. } = resolve_in(&kjv, "KJV \"so loved\"").unwrap() else {
        panic!("expected a version switch");
    };
    let out = ReferenceResolver::default().resolve_after_switch(&rest, &kjv, None).unwrap();
    assert_eq!(out, Resolution::Phrase("so loved".into()));
}

#[test]
fn search_cancelled_after_first_report_keeps_partial_hits() {
    let kjv = english();
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let mut first_hit_scanned = None;

    let outcome = SearchEngine::default().run(&kjv, "love", &cancel, &mut |p: SearchProgress| {
        if first_hit_scanned.is_none() {
            first_hit_scanned = Some(p.verses_scanned);
            token.cancel();
        }
    });

    assert_eq!(outcome.status, SearchStatus::Canceled);
    assert_eq!(outcome.hits.len(), 1);
    assert_eq!(outcome.hits[0].highlight, "love");
    assert!(outcome.verses_scanned <= first_hit_scanned.unwrap() + 1);

    let all: Vec<_> = scan(&kjv, "love", CancellationToken::new()).collect();
    assert_eq!(all.len(), 2);
}

#[test]
fn hits_follow_book_order_not_alphabetical_order() {
    let rvr = spanish();
    let hits: Vec<_> = scan(&rvr, "dios", CancellationToken::new()).collect();
    let books: Vec<_> = hits.iter().map(|h| h.reference.book()).collect();
    assert_eq!(books, vec![BookIndex(0), BookIndex(1)]);
    // by name, "Éxodo" sorts before "Génesis"
    assert!(fold(&rvr.book_names()[1]) < fold(&rvr.book_names()[0]));

    let mut shuffled = hits.clone();
    shuffled.reverse();
    shuffled.sort();
    assert_eq!(shuffled, hits);
    assert_eq!(hits[0].highlight, "Dios");
}

#[tokio::test]
async fn spawned_search_runs_off_the_caller() {
    let kjv = Arc::new(english());
    let engine = SearchEngine::default();
    let (tx, mut rx) = tokio::sync::mpsc::channel(8);
    let handle = engine.spawn(Arc::clone(&kjv), "created", tx);

    let mut statuses = Vec::new();
    while let Some(p) = rx.recv().await {
        statuses.push(p.status);
    }
    let outcome = handle.outcome().await.unwrap();

    assert_eq!(outcome.hits.len(), 1);
    assert_eq!(statuses.last(), Some(&SearchStatus::Complete));
    assert_eq!(
        outcome.hits[0].reference,
        Reference::verse_at(BookIndex(0), 1, 1).unwrap()
    );
    assert_eq!(outcome.verses_scanned, kjv.total_verses());
}

//! Verse search.
//!
//! [`scan`] walks a text in canonical order and yields hits lazily;
//! [`SearchEngine`] drives a scan, reports progress snapshots, and can run it
//! on a blocking worker so the caller stays responsive.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::services::scripture::Corpus;
use crate::types::{BookIndex, BookMatch, MatchSpan, Reference, SearchHit};
use crate::utils::normalize::{fold, fold_with_offsets};
use crate::utils::similarity::similarity;

/// Where a search stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    /// Still scanning.
    Running,
    /// Every verse was scanned.
    Complete,
    /// Stopped early on request; hits so far are kept.
    Canceled,
}

/// Snapshot sent to a [`ProgressSink`].
#[derive(Debug, Clone, Serialize)]
pub struct SearchProgress {
    /// Search this report belongs to.
    pub generation: u64,
    /// Status at the time of the report.
    pub status: SearchStatus,
    /// Verses examined so far.
    pub verses_scanned: usize,
    /// Hits found so far.
    pub hit_count: usize,
    /// The hit that triggered this report, if any.
    pub latest: Option<SearchHit>,
}

/// Receiver of search progress.
pub trait ProgressSink {
    /// Deliver one snapshot.
    fn report(&mut self, progress: SearchProgress);
}

impl<F: FnMut(SearchProgress)> ProgressSink for F {
    fn report(&mut self, progress: SearchProgress) {
        self(progress);
    }
}

/// Channel sink; never blocks, so it is safe from async and blocking code.
///
/// Snapshots that do not fit in the channel are dropped. The full hit list
/// is always in the [`SearchOutcome`].
impl ProgressSink for mpsc::Sender<SearchProgress> {
    fn report(&mut self, progress: SearchProgress) {
        match self.try_send(progress) {
            Ok(()) => {}
            Err(TrySendError::Full(p)) => {
                tracing::debug!("Progress channel full, dropping report at {} verses", p.verses_scanned);
            }
            Err(TrySendError::Closed(_)) => tracing::debug!("Progress receiver dropped"),
        }
    }
}

/// Everything a finished search produced.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Search this outcome belongs to.
    pub generation: u64,
    /// Terminal status: complete or canceled.
    pub status: SearchStatus,
    /// Hits in canonical order.
    pub hits: Vec<SearchHit>,
    /// Verses examined.
    pub verses_scanned: usize,
}

impl SearchOutcome {
    /// Whether there are more hits than a renderer should show.
    ///
    /// Presentation only: scanning never stops at the limit.
    pub fn exceeds(&self, display_limit: usize) -> bool {
        self.hits.len() > display_limit
    }
}

/// Lazy, cancellable scan over every verse of a text.
///
/// Created by [`scan`]. Ends when the text is exhausted or cancellation is
/// observed; [`SearchScan::status`] says which.
#[derive(Debug)]
pub struct SearchScan<'a, C: Corpus + ?Sized> {
    corpus: &'a C,
    query: String,
    query_chars: usize,
    cancel: CancellationToken,
    status: SearchStatus,
    verses_scanned: usize,
    // cursor: last visited verse, 0 before the first
    book: usize,
    chapter: u32,
    verse: u32,
}

/// Start a scan of `corpus` for `query`, ignoring case and accents.
///
/// An empty query finishes immediately with no hits.
pub fn scan<'a, C: Corpus + ?Sized>(
    corpus: &'a C,
    query: &str,
    cancel: CancellationToken,
) -> SearchScan<'a, C> {
    let query = fold(query);
    let status = if query.is_empty() { SearchStatus::Complete } else { SearchStatus::Running };
    SearchScan {
        corpus,
        query_chars: query.chars().count(),
        query,
        cancel,
        status,
        verses_scanned: 0,
        book: 0,
        chapter: 0,
        verse: 0,
    }
}

impl<C: Corpus + ?Sized> SearchScan<'_, C> {
    /// Current status; `Running` until the iterator is exhausted.
    pub const fn status(&self) -> SearchStatus {
        self.status
    }

    /// Verses examined so far.
    pub const fn verses_scanned(&self) -> usize {
        self.verses_scanned
    }

    /// Move the cursor to the next verse in canonical order.
    fn advance(&mut self) -> Option<(BookIndex, u32, u32)> {
        while self.book < self.corpus.book_names().len() {
            let book = BookIndex(self.book);
            if self.chapter > 0 && self.verse < self.corpus.verse_count(book, self.chapter) {
                self.verse += 1;
                return Some((book, self.chapter, self.verse));
            }
            if self.chapter < self.corpus.chapter_count(book) {
                self.chapter += 1;
                self.verse = 0;
            } else {
                self.book += 1;
                self.chapter = 0;
                self.verse = 0;
            }
        }
        None
    }
}

impl<C: Corpus + ?Sized> Iterator for SearchScan<'_, C> {
    type Item = SearchHit;

    fn next(&mut self) -> Option<SearchHit> {
        if self.status != SearchStatus::Running {
            return None;
        }
        loop {
            if self.cancel.is_cancelled() {
                self.status = SearchStatus::Canceled;
                return None;
            }
            let Some((book, chapter, verse)) = self.advance() else {
                self.status = SearchStatus::Complete;
                return None;
            };
            self.verses_scanned += 1;

            let Some(text) = self.corpus.verse_text(book, chapter, verse) else {
                continue;
            };
            let Some(span) = locate(&self.query, self.query_chars, text) else {
                continue;
            };
            let Ok(reference) = Reference::verse_at(book, chapter, verse) else {
                continue;
            };
            return Some(SearchHit {
                reference,
                highlight: text[span.start..span.start + span.len].to_string(),
                span,
                verse_text: text.to_string(),
            });
        }
    }
}

/// First occurrence of a folded query in `text`, as a source byte range.
fn locate(query: &str, query_chars: usize, text: &str) -> Option<MatchSpan> {
    let folded = fold_with_offsets(text);
    let byte = folded.text.find(query)?;
    let start_char = folded.text[..byte].chars().count();
    let (start, len) = folded.source_range(start_char, query_chars)?;
    Some(MatchSpan { start, len })
}

/// Runs searches and tracks which one is current.
///
/// Clones share the generation counter, so starting a search on any clone
/// supersedes searches started on the others.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    generation: Arc<AtomicU64>,
    display_limit: usize,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(crate::constants::search::DISPLAY_LIMIT)
    }
}

impl SearchEngine {
    /// Create an engine with the given display limit.
    pub fn new(display_limit: usize) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            display_limit,
        }
    }

    /// Hit count above which results are "too many" to show.
    pub const fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// Whether `generation` is the most recently started search.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Search on the calling thread, reporting progress to `sink`.
    pub fn run<C, S>(&self, corpus: &C, query: &str, cancel: &CancellationToken, sink: &mut S) -> SearchOutcome
    where
        C: Corpus + ?Sized,
        S: ProgressSink + ?Sized,
    {
        let generation = self.next_generation();
        self.run_generation(generation, corpus, query, cancel, sink)
    }

    /// Search on a blocking worker; progress goes to `sink`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<C, S>(&self, corpus: Arc<C>, query: impl Into<String>, mut sink: S) -> SearchHandle
    where
        C: Corpus + Send + Sync + ?Sized + 'static,
        S: ProgressSink + Send + 'static,
    {
        let generation = self.next_generation();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let engine = self.clone();
        let query = query.into();

        let join = tokio::task::spawn_blocking(move || {
            engine.run_generation(generation, corpus.as_ref(), &query, &token, &mut sink)
        });

        SearchHandle { generation, cancel, join }
    }

    fn run_generation<C, S>(
        &self,
        generation: u64,
        corpus: &C,
        query: &str,
        cancel: &CancellationToken,
        sink: &mut S,
    ) -> SearchOutcome
    where
        C: Corpus + ?Sized,
        S: ProgressSink + ?Sized,
    {
        let mut scanner = scan(corpus, query, cancel.clone());
        let mut hits = Vec::new();

        while let Some(hit) = scanner.next() {
            hits.push(hit.clone());
            self.report(
                sink,
                SearchProgress {
                    generation,
                    status: SearchStatus::Running,
                    verses_scanned: scanner.verses_scanned(),
                    hit_count: hits.len(),
                    latest: Some(hit),
                },
            );
        }

        let status = scanner.status();
        let verses_scanned = scanner.verses_scanned();
        self.report(
            sink,
            SearchProgress {
                generation,
                status,
                verses_scanned,
                hit_count: hits.len(),
                latest: None,
            },
        );

        tracing::info!(
            "Search #{generation} for {query:?} in {}: {} hits, {verses_scanned} verses, {status:?}",
            corpus.abbreviation(),
            hits.len()
        );
        if hits.len() > self.display_limit {
            tracing::debug!("Search #{generation} exceeds display limit {}", self.display_limit);
        }

        SearchOutcome { generation, status, hits, verses_scanned }
    }

    /// Deliver a report unless a newer search has started.
    fn report<S: ProgressSink + ?Sized>(&self, sink: &mut S, progress: SearchProgress) {
        if self.is_current(progress.generation) {
            sink.report(progress);
        }
    }
}

/// A search running on a blocking worker.
#[derive(Debug)]
pub struct SearchHandle {
    /// Generation of this search.
    pub generation: u64,
    /// Cancels the scan at the next verse boundary.
    pub cancel: CancellationToken,
    /// Resolves to the outcome once the scan ends.
    pub join: JoinHandle<SearchOutcome>,
}

impl SearchHandle {
    /// Request cancellation; partial hits are kept.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the search to end.
    pub async fn outcome(self) -> Result<SearchOutcome, tokio::task::JoinError> {
        self.join.await
    }
}

/// Book names that look like what the user may have meant by `query`.
///
/// Candidates are names that contain the query as a subsequence or whose
/// similarity reaches `threshold`; they are ranked by similarity, ties in
/// book order.
pub fn suggest_books<S: AsRef<str>>(query: &str, names: &[S], threshold: f64, limit: usize) -> Vec<BookMatch> {
    let needle = fold(query);
    if needle.is_empty() {
        return Vec::new();
    }
    let matcher = SkimMatcherV2::default();

    let mut suggestions: Vec<BookMatch> = names
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            let folded = fold(name.as_ref());
            let score = similarity(&needle, &folded);
            let subsequence = matcher.fuzzy_match(&folded, &needle).is_some();
            (subsequence || score >= threshold).then(|| BookMatch {
                book: BookIndex(idx),
                name: name.as_ref().to_string(),
                similarity: score,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    suggestions.truncate(limit);
    suggestions
}

//! `versenav` - look up a passage, or search when the input is not a reference.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use versenav::bible::{resolve_book, ReferenceResolver, ResolveContext, Resolution};
use versenav::config::Config;
use versenav::constants::{async_tasks::CHANNEL_BUFFER_SIZE, search::MAX_SUGGESTIONS};
use versenav::services::library::Library;
use versenav::services::scripture::{format_passage, passage, Corpus, InMemoryCorpus, Verse};
use versenav::services::search::{suggest_books, SearchEngine, SearchOutcome, SearchProgress, SearchStatus};
use versenav::types::{BookIndex, BookMatch, MatchSpan, Reference};

#[derive(Parser, Debug)]
#[command(name = "versenav", version, about = "Look up scripture passages or search verse text")]
struct Cli {
    /// Text to read (version abbreviation, e.g. KJV)
    #[arg(long = "version-id", short = 't')]
    version_id: Option<String>,

    /// Directory holding the text files
    #[arg(long)]
    corpus_dir: Option<PathBuf>,

    /// Book to read locus-only input ("3:16") against
    #[arg(long)]
    book: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Maximum number of search hits to print
    #[arg(long)]
    limit: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Reference or search text
    #[arg(required = true, num_args = 1..)]
    input: Vec<String>,
}

/// A passage as printed.
#[derive(Debug, Serialize)]
struct PassageView {
    version: String,
    reference: String,
    verses: Vec<Verse>,
}

/// One search hit as printed.
#[derive(Debug, Serialize)]
struct HitView {
    reference: String,
    text: String,
    highlight: MatchSpan,
}

/// Everything the command prints.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Output {
    Passage {
        passages: Vec<PassageView>,
    },
    Search {
        version: String,
        query: String,
        status: SearchStatus,
        total: usize,
        hits: Vec<HitView>,
        suggestions: Vec<BookMatch>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load()?;
    if let Some(dir) = cli.corpus_dir.clone() {
        config.corpus_dir = dir;
    }

    let library = Library::load_dir(&config.corpus_dir)
        .with_context(|| format!("loading texts from {}", config.corpus_dir.display()))?;
    let mut corpus = match cli.version_id.as_deref().or(config.default_version.as_deref()) {
        Some(version) => library.require(version)?,
        None => library.first().context("No texts found; add a .json text to the corpus directory")?,
    };
    tracing::info!(
        "{} {} reading {} ({})",
        config.app_name(),
        config.app_version(),
        corpus.abbreviation(),
        corpus.name()
    );

    let resolver = ReferenceResolver::new(config.resolver());
    let catalog = library.catalog();
    let current_book = cli
        .book
        .as_deref()
        .map(|name| book_index(name, corpus.as_ref(), config.confidence_threshold))
        .transpose()?;
    let ctx = ResolveContext { current_book, versions: &catalog };
    let input = cli.input.join(" ");
    // what a fallback search looks for; a version prefix is not part of it
    let mut query = input.clone();

    let mut compare: Option<Arc<InMemoryCorpus>> = None;
    let resolution = match resolver.resolve(&input, corpus.as_ref(), &ctx) {
        Ok(Resolution::VersionSwitch { version, compare_with, rest, .. }) => {
            corpus = library.require(&version)?;
            compare = compare_with.as_deref().map(|c| library.require(c)).transpose()?;
            if rest.is_empty() {
                println!("{} - {}", corpus.abbreviation(), corpus.name());
                return Ok(());
            }
            let resolved = resolver.resolve_after_switch(&rest, corpus.as_ref(), current_book);
            query = rest;
            resolved
        }
        other => other,
    };

    let engine = SearchEngine::new(config.display_limit);
    let limit = cli.limit.unwrap_or_else(|| engine.display_limit());

    let output = match resolution {
        Ok(Resolution::Reference(reference)) => {
            let mut passages = vec![passage_view(corpus.as_ref(), &reference)?];
            if let Some(other) = &compare {
                passages.push(passage_view(other.as_ref(), &reference)?);
            }
            Output::Passage { passages }
        }
        Ok(Resolution::Phrase(phrase)) => {
            search_output(&engine, &corpus, &phrase, Vec::new(), limit).await?
        }
        Ok(Resolution::Ambiguous { score, best_guess }) => {
            tracing::debug!("Searching instead (best book {best_guess:?} at {score:.3})");
            let suggestions = suggest_books(&query, corpus.book_names(), config.confidence_threshold, MAX_SUGGESTIONS);
            search_output(&engine, &corpus, &query, suggestions, limit).await?
        }
        Ok(Resolution::VersionSwitch { version, .. }) => {
            bail!("Version {version} given twice")
        }
        Err(e) if e.is_resolution_failure() => {
            tracing::debug!("Searching instead: {e}");
            search_output(&engine, &corpus, &query, Vec::new(), limit).await?
        }
        Err(e) => return Err(e.into()),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text(&output);
    }
    Ok(())
}

/// Resolve `--book` against the text's own book names.
fn book_index(name: &str, corpus: &InMemoryCorpus, threshold: f64) -> Result<BookIndex> {
    match resolve_book(name, corpus.book_names()) {
        Some(found) if found.similarity >= threshold => Ok(found.book),
        _ => bail!("No book like {name:?} in {}", corpus.abbreviation()),
    }
}

fn passage_view(corpus: &InMemoryCorpus, reference: &Reference) -> Result<PassageView> {
    Ok(PassageView {
        version: corpus.abbreviation().to_string(),
        reference: reference.display(corpus.book_names()),
        verses: passage(corpus, reference)?,
    })
}

/// Run a search on a worker; Ctrl-C cancels it and keeps what was found.
async fn search_output(
    engine: &SearchEngine,
    corpus: &Arc<InMemoryCorpus>,
    query: &str,
    suggestions: Vec<BookMatch>,
    limit: usize,
) -> Result<Output> {
    let (tx, mut rx) = mpsc::channel::<SearchProgress>(CHANNEL_BUFFER_SIZE);
    let handle = engine.spawn(Arc::clone(corpus), query, tx);

    let progress = tokio::spawn(async move {
        while let Some(p) = rx.recv().await {
            tracing::debug!("Search #{}: {} hits after {} verses", p.generation, p.hit_count, p.verses_scanned);
        }
    });
    let cancel = handle.cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let outcome: SearchOutcome = handle.outcome().await?;
    interrupt.abort();
    progress.await?;

    let names = corpus.book_names();
    Ok(Output::Search {
        version: corpus.abbreviation().to_string(),
        query: query.to_string(),
        status: outcome.status,
        total: outcome.hits.len(),
        hits: outcome
            .hits
            .iter()
            .take(limit)
            .map(|hit| HitView {
                reference: hit.reference.display(names),
                text: hit.verse_text.clone(),
                highlight: hit.span,
            })
            .collect(),
        suggestions,
    })
}

fn print_text(output: &Output) {
    match output {
        Output::Passage { passages } => {
            for p in passages {
                println!("{} ({})", p.reference, p.version);
                println!("{}", format_passage(&p.verses));
            }
        }
        Output::Search { version, query, status, total, hits, suggestions } => {
            for hit in hits {
                let start = hit.highlight.start;
                let end = start + hit.highlight.len;
                match (hit.text.get(..start), hit.text.get(start..end), hit.text.get(end..)) {
                    (Some(before), Some(matched), Some(after)) => {
                        println!("{}  {before}[{matched}]{after}", hit.reference);
                    }
                    _ => println!("{}  {}", hit.reference, hit.text),
                }
            }
            if *total > hits.len() {
                println!("... showing {} of {total} matches", hits.len());
            }
            if *status == SearchStatus::Canceled {
                println!("(search canceled)");
            }
            if hits.is_empty() {
                println!("No matches for {query:?} in {version}");
                if !suggestions.is_empty() {
                    let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
                    println!("Did you mean: {}?", names.join(", "));
                }
            }
        }
    }
}

//! Loaded texts, keyed by version abbreviation.
//!
//! A library directory holds one JSON file per text in the shape
//! [`InMemoryCorpus::from_json`] reads. Files that fail to load are skipped
//! with a warning so one bad file does not hide the rest.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use walkdir::WalkDir;

use crate::bible::{VersionCatalog, VersionInfo};
use crate::error::{Error, Result};
use crate::services::scripture::{Corpus, InMemoryCorpus};
use crate::utils::normalize::fold;

/// Extension of text files in a library directory
const TEXT_EXTENSION: &str = "json";

/// All texts available to the caller.
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// Texts in load order
    texts: Vec<Arc<InMemoryCorpus>>,
    /// Folded abbreviation → position in `texts`
    by_abbreviation: HashMap<String, usize>,
}

impl Library {
    /// Load every text file under `dir`, in path order.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::config(
                format!("Text directory {} not found", dir.display()),
                "Set VERSENAV_CORPUS_DIR or pass --corpus-dir",
            ));
        }

        let mut paths: Vec<_> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == TEXT_EXTENSION))
            .map(walkdir::DirEntry::into_path)
            .collect();
        paths.sort();

        let mut library = Self::default();
        for path in paths {
            let loaded = fs_err::read_to_string(&path)
                .map_err(|e| Error::io(e, path.clone()))
                .and_then(|json| {
                    InMemoryCorpus::from_json(&json).map_err(|e| match e {
                        Error::Parse { message, .. } => Error::parse(message, path.clone()),
                        other => other,
                    })
                });
            match loaded {
                Ok(corpus) => library.insert(corpus),
                Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
            }
        }

        tracing::info!("Loaded {} texts from {}", library.texts.len(), dir.display());
        Ok(library)
    }

    /// Add a text; a later text with the same abbreviation replaces the earlier.
    pub fn insert(&mut self, corpus: InMemoryCorpus) {
        let key = fold(corpus.abbreviation());
        let corpus = Arc::new(corpus);
        if let Some(&idx) = self.by_abbreviation.get(&key) {
            tracing::warn!("Duplicate text {}; keeping the later one", corpus.abbreviation());
            self.texts[idx] = corpus;
        } else {
            self.by_abbreviation.insert(key, self.texts.len());
            self.texts.push(corpus);
        }
    }

    /// Number of loaded texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether no texts are loaded.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Text with the given abbreviation (case-insensitive).
    pub fn get(&self, abbreviation: &str) -> Option<Arc<InMemoryCorpus>> {
        let idx = *self.by_abbreviation.get(&fold(abbreviation))?;
        self.texts.get(idx).map(Arc::clone)
    }

    /// Text with the given abbreviation, or [`Error::UnknownVersion`].
    pub fn require(&self, abbreviation: &str) -> Result<Arc<InMemoryCorpus>> {
        self.get(abbreviation)
            .ok_or_else(|| Error::UnknownVersion(abbreviation.to_string()))
    }

    /// The first loaded text.
    pub fn first(&self) -> Option<Arc<InMemoryCorpus>> {
        self.texts.first().map(Arc::clone)
    }

    /// Versions a version prefix may switch to.
    pub fn catalog(&self) -> VersionCatalog {
        VersionCatalog::new(
            self.texts
                .iter()
                .map(|t| VersionInfo::new(t.abbreviation(), t.name()))
                .collect(),
        )
    }
}

//! Scripture reference parsing and resolution.
//!
//! Input flows through [`tokenizer`], then [`reference`] picks out a book
//! token (matched by [`books`]) and up to two loci (parsed by [`locus`]).

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::utils::normalize::fold;

pub mod books;
pub mod locus;
pub mod reference;
pub mod tokenizer;

pub use books::resolve_book;
pub use locus::{looks_like_chapter_verse, parse as parse_locus};
pub use reference::{ReferenceResolver, ResolveContext, Resolution, ResolverConfig};
pub use tokenizer::tokenize;

lazy_static! {
    /// Alternate spellings of common version abbreviations (folded → canonical).
    static ref VERSION_ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("av", "KJV");
        m.insert("authorized", "KJV");
        m.insert("kingjames", "KJV");
        m.insert("nrsvu", "NRSVue");
        m.insert("nrsv-ue", "NRSVue");
        m.insert("niv-uk", "NIVUK");
        m.insert("anglicised", "NIVUK");
        m.insert("rvr", "RVR1960");
        m.insert("reina-valera", "RVR1960");
        m.insert("segond", "LSG");
        m.insert("louis-segond", "LSG");
        m.insert("luther", "LUT");
        m.insert("elberfelder", "ELB");
        m.insert("vulgate", "VUL");
        m.insert("vulgata", "VUL");
        m
    };
}

/// A loaded text's identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VersionInfo {
    /// Short code (e.g., "KJV", "NRSVue").
    pub abbreviation: String,
    /// Full name (e.g., "King James Version").
    pub name: String,
}

impl VersionInfo {
    /// Create a new version entry.
    pub fn new(abbreviation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            name: name.into(),
        }
    }
}

/// The versions a caller can switch between.
#[derive(Debug, Clone, Default)]
pub struct VersionCatalog {
    versions: Vec<VersionInfo>,
}

impl VersionCatalog {
    /// Create a catalog from loaded versions.
    pub const fn new(versions: Vec<VersionInfo>) -> Self {
        Self { versions }
    }

    /// Known versions in load order.
    pub fn versions(&self) -> &[VersionInfo] {
        &self.versions
    }

    /// Whether no versions are known.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Find a version by abbreviation, or by an alias of one.
    pub fn lookup(&self, token: &str) -> Option<&VersionInfo> {
        let folded = fold(token);
        if folded.is_empty() {
            return None;
        }
        self.find(&folded).or_else(|| {
            let canonical = VERSION_ALIASES.get(folded.as_str())?;
            self.find(&fold(canonical))
        })
    }

    fn find(&self, folded: &str) -> Option<&VersionInfo> {
        self.versions.iter().find(|v| fold(&v.abbreviation) == folded)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn catalog() -> VersionCatalog {
        VersionCatalog::new(vec![
            VersionInfo::new("KJV", "King James Version"),
            VersionInfo::new("NRSVue", "New Revised Standard Version Updated Edition"),
            VersionInfo::new("LSG", "Louis Segond 1910"),
        ])
    }

    #[test]
    fn lookup_by_abbreviation_ignores_case() {
        let c = catalog();
        assert_eq!(c.lookup("kjv").unwrap().abbreviation, "KJV");
        assert_eq!(c.lookup("NRSVUE").unwrap().abbreviation, "NRSVue");
    }

    #[test]
    fn lookup_by_alias() {
        let c = catalog();
        assert_eq!(c.lookup("AV").unwrap().abbreviation, "KJV");
        assert_eq!(c.lookup("Ségond").unwrap().abbreviation, "LSG");
    }

    #[test]
    fn alias_to_unloaded_version_misses() {
        let c = catalog();
        assert!(c.lookup("luther").is_none());
        assert!(c.lookup("John").is_none());
        assert!(c.lookup("").is_none());
    }
}

//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::bible::ResolverConfig;
use crate::constants::{resolver, search};
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Directory holding the text files
    pub corpus_dir: PathBuf,
    /// Abbreviation of the text to open by default
    pub default_version: Option<String>,
    /// Minimum book similarity to treat input as a reference
    pub confidence_threshold: f64,
    /// Maximum tokens read from one input
    pub max_tokens: usize,
    /// Hit count above which search results are "too many" to show
    pub display_limit: usize,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Resolver tunables from this configuration.
    pub const fn resolver(&self) -> ResolverConfig {
        ResolverConfig {
            confidence_threshold: self.confidence_threshold,
            max_tokens: self.max_tokens,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            corpus_dir: default_corpus_dir(),
            default_version: None,
            confidence_threshold: resolver::CONFIDENCE_THRESHOLD,
            max_tokens: resolver::MAX_TOKENS,
            display_limit: search::DISPLAY_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = var("VERSENAV_CORPUS_DIR") {
            config.corpus_dir = PathBuf::from(shellexpand::tilde(&path).to_string());
        }

        config.default_version = var("VERSENAV_VERSION").filter(|v| !v.trim().is_empty());

        if let Some(raw) = var("VERSENAV_CONFIDENCE") {
            let threshold = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| (0.0..=1.0).contains(t))
                .ok_or_else(|| {
                    Error::config(
                        format!("VERSENAV_CONFIDENCE={raw} is not a number in [0, 1]"),
                        "Use a value like 0.25",
                    )
                })?;
            config.confidence_threshold = threshold;
        }

        // Counts fall back to defaults when unparseable
        if let Some(tokens) = var("VERSENAV_MAX_TOKENS").and_then(|v| v.trim().parse::<usize>().ok()) {
            config.max_tokens = tokens.max(1);
        }
        if let Some(limit) = var("VERSENAV_DISPLAY_LIMIT").and_then(|v| v.trim().parse::<usize>().ok()) {
            config.display_limit = limit;
        }

        Ok(config)
    }
}

/// Platform data directory for texts, e.g. `~/.local/share/versenav`.
fn default_corpus_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("texts"), |d| d.join("versenav"))
}

//! `versenav` - scripture reference resolution and verse search.
//!
//! Free-form input such as "2 Cor 5:17", "Jn3 16" or "Genesis1" is resolved
//! against the book names of whichever text is loaded. Input that is not a
//! confident reference falls back to a case- and accent-insensitive verse
//! search.

pub mod bible;
pub mod config;
pub mod constants;
pub mod error;
pub mod services;
pub mod types;
pub mod utils;

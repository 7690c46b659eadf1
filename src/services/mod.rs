//! Services that operate on loaded texts.
//!
//! Passage lookup, the text library, and verse search live here; the
//! parsing and resolution they build on is in [`crate::bible`].

pub mod library;
pub mod scripture;
pub mod search;

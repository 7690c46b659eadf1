//! Application constants.
//!
//! Centralizes tunable defaults so configuration and tests agree on them.

/// Reference resolution constants.
pub mod resolver {
    /// Maximum number of tokens considered from a single input.
    pub const MAX_TOKENS: usize = 10;

    /// Minimum book-name similarity to commit to a reference.
    pub const CONFIDENCE_THRESHOLD: f64 = 0.25;

    /// Characters that separate chapter from verse.
    pub const CHAPTER_SEPARATORS: [char; 2] = [':', '.'];

    /// Characters that separate a verse from its end verse.
    pub const RANGE_SEPARATORS: [char; 2] = ['-', '+'];

    /// Labels stripped from the front of reading lists.
    pub const READING_LABELS: [&str; 3] = ["Scripture Reading:", "Scripture:", "Reading:"];
}

/// Search constants.
pub mod search {
    /// Result count above which a front end should suggest narrowing the query.
    pub const DISPLAY_LIMIT: usize = 500;

    /// Maximum number of book-name suggestions offered for a query.
    pub const MAX_SUGGESTIONS: usize = 5;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for search progress snapshots.
    pub const CHANNEL_BUFFER_SIZE: usize = 64;
}

//! Text utilities shared across resolution and search.

pub mod normalize;
pub mod similarity;

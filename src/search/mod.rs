//! Relevance search over in-memory candidate sets.
//!
//! This module provides tokenization, edit-distance similarity, per-field matching
//! and weighted multi-field ranking. Nothing is indexed between calls: callers
//! hand over the full candidate set each time.

pub(crate) mod distance;
pub(crate) mod matcher;
pub(crate) mod ranker;
pub(crate) mod tokenize;

pub use matcher::match_score;
pub use ranker::{Ranker, ScoredResult, SearchOptions, search};

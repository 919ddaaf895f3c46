//! Client-side relevance search for an academic materials catalog.
//!
//! - [`search::match_score`] grades a query against one text field.
//! - [`search::Ranker`] ranks whole records by their best weighted field plus a
//!   popularity boost.
//! - [`browse::filter_and_sort`] layers facet filters and sort keys on top.
//! - [`autocomplete::AutocompleteSession`] drives a search box with live
//!   suggestions and persisted recent searches.

pub mod autocomplete;
pub mod browse;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod record;
pub mod search;
pub mod tracing;

pub use record::{CatalogRecord, Field, Material, MaterialType, SearchableRecord};
pub use search::{Ranker, ScoredResult, SearchOptions, match_score, search};

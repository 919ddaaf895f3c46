//! Catalog browsing: relevance search combined with categorical filters and sorting.
//!
//! [`filter_and_sort`] runs the ranker first, then narrows by facet selections, then
//! orders the survivors. A non-relevance sort key never throws relevance away: it
//! becomes the tiebreaker behind the requested key.

use crate::record::CatalogRecord;
use crate::search::{Ranker, ScoredResult};
use ahash::AHashMap;
use std::cmp::Ordering;

/// Items per page on the browse screen.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// An equality filter on one categorical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Facet {
    /// No filtering.
    #[default]
    Any,
    /// Keep only records whose field equals this value exactly.
    Only(String),
}

impl Facet {
    /// Interprets a menu selection. Empty selections, `all`, and `All …` labels
    /// such as `All Departments` mean no filtering.
    pub fn from_selection(selection: &str) -> Self {
        let selection = selection.trim();
        let lower = selection.to_ascii_lowercase();
        if selection.is_empty() || lower == "all" || lower.starts_with("all ") {
            Self::Any
        } else {
            Self::Only(selection.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl From<&str> for Facet {
    fn from(selection: &str) -> Self {
        Self::from_selection(selection)
    }
}

/// Requested result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Ranker order when searching, input order otherwise.
    #[default]
    Relevance,
    Newest,
    Oldest,
    Popular,
    /// Case-insensitive A-Z.
    Title,
    /// Any unrecognized key. Leaves the order untouched.
    Unordered,
}

impl From<&str> for SortKey {
    fn from(key: &str) -> Self {
        match key.trim() {
            "" | "relevance" => Self::Relevance,
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "popular" => Self::Popular,
            "title" => Self::Title,
            _ => Self::Unordered,
        }
    }
}

impl SortKey {
    fn compare<T: CatalogRecord>(self, a: &T, b: &T) -> Ordering {
        match self {
            Self::Newest => b.year().cmp(&a.year()),
            Self::Oldest => a.year().cmp(&b.year()),
            Self::Popular => b.popularity().cmp(&a.popularity()),
            Self::Title => title_order(a.title(), b.title()),
            Self::Relevance | Self::Unordered => Ordering::Equal,
        }
    }
}

fn title_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Browse screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilters {
    pub search_query: String,
    pub category: Facet,
    /// Compared against the decimal rendering of the record's year.
    pub year: Facet,
    /// Compared against the record's type slug.
    pub kind: Facet,
    pub sort_by: SortKey,
}

impl BrowseFilters {
    fn admits<T: CatalogRecord>(&self, record: &T) -> bool {
        self.category.matches(record.category())
            && self.year.matches(&record.year().to_string())
            && self.kind.matches(record.kind())
    }
}

/// Searches, filters and orders `records` with the default ranker.
pub fn filter_and_sort<'a, T: CatalogRecord>(records: &'a [T], filters: &BrowseFilters) -> Vec<&'a T> {
    filter_and_sort_with(&Ranker::default(), records, filters)
}

/// Searches, filters and orders `records`.
///
/// - Blank query: every record passes the search step with score 1, so the sort key
///   alone decides the order.
/// - Query with [`SortKey::Relevance`] or an unknown key: ranker order.
/// - Query with any other key: that key first, descending relevance second.
pub fn filter_and_sort_with<'a, T: CatalogRecord>(
    ranker: &Ranker,
    records: &'a [T],
    filters: &BrowseFilters,
) -> Vec<&'a T> {
    let mut results: Vec<ScoredResult<'a, T>> = ranker
        .search(records, &filters.search_query, &ranker.default_options())
        .into_iter()
        .filter(|result| filters.admits(result.record))
        .collect();

    if !matches!(filters.sort_by, SortKey::Relevance | SortKey::Unordered) {
        results.sort_by(|a, b| {
            filters
                .sort_by
                .compare(a.record, b.record)
                .then_with(|| b.score.total_cmp(&a.score))
        });
    }

    tracing::debug!(
        "Browse kept {} of {} records (sort {:?})",
        results.len(),
        records.len(),
        filters.sort_by
    );

    results.into_iter().map(|result| result.record).collect()
}

/// One page of a result list.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number after clamping.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices out page `page` (1-based). Out-of-range page numbers are clamped to the
/// nearest valid page.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let number = page.clamp(1, total_pages.max(1));

    let start = ((number - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());

    Page {
        items: &items[start..end],
        number,
        total_pages,
        total_items: items.len(),
    }
}

/// Record count per category, most common first, then by name.
pub fn category_counts<T: CatalogRecord>(records: &[T]) -> Vec<(String, usize)> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for record in records {
        *counts.entry(record.category()).or_insert(0) += 1;
    }

    let mut counts: Vec<_> = counts
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect();
    counts.sort_by(|(a_name, a_count), (b_name, b_count)| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });
    counts
}

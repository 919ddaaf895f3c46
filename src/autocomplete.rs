//! Live search-box state: suggestions while typing, recent searches otherwise.
//!
//! An [`AutocompleteSession`] owns the candidate pool, the current query, the last
//! ranked suggestions and the recent-search history. History is loaded from and
//! written back to an injected [`HistoryStore`] on every commit.

use crate::config::{AutocompleteConfig, SearchConfig};
use crate::history::{HistoryStore, RecentSearches};
use crate::record::{Field, SearchableRecord};
use crate::search::{Ranker, ScoredResult, SearchOptions};
use std::borrow::Cow;

/// What the dropdown under the search box should show.
#[derive(Debug)]
pub enum Dropdown<'a, T> {
    /// Short query and no history: nothing to show.
    Hidden,
    /// Short query: recent searches, most recent first.
    Recent(&'a [String]),
    /// Ranked suggestions for the current query.
    Suggestions(Vec<ScoredResult<'a, T>>),
    /// The query is long enough to search but nothing matched.
    NoResults { query: &'a str },
}

/// A committed search handed back to the host for navigation.
#[derive(Debug, PartialEq, Eq)]
pub enum Commit<'a, T> {
    /// A typed or recalled query string, trimmed.
    Query(String),
    /// A suggestion the user picked.
    Record(&'a T),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Suggestion {
    index: usize,
    score: f64,
}

/// Candidate wrapper that remembers its position in the pool.
struct Indexed<'a, T> {
    index: usize,
    record: &'a T,
}

impl<T: SearchableRecord> SearchableRecord for Indexed<'_, T> {
    fn field_text(&self, field: Field) -> Cow<'_, str> {
        self.record.field_text(field)
    }

    fn popularity(&self) -> u64 {
        self.record.popularity()
    }
}

/// State behind one search box.
///
/// Queries of at least `min_query_len` characters are ranked against the candidate
/// pool and cut to the configured limit; shorter ones show recent searches. Each
/// commit moves the term to the front of history and writes it to the store.
#[derive(Debug)]
pub struct AutocompleteSession<T, S> {
    store: S,
    ranker: Ranker,
    config: AutocompleteConfig,
    candidates: Vec<T>,
    query: String,
    suggestions: Vec<Suggestion>,
    recent: RecentSearches,
    selected: Option<usize>,
}

impl<T: SearchableRecord, S: HistoryStore> AutocompleteSession<T, S> {
    /// Starts a session, loading recent searches from `store`.
    ///
    /// A store that fails or holds garbage yields an empty history.
    pub fn open(store: S, config: &SearchConfig) -> Self {
        let capacity = config.autocomplete.history_capacity;
        let recent = match store.get() {
            Ok(Some(payload)) => RecentSearches::from_payload(&payload, capacity),
            Ok(None) => RecentSearches::new(capacity),
            Err(e) => {
                tracing::warn!("Failed to load recent searches: {}", e);
                RecentSearches::new(capacity)
            }
        };

        Self {
            store,
            ranker: Ranker::new(config),
            config: config.autocomplete,
            candidates: Vec::new(),
            query: String::new(),
            suggestions: Vec::new(),
            recent,
            selected: None,
        }
    }

    /// Replaces the candidate pool and re-ranks the current query against it.
    pub fn set_candidates(&mut self, candidates: Vec<T>) {
        self.candidates = candidates;
        self.selected = None;
        self.refresh();
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    /// Updates the live query and recomputes suggestions.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected = None;
        self.refresh();
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// True while the trimmed query is too short to search. A blank query is
    /// always too short.
    pub fn shows_recent(&self) -> bool {
        let len = self.query.trim().chars().count();
        len == 0 || len < self.config.min_query_len
    }

    fn refresh(&mut self) {
        self.suggestions.clear();
        if self.shows_recent() {
            return;
        }

        let pool: Vec<_> = self
            .candidates
            .iter()
            .enumerate()
            .map(|(index, record)| Indexed { index, record })
            .collect();
        let options = SearchOptions {
            min_score: self.config.min_score,
            limit: Some(self.config.limit),
        };

        self.suggestions = self
            .ranker
            .search(&pool, &self.query, &options)
            .into_iter()
            .map(|result| Suggestion {
                index: result.record.index,
                score: result.score,
            })
            .collect();

        tracing::trace!(
            "{} suggestions for {:?}",
            self.suggestions.len(),
            self.query
        );
    }

    /// Current suggestions, best first. Empty while [`shows_recent`](Self::shows_recent).
    pub fn suggestions(&self) -> Vec<ScoredResult<'_, T>> {
        self.suggestions
            .iter()
            .map(|s| ScoredResult {
                record: &self.candidates[s.index],
                score: s.score,
            })
            .collect()
    }

    pub fn recent_searches(&self) -> &[String] {
        self.recent.entries()
    }

    pub fn view(&self) -> Dropdown<'_, T> {
        if self.shows_recent() {
            if self.recent.is_empty() {
                Dropdown::Hidden
            } else {
                Dropdown::Recent(self.recent.entries())
            }
        } else if self.suggestions.is_empty() {
            Dropdown::NoResults {
                query: self.query.trim(),
            }
        } else {
            Dropdown::Suggestions(self.suggestions())
        }
    }

    fn visible_len(&self) -> usize {
        if self.shows_recent() {
            self.recent.len()
        } else {
            self.suggestions.len()
        }
    }

    /// Highlighted dropdown row, if any.
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Moves the highlight down, stopping at the last visible row.
    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(len - 1)));
    }

    /// Moves the highlight up; moving past the first row clears it.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.and_then(|i| i.checked_sub(1));
    }

    /// Commits the highlighted row, or the typed query when nothing is highlighted.
    pub fn submit(&mut self) -> Option<Commit<'_, T>> {
        match self.selected {
            Some(row) if self.shows_recent() => {
                let term = self.recent.entries().get(row)?.clone();
                self.commit_query(&term)
            }
            Some(row) => self.select_suggestion(row),
            None => {
                let term = self.query.clone();
                self.commit_query(&term)
            }
        }
    }

    /// Records `term` in history and clears the live query.
    ///
    /// Blank terms commit nothing.
    pub fn commit_query(&mut self, term: &str) -> Option<Commit<'_, T>> {
        let term = term.trim();
        if !self.recent.push(term) {
            return None;
        }
        self.persist();
        self.clear_query();
        Some(Commit::Query(term.to_string()))
    }

    /// Picks the suggestion at `position`, recording its title in history.
    pub fn select_suggestion(&mut self, position: usize) -> Option<Commit<'_, T>> {
        let index = self.suggestions.get(position)?.index;
        let title = self.candidates[index].field_text(Field::Title).into_owned();
        if self.recent.push(&title) {
            self.persist();
        }
        self.clear_query();
        Some(Commit::Record(&self.candidates[index]))
    }

    /// Forgets every recent search, in memory and in the store.
    pub fn clear_history(&mut self) {
        self.recent.clear();
        self.selected = None;
        if let Err(e) = self.store.remove() {
            tracing::warn!("Failed to clear recent searches: {}", e);
        }
    }

    fn persist(&self) {
        let result = self
            .recent
            .to_payload()
            .and_then(|payload| self.store.set(&payload));
        if let Err(e) = result {
            tracing::warn!("Failed to save recent searches: {}", e);
        }
    }
}

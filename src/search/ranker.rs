//! Weighted multi-field ranking over a caller-supplied candidate set.

use super::matcher::match_score;
use crate::config::{FieldWeights, SearchConfig};
use crate::record::{Field, SearchableRecord};

/// Knobs for a single [`Ranker::search`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Results scoring below this are dropped.
    pub min_score: f64,
    /// Keep at most this many results after sorting.
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_score: 0.1,
            limit: None,
        }
    }
}

impl SearchOptions {
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub const fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }
}

/// A record paired with its relevance.
///
/// Scores live in `[0, 1.1]`: the popularity boost can lift a perfect match above 1.
#[derive(Debug)]
pub struct ScoredResult<'a, T> {
    pub record: &'a T,
    pub score: f64,
}

impl<T> Clone for ScoredResult<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ScoredResult<'_, T> {}

/// Scores records by their best weighted field plus a capped popularity boost.
///
/// Holds only configuration; every call rescans the records it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranker {
    weights: FieldWeights,
    popularity_divisor: f64,
    popularity_cap: f64,
    min_score: f64,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl Ranker {
    pub const fn new(config: &SearchConfig) -> Self {
        Self {
            weights: config.weights,
            popularity_divisor: config.popularity_divisor,
            popularity_cap: config.popularity_cap,
            min_score: config.min_score,
        }
    }

    /// Options carrying the configured threshold and no limit.
    pub const fn default_options(&self) -> SearchOptions {
        SearchOptions {
            min_score: self.min_score,
            limit: None,
        }
    }

    /// Boost for a popularity count: `min(popularity / divisor, cap)`.
    pub fn popularity_boost(&self, popularity: u64) -> f64 {
        if self.popularity_divisor <= 0.0 {
            return 0.0;
        }
        (popularity as f64 / self.popularity_divisor).min(self.popularity_cap)
    }

    /// Relevance of one record: the maximum weighted field score plus the popularity
    /// boost. Fields do not stack.
    pub fn score<T: SearchableRecord>(&self, record: &T, query: &str) -> f64 {
        let best_field = Field::ALL
            .iter()
            .map(|&field| match_score(query, &record.field_text(field)) * self.weights.weight(field))
            .fold(0.0, f64::max);

        best_field + self.popularity_boost(record.popularity())
    }

    /// Ranks `records` against `query`, best first.
    ///
    /// A blank query is a pass-through: every record comes back with score 1 in
    /// input order, ignoring the threshold and limit. Otherwise records scoring below
    /// `options.min_score` are dropped, the rest are stable-sorted by descending
    /// score and truncated to `options.limit`.
    pub fn search<'a, T: SearchableRecord>(
        &self,
        records: &'a [T],
        query: &str,
        options: &SearchOptions,
    ) -> Vec<ScoredResult<'a, T>> {
        if query.trim().is_empty() {
            return records
                .iter()
                .map(|record| ScoredResult { record, score: 1.0 })
                .collect();
        }

        let mut results: Vec<_> = records
            .iter()
            .map(|record| ScoredResult {
                record,
                score: self.score(record, query),
            })
            .filter(|result| result.score >= options.min_score)
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        if let Some(limit) = options.limit {
            results.truncate(limit);
        }

        tracing::debug!(
            "Ranked {} of {} candidates for {:?} (min_score {}, limit {:?})",
            results.len(),
            records.len(),
            query,
            options.min_score,
            options.limit
        );

        results
    }
}

/// Ranks `records` with the default field weights and popularity boost.
pub fn search<'a, T: SearchableRecord>(
    records: &'a [T],
    query: &str,
    options: &SearchOptions,
) -> Vec<ScoredResult<'a, T>> {
    Ranker::default().search(records, query, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Material, MaterialType};
    use assert2::check;
    use rstest::{fixture, rstest};

    fn material(id: &str, title: &str, author: &str, department: &str, downloads: u64) -> Material {
        Material {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            kind: MaterialType::Book,
            department: department.to_string(),
            year: 2020,
            description: String::new(),
            downloads,
        }
    }

    #[fixture]
    fn shelf() -> Vec<Material> {
        vec![
            material("1", "Organic Chemistry", "Paula Bruice", "Chemistry", 0),
            material("2", "Registered Nursing Handbook", "Ann Lee", "Nursing", 0),
            material("3", "Fundamentals of Nursing", "Patricia Potter", "Nursing", 0),
            material("4", "Calculus Early Transcendentals", "James Stewart", "Mathematics", 0),
            material("5", "Linear Algebra Done Right", "Sheldon Axler", "Mathematics", 0),
        ]
    }

    fn ids<'a>(results: &[ScoredResult<'a, Material>]) -> Vec<&'a str> {
        results.iter().map(|r| r.record.id.as_str()).collect()
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_query_passes_everything_through(shelf: Vec<Material>, #[case] query: &str) {
        let options = SearchOptions::default().with_limit(2).with_min_score(5.0);
        let results = search(&shelf, query, &options);
        check!(ids(&results) == vec!["1", "2", "3", "4", "5"]);
        check!(results.iter().all(|r| r.score == 1.0));
    }

    #[test]
    fn test_no_candidates() {
        let empty: Vec<Material> = Vec::new();
        check!(search(&empty, "anything", &SearchOptions::default()).is_empty());
    }

    #[rstest]
    fn test_unmatched_query_is_empty(shelf: Vec<Material>) {
        check!(search(&shelf, "zzqx", &SearchOptions::default()).is_empty());
    }

    #[rstest]
    fn test_results_sorted_descending(shelf: Vec<Material>) {
        let results = search(&shelf, "nursing", &SearchOptions::default().with_min_score(0.0));
        check!(!results.is_empty());
        check!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[rstest]
    fn test_ties_keep_input_order(shelf: Vec<Material>) {
        // both nursing titles score 0.95 on the title phrase
        let results = search(&shelf, "nursing", &SearchOptions::default());
        check!(ids(&results) == vec!["2", "3"]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.3)]
    #[case(0.9)]
    fn test_threshold_is_respected(shelf: Vec<Material>, #[case] min_score: f64) {
        let options = SearchOptions::default().with_min_score(min_score);
        for query in ["nursing", "algebra", "calculas", "chem"] {
            let results = search(&shelf, query, &options);
            check!(results.iter().all(|r| r.score >= min_score));
        }
    }

    #[rstest]
    fn test_limit_keeps_top_results(shelf: Vec<Material>) {
        let options = SearchOptions::default().with_min_score(0.0);
        let all = search(&shelf, "mathematics nursing", &options);
        let top = search(&shelf, "mathematics nursing", &options.with_limit(2));
        check!(top.len() <= 2);
        check!(ids(&top) == ids(&all[..top.len()]));
    }

    #[rstest]
    fn test_limit_zero_returns_nothing(shelf: Vec<Material>) {
        check!(search(&shelf, "nursing", &SearchOptions::default().with_limit(0)).is_empty());
    }

    #[test]
    fn test_best_field_wins_without_stacking() {
        let records = vec![material("1", "Nursing", "Nursing", "Nursing", 0)];
        let results = search(&records, "nursing", &SearchOptions::default());
        check!(results.len() == 1);
        check!(results[0].score == 1.0);
    }

    #[test]
    fn test_author_match_is_weighted() {
        let records = vec![material("1", "Physics", "James Stewart", "Science", 0)];
        let results = search(&records, "james stewart", &SearchOptions::default());
        check!(results.len() == 1);
        check!((results[0].score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_type_label_uses_spaced_label() {
        let mut note = material("1", "Week 3", "Staff", "Biology", 0);
        note.kind = MaterialType::LectureNote;
        let records = [note];
        let results = search(&records, "lecture note", &SearchOptions::default());
        check!(results.len() == 1);
        check!((results[0].score - 0.3).abs() < 1e-9);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(5, 0.05)]
    #[case(10, 0.1)]
    #[case(5000, 0.1)]
    fn test_popularity_boost_is_capped(#[case] popularity: u64, #[case] expected: f64) {
        check!((Ranker::default().popularity_boost(popularity) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_popularity_is_monotonic() {
        let ranker = Ranker::default();
        let mut previous = f64::MIN;
        for downloads in [0, 1, 3, 9, 10, 50, 999] {
            let record = material("1", "Organic Chemistry", "Bruice", "Chemistry", downloads);
            let score = ranker.score(&record, "chemistry");
            check!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_popularity_can_exceed_one() {
        let records = vec![material("1", "Anatomy", "Gray", "Medicine", 40)];
        let results = search(&records, "anatomy", &SearchOptions::default());
        check!((results[0].score - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_popular_record_outranks_tie() {
        let records = vec![
            material("quiet", "Fundamentals of Nursing", "A", "Health", 0),
            material("popular", "Fundamentals of Nursing", "B", "Health", 7),
        ];
        let results = search(&records, "nursing", &SearchOptions::default());
        check!(ids(&results) == vec!["popular", "quiet"]);
    }

    #[test]
    fn test_configured_weights_apply() {
        let mut config = SearchConfig::default();
        config.weights.author = 0.2;
        let ranker = Ranker::new(&config);
        let record = material("1", "Physics", "James Stewart", "Science", 0);
        check!((ranker.score(&record, "james stewart") - 0.2).abs() < 1e-9);
        check!(ranker.default_options().min_score == 0.1);
    }
}

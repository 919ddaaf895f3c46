//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `catalog`: a small mixed catalog spanning departments, years and types
//! - `history_file`: a temp directory holding a file-backed recent-search store

#![allow(dead_code)] // Helpers are used across different integration test crates

use material_search::history::FileHistoryStore;
use material_search::{Material, MaterialType};
use rstest::fixture;
use tempfile::TempDir;

/// Builds a material with an empty description.
pub fn material(
    id: &str,
    title: &str,
    kind: MaterialType,
    department: &str,
    year: i32,
    downloads: u64,
) -> Material {
    Material {
        id: id.to_string(),
        title: title.to_string(),
        author: "Staff".to_string(),
        kind,
        department: department.to_string(),
        year,
        description: String::new(),
        downloads,
    }
}

/// Record ids in order.
pub fn ids<'a>(materials: impl IntoIterator<Item = &'a Material>) -> Vec<&'a str> {
    materials.into_iter().map(|m| m.id.as_str()).collect()
}

#[fixture]
pub fn catalog() -> Vec<Material> {
    let mut catalog = vec![
        material("anatomy", "Human Anatomy and Physiology", MaterialType::Book, "Nursing", 2021, 4),
        material("fundamentals", "Fundamentals of Nursing", MaterialType::Book, "Nursing", 2019, 30),
        material("pharm-notes", "Pharmacology Lecture 3", MaterialType::LectureNote, "Nursing", 2023, 2),
        material("calculus", "Calculus Early Transcendentals", MaterialType::Book, "Mathematics", 2020, 12),
        material("algebra-paper", "Linear Algebra Final Exam", MaterialType::PastPaper, "Mathematics", 2022, 0),
        material("stats-video", "Statistics for Nurses", MaterialType::Tutorial, "Mathematics", 2024, 8),
        material("chemistry", "Organic Chemistry", MaterialType::Book, "Chemistry", 2018, 0),
    ];
    catalog[3].author = "James Stewart".to_string();
    catalog[6].description = "Reaction mechanisms and nursing pharmacology basics".to_string();
    catalog
}

/// A temp directory with a history store inside it; the directory lives as long as
/// the fixture.
pub struct HistoryFile {
    _dir: TempDir,
    pub store: FileHistoryStore,
}

#[fixture]
pub fn history_file() -> HistoryFile {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let store = FileHistoryStore::new(dir.path().join("recent-searches.json"));
    HistoryFile { _dir: dir, store }
}

//! Searchable record shapes.
//!
//! The engine never owns or mutates records. It reads text fields through
//! [`SearchableRecord`] and, for browsing, the categorical fields exposed by
//! [`CatalogRecord`]. [`Material`] is the concrete record used by the binary.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Text fields that take part in relevance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Description,
    Category,
    TypeLabel,
}

impl Field {
    /// Every scored field, in weight order of the default configuration.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Author,
        Self::Category,
        Self::Description,
        Self::TypeLabel,
    ];
}

/// A record the ranker can score.
pub trait SearchableRecord {
    /// Text of the given field. Absent text is the empty string.
    fn field_text(&self, field: Field) -> Cow<'_, str>;

    /// Download or view count used for the popularity boost.
    fn popularity(&self) -> u64;
}

/// A record that can also be filtered and ordered on the browse screen.
pub trait CatalogRecord: SearchableRecord {
    fn title(&self) -> &str;
    fn category(&self) -> &str;
    fn year(&self) -> i32;
    /// Machine-readable type slug, e.g. `lecture-note`.
    fn kind(&self) -> &str;
}

/// Kind of academic material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialType {
    Book,
    #[serde(alias = "lecture_note")]
    LectureNote,
    #[serde(alias = "past_paper")]
    PastPaper,
    Tutorial,
}

impl MaterialType {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::LectureNote => "lecture-note",
            Self::PastPaper => "past-paper",
            Self::Tutorial => "tutorial",
        }
    }

    /// Human-readable label, the slug with its hyphen replaced by a space.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::LectureNote => "lecture note",
            Self::PastPaper => "past paper",
            Self::Tutorial => "tutorial",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

fn default_author() -> String {
    "Unknown Author".to_string()
}

/// Calendar year of the current UTC date.
fn current_year() -> i32 {
    let days = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() / 86_400);
    year_from_unix_days(i64::try_from(days).unwrap_or(0))
}

/// Gregorian year containing the given day, counted from 1970-01-01.
fn year_from_unix_days(days: i64) -> i32 {
    // Shift to an era starting on 0000-03-01 so leap days fall at the end of a year
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    // March-based months 10 and 11 are January and February of the next year
    let year = year_of_era + era * 400 + i64::from(month_index >= 10);
    i32::try_from(year).unwrap_or(i32::MAX)
}

/// An approved item in the materials catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub title: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    /// Department or program the material belongs to.
    pub department: String,
    /// Publication year. Rows without one are dated to the current year.
    #[serde(default = "current_year")]
    pub year: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "download_count")]
    pub downloads: u64,
}

impl SearchableRecord for Material {
    fn field_text(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Title => Cow::Borrowed(&self.title),
            Field::Author => Cow::Borrowed(&self.author),
            Field::Description => Cow::Borrowed(&self.description),
            Field::Category => Cow::Borrowed(&self.department),
            Field::TypeLabel => Cow::Borrowed(self.kind.label()),
        }
    }

    fn popularity(&self) -> u64 {
        self.downloads
    }
}

impl CatalogRecord for Material {
    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> &str {
        &self.department
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn kind(&self) -> &str {
        self.kind.slug()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[test]
    fn test_material_defaults_for_missing_fields() {
        let json = r#"{
            "id": "m1",
            "title": "Anatomy Atlas",
            "type": "book",
            "department": "Nursing",
            "year": 2021
        }"#;
        let_assert!(Ok(material) = serde_json::from_str::<Material>(json));
        check!(material.author == "Unknown Author");
        check!(material.description.is_empty());
        check!(material.downloads == 0);
        check!(material.field_text(Field::Description) == "");
    }

    #[test]
    fn test_storage_spellings_are_accepted() {
        let json = r#"{
            "id": "m2",
            "title": "Midterm 2019",
            "type": "past_paper",
            "department": "Mathematics",
            "year": 2019,
            "download_count": 42
        }"#;
        let_assert!(Ok(material) = serde_json::from_str::<Material>(json));
        check!(material.kind == MaterialType::PastPaper);
        check!(material.kind() == "past-paper");
        check!(material.popularity() == 42);
    }

    #[test]
    fn test_missing_year_is_current_year() {
        let json = r#"{"id": "m3", "title": "Draft Notes", "type": "lecture-note", "department": "Biology"}"#;
        let_assert!(Ok(material) = serde_json::from_str::<Material>(json));
        check!(material.year == current_year());
        check!(material.year >= 2024);
    }

    #[rstest]
    #[case(0, 1970)]
    #[case(-1, 1969)]
    #[case(19_722, 2023)]
    #[case(19_723, 2024)]
    #[case(19_782, 2024)]
    #[case(20_088, 2024)]
    #[case(20_089, 2025)]
    fn test_year_from_unix_days(#[case] days: i64, #[case] year: i32) {
        check!(year_from_unix_days(days) == year);
    }

    #[test]
    fn test_type_label_drops_hyphen() {
        check!(MaterialType::LectureNote.label() == "lecture note");
        check!(MaterialType::LectureNote.to_string() == "lecture-note");
    }
}

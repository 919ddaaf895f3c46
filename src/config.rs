//! Tunable ranking parameters, loadable from TOML.
//!
//! Every key is optional; anything left out takes its default.
//!
//! ```toml
//! min_score = 0.1
//!
//! [weights]
//! title = 1.0
//! author = 0.7
//!
//! [autocomplete]
//! limit = 6
//! ```

use crate::error::Result;
use crate::record::Field;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// Per-field multipliers applied to matcher scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub title: f64,
    pub author: f64,
    pub description: f64,
    pub category: f64,
    pub type_label: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 1.0,
            author: 0.7,
            description: 0.4,
            category: 0.5,
            type_label: 0.3,
        }
    }
}

impl FieldWeights {
    pub const fn weight(&self, field: Field) -> f64 {
        match field {
            Field::Title => self.title,
            Field::Author => self.author,
            Field::Description => self.description,
            Field::Category => self.category,
            Field::TypeLabel => self.type_label,
        }
    }
}

/// Live-suggestion tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Trimmed query length below which recent searches are shown instead.
    pub min_query_len: usize,
    pub limit: usize,
    pub min_score: f64,
    pub history_capacity: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            limit: 6,
            min_score: 0.15,
            history_capacity: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub weights: FieldWeights,
    /// Results scoring below this are dropped.
    pub min_score: f64,
    /// Popularity count that earns the full boost.
    pub popularity_divisor: f64,
    /// Largest boost popularity can add.
    pub popularity_cap: f64,
    pub autocomplete: AutocompleteConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            min_score: 0.1,
            popularity_divisor: 100.0,
            popularity_cap: 0.1,
            autocomplete: AutocompleteConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse search config")
    }

    /// Reads and parses a TOML config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config at {}", path.display()));
            }
        };
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        tracing::info!("Loaded search config from {}", path.display());
        Ok(config)
    }
}

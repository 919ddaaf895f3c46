//! Loading material catalogs exported as JSON.

use crate::error::Result;
use crate::record::Material;
use anyhow::Context;
use std::path::Path;

/// Parses a JSON array of materials.
pub fn parse_catalog(content: &str) -> Result<Vec<Material>> {
    serde_json::from_str(content).context("Failed to parse material catalog")
}

/// Reads a JSON catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<Material>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
    let materials = parse_catalog(&content)
        .with_context(|| format!("Invalid catalog at {}", path.display()))?;
    tracing::info!(
        "Loaded {} materials from {}",
        materials.len(),
        path.display()
    );
    Ok(materials)
}

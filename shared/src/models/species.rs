//! Species models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A surveyed species
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub id: Uuid,
    /// Stable key used in filters and URLs, e.g. "mallard", "snow-goose"
    pub slug: String,
    pub name: String,
    pub category: SpeciesCategory,
}

/// High-level species grouping
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesCategory {
    Duck,
    Goose,
    Crane,
}

impl SpeciesCategory {
    /// Parse the stored text form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "duck" => Some(SpeciesCategory::Duck),
            "goose" => Some(SpeciesCategory::Goose),
            "crane" => Some(SpeciesCategory::Crane),
            _ => None,
        }
    }
}

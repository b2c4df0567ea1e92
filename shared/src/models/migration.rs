//! Regional migration index and movement direction models

use serde::{Deserialize, Serialize};

/// Aggregate regional migration intensity, 0-100 with a qualitative
/// label. Recomputed per query; never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationIndex {
    pub score: i32,
    pub label: IndexLabel,
}

/// Qualitative intensity bucket for the migration index
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IndexLabel {
    Quiet,
    Active,
    Strong,
    #[serde(rename = "Peak Movement")]
    PeakMovement,
}

impl IndexLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexLabel::Quiet => "Quiet",
            IndexLabel::Active => "Active",
            IndexLabel::Strong => "Strong",
            IndexLabel::PeakMovement => "Peak Movement",
        }
    }
}

/// Regional directional call derived from many per-location trends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DirectionCall {
    /// Net accumulation: birds arriving from the north
    Southward,
    /// Net departure: birds leaving the region
    Northward,
    MixedStalled,
}

impl DirectionCall {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionCall::Southward => "southward",
            DirectionCall::Northward => "northward",
            DirectionCall::MixedStalled => "mixed/stalled",
        }
    }
}

/// Directional call plus a qualifying sub-label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovementDirection {
    pub call: DirectionCall,
    pub sublabel: String,
}

//! Trend, anomaly, and migration-status models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of the latest count movement for one (location, species) series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    New,
}

/// Comparison of the latest observation against the prior one.
///
/// Invariants: `trend == New` iff `previous_count` is `None`;
/// `delta` is `None` iff `previous_count` is `None`; `delta_percent`
/// is additionally `None` when `previous_count == 0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendResult {
    pub current_count: i64,
    pub previous_count: Option<i64>,
    pub previous_date: Option<NaiveDate>,
    pub delta: Option<i64>,
    /// Percentage change, one decimal place
    pub delta_percent: Option<Decimal>,
    pub trend: Trend,
}

/// Volume anomaly classification. Derived, not stored; always
/// recomputable from a [`TrendResult`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyFlag {
    Spike,
    Drop,
    None,
}

impl AnomalyFlag {
    pub fn is_spike(&self) -> bool {
        matches!(self, AnomalyFlag::Spike)
    }
}

/// Qualitative life-cycle label for a series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    Arriving,
    Building,
    Peak,
    Declining,
    Departing,
    FirstSurvey,
    None,
}

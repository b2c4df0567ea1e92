//! Atmospheric push-factor models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-state atmospheric snapshot theorized to drive bird movement
/// southward. Supplied by an external collaborator; the core only
/// aggregates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushFactor {
    /// Two-letter state code
    pub state: String,
    /// Push intensity, 0 (no push) to 3 (strong push)
    pub push_score: i32,
    pub cold_front_present: bool,
    pub cold_front_incoming: bool,
    pub wind_from_north: bool,
    /// Air temperature in Fahrenheit
    pub temperature: Decimal,
    pub active_alerts: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

impl PushFactor {
    /// Whether front-and-wind conditions are actively pushing birds
    pub fn is_active_push(&self) -> bool {
        self.cold_front_present && self.wind_from_north
    }
}

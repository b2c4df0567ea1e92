//! Hunting-conditions models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hunting-conditions rating from the external weather collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Per-location hunting conditions snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HuntingConditions {
    pub rating: WeatherRating,
    /// Air temperature in Fahrenheit
    pub temperature: Decimal,
    /// Wind speed in mph
    pub wind_speed: Decimal,
    /// Short conditions text, e.g. "Overcast with light rain"
    pub conditions: String,
}

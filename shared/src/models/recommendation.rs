//! Hunt recommendation models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MigrationStatus, Trend, WeatherRating};

/// The seven named sub-scores behind a recommendation's composite
/// score. Raw values are kept here even when the composite is capped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub trend_score: i32,
    pub magnitude_score: i32,
    pub season_score: i32,
    pub weather_score: i32,
    pub push_score: i32,
    pub migration_score: i32,
    pub anomaly_bonus: i32,
}

impl ScoreBreakdown {
    /// Raw sum of all sub-scores, before the composite cap
    pub fn raw_total(&self) -> i32 {
        self.trend_score
            + self.magnitude_score
            + self.season_score
            + self.weather_score
            + self.push_score
            + self.migration_score
            + self.anomaly_bonus
    }
}

/// One ranked hunting-location recommendation with the context used
/// to compute it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntRecommendation {
    /// 1-based dense rank: equal scores share a rank
    pub rank: u32,
    /// Composite score, capped at 100
    pub score: i32,
    pub location_id: Uuid,
    pub location_name: String,
    pub location_type: String,
    pub state: String,
    pub flyway: String,
    pub species: String,
    pub species_name: String,
    pub latest_count: i64,
    pub survey_date: NaiveDate,
    pub trend: Trend,
    pub delta: Option<i64>,
    pub delta_percent: Option<Decimal>,
    pub migration_status: MigrationStatus,
    pub is_anomaly: bool,
    pub push_score: Option<i32>,
    pub cold_front_present: bool,
    pub cold_front_incoming: bool,
    pub season_open: bool,
    pub season_name: Option<String>,
    pub season_start: Option<NaiveDate>,
    pub season_end: Option<NaiveDate>,
    pub bag_limit: Option<i32>,
    pub weather_rating: Option<WeatherRating>,
    pub temperature: Option<Decimal>,
    pub wind_speed: Option<Decimal>,
    pub conditions: Option<String>,
    pub score_breakdown: ScoreBreakdown,
}

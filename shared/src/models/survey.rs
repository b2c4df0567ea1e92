//! Survey record models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One count observation for a species at a location on a date.
/// Immutable once recorded; ordered by `survey_date` within a
/// (location, species) group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub id: Uuid,
    pub location_id: Uuid,
    pub species_id: Uuid,
    pub count: i64,
    pub survey_date: NaiveDate,
    pub survey_type: SurveyType,
    pub source: SurveySource,
}

/// How the count was taken
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SurveyType {
    Aerial,
    Ground,
    MidWinterInventory,
}

impl SurveyType {
    /// Parse the stored text form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "aerial" => Some(SurveyType::Aerial),
            "ground" => Some(SurveyType::Ground),
            "mid_winter_inventory" => Some(SurveyType::MidWinterInventory),
            _ => None,
        }
    }
}

/// Who produced the count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SurveySource {
    Official,
    Community,
}

impl SurveySource {
    /// Parse the stored text form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "official" => Some(SurveySource::Official),
            "community" => Some(SurveySource::Community),
            _ => None,
        }
    }
}

/// The count-and-date pair the trend calculator consumes. The store
/// returns these newest-first within a (location, species) group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountObservation {
    pub count: i64,
    pub survey_date: NaiveDate,
}

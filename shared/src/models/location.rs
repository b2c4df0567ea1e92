//! Location models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Coordinates;

/// A surveyed waterfowl location (refuge, WMA, lake, or statewide roll-up)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub location_type: String,
    /// Two-letter state code, e.g. "TX"
    pub state: String,
    /// Flyway the location sits in, e.g. "central"
    pub flyway: String,
    pub coordinates: Option<Coordinates>,
    /// Statewide roll-up rows (e.g. mid-winter inventory totals).
    /// Decided at ingestion time, never inferred from the name.
    pub is_aggregate: bool,
    /// Counted in surveys but closed to hunting
    pub survey_only: bool,
}

impl Location {
    /// Whether this location can appear in hunt recommendations
    pub fn is_huntable(&self) -> bool {
        !self.is_aggregate && !self.survey_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(is_aggregate: bool, survey_only: bool) -> Location {
        Location {
            id: Uuid::new_v4(),
            name: "Anahuac NWR".to_string(),
            location_type: "refuge".to_string(),
            state: "TX".to_string(),
            flyway: "central".to_string(),
            coordinates: None,
            is_aggregate,
            survey_only,
        }
    }

    #[test]
    fn statewide_rollups_and_sanctuaries_are_not_huntable() {
        assert!(location(false, false).is_huntable());
        assert!(!location(true, false).is_huntable());
        assert!(!location(false, true).is_huntable());
    }
}

//! Season and license-window models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A regulatory hunting window for a species in a state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub state: String,
    pub species_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bag_limit: Option<i32>,
    /// Extended period with relaxed limits; counts as open
    pub is_conservation_order: bool,
}

/// Season state on a specific date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    Open { days_until_close: i64 },
    Closed,
}

impl SeasonWindow {
    /// Classify this window on `date`. Both endpoints are inclusive.
    pub fn status_on(&self, date: NaiveDate) -> SeasonStatus {
        if date >= self.start_date && date <= self.end_date {
            SeasonStatus::Open {
                days_until_close: (self.end_date - date).num_days(),
            }
        } else {
            SeasonStatus::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> SeasonWindow {
        SeasonWindow {
            state: "TX".to_string(),
            species_id: Uuid::new_v4(),
            name: "Regular Duck Season".to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            bag_limit: Some(6),
            is_conservation_order: false,
        }
    }

    #[test]
    fn open_inside_window() {
        let w = window((2025, 11, 1), (2026, 1, 31));
        let status = w.status_on(NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
        assert_eq!(
            status,
            SeasonStatus::Open {
                days_until_close: 47
            }
        );
    }

    #[test]
    fn endpoints_are_inclusive() {
        let w = window((2025, 11, 1), (2026, 1, 31));
        assert_eq!(
            w.status_on(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()),
            SeasonStatus::Open {
                days_until_close: 91
            }
        );
        assert_eq!(
            w.status_on(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()),
            SeasonStatus::Open {
                days_until_close: 0
            }
        );
    }

    #[test]
    fn closed_outside_window() {
        let w = window((2025, 11, 1), (2026, 1, 31));
        assert_eq!(
            w.status_on(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
            SeasonStatus::Closed
        );
        assert_eq!(
            w.status_on(NaiveDate::from_ymd_opt(2025, 10, 31).unwrap()),
            SeasonStatus::Closed
        );
    }
}

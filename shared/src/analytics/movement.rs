//! Regional movement direction estimation

use crate::models::{DirectionCall, MovementDirection, PushFactor, Trend, TrendResult};

/// Minimum non-new series required before a directional call is made
const MIN_SERIES: usize = 2;

/// Aggregate many per-location trends plus atmospheric push signals
/// into a regional directional call.
///
/// Returns `None` when fewer than two non-new series remain; the
/// region is indeterminate rather than mixed.
pub fn movement_direction(
    trends: &[TrendResult],
    push_factors: &[PushFactor],
) -> Option<MovementDirection> {
    let active: Vec<&TrendResult> = trends.iter().filter(|t| t.trend != Trend::New).collect();
    if active.len() < MIN_SERIES {
        return None;
    }

    let total = active.len();
    let increasing = active.iter().filter(|t| t.trend == Trend::Increasing).count();
    let decreasing = active.iter().filter(|t| t.trend == Trend::Decreasing).count();

    // ratio >= 0.6 tested in integers so the boundary is exact
    let (call, dominant) = if increasing * 5 >= total * 3 {
        (DirectionCall::Southward, increasing)
    } else if decreasing * 5 >= total * 3 {
        (DirectionCall::Northward, decreasing)
    } else {
        (DirectionCall::MixedStalled, increasing.max(decreasing))
    };

    let sublabel = if push_factors.iter().any(|p| p.is_active_push()) {
        "active push conditions".to_string()
    } else if dominant * 5 >= total * 4 {
        "strong movement".to_string()
    } else {
        "moderate movement".to_string()
    };

    Some(MovementDirection { call, sublabel })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn trend_with(trend: Trend) -> TrendResult {
        let previous = if trend == Trend::New { None } else { Some(100i64) };
        let delta = match trend {
            Trend::Increasing => Some(20),
            Trend::Decreasing => Some(-20),
            Trend::Stable => Some(2),
            Trend::New => None,
        };
        TrendResult {
            current_count: previous.unwrap_or(120) + delta.unwrap_or(20),
            previous_count: previous,
            previous_date: previous.map(|_| NaiveDate::from_ymd_opt(2026, 1, 8).unwrap()),
            delta,
            delta_percent: delta.map(Decimal::from),
            trend,
        }
    }

    fn push(cold_front: bool, north_wind: bool) -> PushFactor {
        PushFactor {
            state: "TX".to_string(),
            push_score: 2,
            cold_front_present: cold_front,
            cold_front_incoming: false,
            wind_from_north: north_wind,
            temperature: Decimal::from(28),
            active_alerts: vec![],
            recorded_at: Utc.with_ymd_and_hms(2026, 1, 15, 6, 0, 0).unwrap(),
        }
    }

    #[test]
    fn sixty_percent_increasing_is_southward() {
        let trends = vec![
            trend_with(Trend::Increasing),
            trend_with(Trend::Increasing),
            trend_with(Trend::Increasing),
            trend_with(Trend::Stable),
            trend_with(Trend::Decreasing),
        ];
        let direction = movement_direction(&trends, &[]).unwrap();
        assert_eq!(direction.call, DirectionCall::Southward);
        assert_eq!(direction.sublabel, "moderate movement");
    }

    #[test]
    fn dominant_departure_is_northward() {
        let trends = vec![
            trend_with(Trend::Decreasing),
            trend_with(Trend::Decreasing),
            trend_with(Trend::Decreasing),
            trend_with(Trend::Decreasing),
            trend_with(Trend::Increasing),
        ];
        let direction = movement_direction(&trends, &[]).unwrap();
        assert_eq!(direction.call, DirectionCall::Northward);
        assert_eq!(direction.sublabel, "strong movement");
    }

    #[test]
    fn split_region_is_mixed() {
        let trends = vec![
            trend_with(Trend::Increasing),
            trend_with(Trend::Decreasing),
            trend_with(Trend::Stable),
            trend_with(Trend::Stable),
        ];
        let direction = movement_direction(&trends, &[]).unwrap();
        assert_eq!(direction.call, DirectionCall::MixedStalled);
    }

    #[test]
    fn new_series_are_excluded() {
        let trends = vec![
            trend_with(Trend::New),
            trend_with(Trend::New),
            trend_with(Trend::Increasing),
        ];
        // Only one non-new series remains: indeterminate
        assert_eq!(movement_direction(&trends, &[]), None);
    }

    #[test]
    fn too_few_series_is_indeterminate() {
        assert_eq!(movement_direction(&[], &[]), None);
        assert_eq!(
            movement_direction(&[trend_with(Trend::Increasing)], &[]),
            None
        );
    }

    #[test]
    fn active_push_overrides_sublabel() {
        let trends = vec![
            trend_with(Trend::Increasing),
            trend_with(Trend::Increasing),
            trend_with(Trend::Increasing),
        ];
        let direction = movement_direction(&trends, &[push(true, true)]).unwrap();
        assert_eq!(direction.sublabel, "active push conditions");

        // Cold front without north wind is not an active push
        let direction = movement_direction(&trends, &[push(true, false)]).unwrap();
        assert_eq!(direction.sublabel, "strong movement");
    }
}

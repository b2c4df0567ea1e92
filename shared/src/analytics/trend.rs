//! Trend and delta computation for one (location, species) series,
//! with threshold-based anomaly and migration-status classification

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AnomalyFlag, CountObservation, MigrationStatus, Trend, TrendResult};

/// Minimum absolute count for an anomaly to register. Suppresses
/// false positives from small counts where percentage swings are noisy.
const ANOMALY_COUNT_FLOOR: i64 = 500;

/// Compare the newest observation in a series against the prior one.
///
/// The same three-branch rule applies whether the series came from a
/// single-location detail query or a dashboard-wide latest-vs-prior
/// pairing: no prior record means `new`; a percentage change inside
/// the ±5% band means `stable`; otherwise the sign of the delta wins.
pub fn compute_trend(current: &CountObservation, previous: Option<&CountObservation>) -> TrendResult {
    let Some(prev) = previous else {
        return TrendResult {
            current_count: current.count,
            previous_count: None,
            previous_date: None,
            delta: None,
            delta_percent: None,
            trend: Trend::New,
        };
    };

    let delta = current.count - prev.count;
    // Division guard: a zero prior count leaves the percentage undefined
    let delta_percent = if prev.count != 0 {
        let percent = Decimal::from(delta) * Decimal::from(100) / Decimal::from(prev.count);
        Some(percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    } else {
        None
    };

    let trend = match delta_percent {
        Some(percent) if percent.abs() < Decimal::from(5) => Trend::Stable,
        _ if delta > 0 => Trend::Increasing,
        _ => Trend::Decreasing,
    };

    TrendResult {
        current_count: current.count,
        previous_count: Some(prev.count),
        previous_date: Some(prev.survey_date),
        delta: Some(delta),
        delta_percent,
        trend,
    }
}

/// Classify a trend result as a volume spike, a sharp drop, or neither.
pub fn classify_anomaly(trend: &TrendResult) -> AnomalyFlag {
    let Some(percent) = trend.delta_percent else {
        return AnomalyFlag::None;
    };

    if percent >= Decimal::from(30) && trend.current_count >= ANOMALY_COUNT_FLOOR {
        return AnomalyFlag::Spike;
    }

    match trend.previous_count {
        Some(previous) if percent <= Decimal::from(-40) && previous >= ANOMALY_COUNT_FLOOR => {
            AnomalyFlag::Drop
        }
        _ => AnomalyFlag::None,
    }
}

/// Map trend + percentage change into a qualitative life-cycle label.
pub fn classify_migration_status(trend: &TrendResult) -> MigrationStatus {
    match trend.trend {
        Trend::New => MigrationStatus::FirstSurvey,
        Trend::Increasing => match trend.delta_percent {
            Some(percent) if percent > Decimal::from(20) => MigrationStatus::Arriving,
            _ => MigrationStatus::Building,
        },
        Trend::Stable => MigrationStatus::Peak,
        Trend::Decreasing => match trend.delta_percent {
            Some(percent) if percent < Decimal::from(-20) => MigrationStatus::Departing,
            _ => MigrationStatus::Declining,
        },
    }
}

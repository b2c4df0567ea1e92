//! Regional migration intensity index

use rust_decimal::Decimal;

use super::{round_half_up, trend::classify_anomaly};
use crate::models::{AnomalyFlag, IndexLabel, MigrationIndex, PushFactor, Trend, TrendResult};

/// Aggregate the latest per-state push scores into one regional value.
/// A cold front anywhere in the region drives birds, so the max wins
/// over an average that would dilute it.
pub fn overall_push_score(push_factors: &[PushFactor]) -> i32 {
    push_factors
        .iter()
        .map(|p| p.push_score.clamp(0, 3))
        .max()
        .unwrap_or(0)
}

/// Combine trend breadth, volume magnitude, atmospheric push, and
/// anomaly counts into a 0-100 regional intensity score.
///
/// Four sub-scores, each independently capped at 25; the total is
/// capped at 100. An empty input set scores 0 (Quiet).
pub fn migration_index(trends: &[TrendResult], overall_push: i32) -> MigrationIndex {
    if trends.is_empty() {
        return MigrationIndex {
            score: 0,
            label: IndexLabel::Quiet,
        };
    }

    let non_new = trends.iter().filter(|t| t.trend != Trend::New).count();
    let increasing = trends
        .iter()
        .filter(|t| t.trend == Trend::Increasing)
        .count();
    let trend_score = if non_new == 0 {
        0
    } else {
        round_half_up(Decimal::from(increasing as i64 * 25) / Decimal::from(non_new as i64))
    };

    let positive: Vec<Decimal> = trends
        .iter()
        .filter_map(|t| t.delta_percent)
        .filter(|p| *p > Decimal::ZERO)
        .collect();
    let volume_score = if positive.is_empty() {
        0
    } else {
        let avg = positive.iter().sum::<Decimal>() / Decimal::from(positive.len() as i64);
        round_half_up(avg * Decimal::from(25) / Decimal::from(60)).min(25)
    };

    let weather_score = round_half_up(Decimal::from(overall_push.clamp(0, 3) * 25) / Decimal::from(3));

    let spikes = trends
        .iter()
        .filter(|t| classify_anomaly(t) == AnomalyFlag::Spike)
        .count() as i32;
    let drops = trends
        .iter()
        .filter(|t| classify_anomaly(t) == AnomalyFlag::Drop)
        .count() as i32;
    let anomaly_score = (12 + 6 * spikes - 4 * drops).clamp(0, 25);

    let total = (trend_score + volume_score + weather_score + anomaly_score).min(100);
    MigrationIndex {
        score: total,
        label: label_for(total),
    }
}

fn label_for(score: i32) -> IndexLabel {
    match score {
        s if s >= 76 => IndexLabel::PeakMovement,
        s if s >= 51 => IndexLabel::Strong,
        s if s >= 26 => IndexLabel::Active,
        _ => IndexLabel::Quiet,
    }
}

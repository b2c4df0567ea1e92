//! Hunt opportunity scoring and ranking
//!
//! Seven sub-scores per candidate, summed into a composite capped at
//! 100. A sub-score whose external input is missing degrades to 0
//! instead of failing the candidate.

use rust_decimal::Decimal;

use super::round_half_up;
use crate::models::{
    AnomalyFlag, HuntRecommendation, MigrationStatus, ScoreBreakdown, SeasonStatus, Trend,
    TrendResult, WeatherRating,
};

/// Days of season remaining above which a candidate earns full season credit
const SEASON_MARGIN_DAYS: i64 = 14;

/// Everything the scorer needs for one candidate. External inputs that
/// failed to load arrive as `None`.
#[derive(Debug, Clone)]
pub struct ScoringInputs<'a> {
    pub trend: &'a TrendResult,
    pub migration_status: MigrationStatus,
    pub anomaly: AnomalyFlag,
    /// Largest latest count among the filtered candidates, at least 1
    pub reference_count: i64,
    pub season: Option<SeasonStatus>,
    pub weather: Option<WeatherRating>,
    pub push_score: Option<i32>,
}

/// Compute the seven sub-scores and the capped composite for one candidate.
pub fn score_candidate(inputs: &ScoringInputs) -> (ScoreBreakdown, i32) {
    let breakdown = ScoreBreakdown {
        trend_score: trend_score(inputs.trend),
        magnitude_score: magnitude_score(inputs.trend.current_count, inputs.reference_count),
        season_score: season_score(inputs.season),
        weather_score: weather_score(inputs.weather),
        push_score: push_factor_score(inputs.push_score),
        migration_score: migration_score(inputs.migration_status),
        anomaly_bonus: anomaly_bonus(inputs.anomaly),
    };
    // The documented weights sum to 105 with the bonus on top; the
    // composite is hard-capped while the breakdown stays raw.
    (breakdown, breakdown.raw_total().min(100))
}

/// 0-25. Increasing trends score highest, scaled by magnitude;
/// new and stable sit in the middle; decreasing lowest.
pub fn trend_score(trend: &TrendResult) -> i32 {
    match trend.trend {
        Trend::Increasing => match trend.delta_percent {
            Some(percent) => (15 + round_half_up(percent / Decimal::from(5))).min(25),
            // Growth from a zero prior count
            None => 25,
        },
        Trend::New => 12,
        Trend::Stable => 10,
        Trend::Decreasing => match trend.delta_percent {
            Some(percent) => (5 + round_half_up(percent / Decimal::from(10))).max(0),
            None => 0,
        },
    }
}

/// 0-20, scaled by the latest count against the regional reference scale
pub fn magnitude_score(latest_count: i64, reference_count: i64) -> i32 {
    if latest_count <= 0 {
        return 0;
    }
    let reference = reference_count.max(1);
    round_half_up(Decimal::from(latest_count * 20) / Decimal::from(reference)).min(20)
}

/// 0-20. Full credit when the season is open with margin before close,
/// partial when closing soon, zero when closed or unknown.
pub fn season_score(status: Option<SeasonStatus>) -> i32 {
    match status {
        Some(SeasonStatus::Open { days_until_close }) if days_until_close > SEASON_MARGIN_DAYS => 20,
        Some(SeasonStatus::Open { .. }) => 12,
        Some(SeasonStatus::Closed) | None => 0,
    }
}

/// 0-15 from the external hunting-conditions rating; zero if unavailable
pub fn weather_score(rating: Option<WeatherRating>) -> i32 {
    match rating {
        Some(WeatherRating::Excellent) => 15,
        Some(WeatherRating::Good) => 11,
        Some(WeatherRating::Fair) => 6,
        Some(WeatherRating::Poor) => 2,
        None => 0,
    }
}

/// 0-10, scaled from the regional push score (0-3)
pub fn push_factor_score(push_score: Option<i32>) -> i32 {
    match push_score {
        Some(score) => round_half_up(Decimal::from(score.clamp(0, 3) * 10) / Decimal::from(3)),
        None => 0,
    }
}

/// 0-10. Arriving and building birds score highest, departing lowest.
pub fn migration_score(status: MigrationStatus) -> i32 {
    match status {
        MigrationStatus::Arriving => 10,
        MigrationStatus::Building => 8,
        MigrationStatus::Peak => 6,
        MigrationStatus::FirstSurvey => 5,
        MigrationStatus::Declining => 3,
        MigrationStatus::Departing => 1,
        MigrationStatus::None => 0,
    }
}

/// +5 for a volume spike, otherwise 0
pub fn anomaly_bonus(anomaly: AnomalyFlag) -> i32 {
    if anomaly.is_spike() {
        5
    } else {
        0
    }
}

/// Sort candidates, assign dense 1-based ranks, and truncate to `limit`.
///
/// Ordering is total and deterministic: score descending, then latest
/// count descending, then location name, then species slug.
pub fn rank_recommendations(
    mut recommendations: Vec<HuntRecommendation>,
    limit: usize,
) -> Vec<HuntRecommendation> {
    recommendations.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.latest_count.cmp(&a.latest_count))
            .then_with(|| a.location_name.cmp(&b.location_name))
            .then_with(|| a.species.cmp(&b.species))
    });

    let mut rank = 0u32;
    let mut previous_score = None;
    for recommendation in recommendations.iter_mut() {
        if previous_score != Some(recommendation.score) {
            rank += 1;
            previous_score = Some(recommendation.score);
        }
        recommendation.rank = rank;
    }

    recommendations.truncate(limit);
    recommendations
}

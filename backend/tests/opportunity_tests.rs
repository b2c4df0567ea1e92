//! Hunt opportunity scoring and ranking integration tests
//!
//! Covers sub-score bounds, composite capping, degradation of missing
//! external inputs, and the stable descending dense ranking.

use chrono::NaiveDate;
use proptest::prelude::*;
use uuid::Uuid;

use shared::analytics::scoring::{
    magnitude_score, migration_score, push_factor_score, season_score, trend_score, weather_score,
};
use shared::analytics::{compute_trend, rank_recommendations, score_candidate, ScoringInputs};
use shared::models::{
    AnomalyFlag, CountObservation, HuntRecommendation, MigrationStatus, ScoreBreakdown,
    SeasonStatus, Trend, TrendResult, WeatherRating,
};

fn series(current: i64, previous: Option<i64>) -> TrendResult {
    let obs = CountObservation {
        count: current,
        survey_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    };
    let prev = previous.map(|count| CountObservation {
        count,
        survey_date: NaiveDate::from_ymd_opt(2026, 1, 8).unwrap(),
    });
    compute_trend(&obs, prev.as_ref())
}

fn recommendation(name: &str, score: i32, latest_count: i64) -> HuntRecommendation {
    HuntRecommendation {
        rank: 0,
        score,
        location_id: Uuid::new_v4(),
        location_name: name.to_string(),
        location_type: "refuge".to_string(),
        state: "TX".to_string(),
        flyway: "central".to_string(),
        species: "mallard".to_string(),
        species_name: "Mallard".to_string(),
        latest_count,
        survey_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        trend: Trend::Increasing,
        delta: Some(100),
        delta_percent: None,
        migration_status: MigrationStatus::Building,
        is_anomaly: false,
        push_score: None,
        cold_front_present: false,
        cold_front_incoming: false,
        season_open: false,
        season_name: None,
        season_start: None,
        season_end: None,
        bag_limit: None,
        weather_rating: None,
        temperature: None,
        wind_speed: None,
        conditions: None,
        score_breakdown: ScoreBreakdown {
            trend_score: 0,
            magnitude_score: 0,
            season_score: 0,
            weather_score: 0,
            push_score: 0,
            migration_score: 0,
            anomaly_bonus: 0,
        },
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_maxed_candidate_caps_at_one_hundred() {
        let best = series(5000, Some(2000));
        let (breakdown, score) = score_candidate(&ScoringInputs {
            trend: &best,
            migration_status: MigrationStatus::Arriving,
            anomaly: AnomalyFlag::Spike,
            reference_count: 5000,
            season: Some(SeasonStatus::Open {
                days_until_close: 60,
            }),
            weather: Some(WeatherRating::Excellent),
            push_score: Some(3),
        });
        assert_eq!(breakdown.raw_total(), 105);
        assert_eq!(score, 100);
    }

    #[test]
    fn test_missing_collaborators_degrade_to_zero() {
        let trend = series(300, Some(250));
        let (breakdown, score) = score_candidate(&ScoringInputs {
            trend: &trend,
            migration_status: MigrationStatus::Building,
            anomaly: AnomalyFlag::None,
            reference_count: 600,
            season: None,
            weather: None,
            push_score: None,
        });
        assert_eq!(breakdown.season_score, 0);
        assert_eq!(breakdown.weather_score, 0);
        assert_eq!(breakdown.push_score, 0);
        assert_eq!(breakdown.anomaly_bonus, 0);
        assert!(score > 0);
    }

    #[test]
    fn test_season_margin_boundary() {
        assert_eq!(
            season_score(Some(SeasonStatus::Open {
                days_until_close: 15
            })),
            20
        );
        assert_eq!(
            season_score(Some(SeasonStatus::Open {
                days_until_close: 14
            })),
            12
        );
        assert_eq!(season_score(Some(SeasonStatus::Closed)), 0);
    }

    #[test]
    fn test_weather_rating_ladder() {
        assert_eq!(weather_score(Some(WeatherRating::Excellent)), 15);
        assert_eq!(weather_score(Some(WeatherRating::Good)), 11);
        assert_eq!(weather_score(Some(WeatherRating::Fair)), 6);
        assert_eq!(weather_score(Some(WeatherRating::Poor)), 2);
        assert_eq!(weather_score(None), 0);
    }

    #[test]
    fn test_rank_ordering_and_truncation() {
        let ranked = rank_recommendations(
            vec![
                recommendation("Anahuac", 72, 8000),
                recommendation("Hagerman", 91, 3000),
                recommendation("Washita", 72, 9000),
                recommendation("Salt Plains", 55, 2000),
                recommendation("Bitter Lake", 30, 400),
            ],
            3,
        );

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].location_name, "Hagerman");
        assert_eq!(ranked[0].rank, 1);
        // Equal scores share a dense rank, higher count first
        assert_eq!(ranked[1].location_name, "Washita");
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].location_name, "Anahuac");
        assert_eq!(ranked[2].rank, 2);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn trend_strategy() -> impl Strategy<Value = TrendResult> {
        (
            0..=2_000_000i64,
            prop_oneof![Just(None), (0..=2_000_000i64).prop_map(Some)],
        )
            .prop_map(|(current, previous)| series(current, previous))
    }

    fn season_strategy() -> impl Strategy<Value = Option<SeasonStatus>> {
        prop_oneof![
            Just(None),
            Just(Some(SeasonStatus::Closed)),
            (0..=120i64).prop_map(|days| Some(SeasonStatus::Open {
                days_until_close: days
            })),
        ]
    }

    fn weather_strategy() -> impl Strategy<Value = Option<WeatherRating>> {
        prop_oneof![
            Just(None),
            Just(Some(WeatherRating::Excellent)),
            Just(Some(WeatherRating::Good)),
            Just(Some(WeatherRating::Fair)),
            Just(Some(WeatherRating::Poor)),
        ]
    }

    fn status_strategy() -> impl Strategy<Value = MigrationStatus> {
        prop_oneof![
            Just(MigrationStatus::Arriving),
            Just(MigrationStatus::Building),
            Just(MigrationStatus::Peak),
            Just(MigrationStatus::Declining),
            Just(MigrationStatus::Departing),
            Just(MigrationStatus::FirstSurvey),
            Just(MigrationStatus::None),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Every sub-score stays inside its documented band
        #[test]
        fn prop_subscore_bounds(
            trend in trend_strategy(),
            reference in 1..=2_000_000i64,
            season in season_strategy(),
            weather in weather_strategy(),
            status in status_strategy(),
            push in prop_oneof![Just(None), (0..=3i32).prop_map(Some)],
        ) {
            prop_assert!((0..=25).contains(&trend_score(&trend)));
            prop_assert!((0..=20).contains(&magnitude_score(trend.current_count, reference)));
            prop_assert!((0..=20).contains(&season_score(season)));
            prop_assert!((0..=15).contains(&weather_score(weather)));
            prop_assert!((0..=10).contains(&push_factor_score(push)));
            prop_assert!((0..=10).contains(&migration_score(status)));
        }

        /// The composite score is always inside [0, 100]
        #[test]
        fn prop_composite_bounds(
            trend in trend_strategy(),
            reference in 1..=2_000_000i64,
            season in season_strategy(),
            weather in weather_strategy(),
            status in status_strategy(),
            push in prop_oneof![Just(None), (0..=3i32).prop_map(Some)],
            spike in proptest::bool::ANY,
        ) {
            let anomaly = if spike { AnomalyFlag::Spike } else { AnomalyFlag::None };
            let (breakdown, score) = score_candidate(&ScoringInputs {
                trend: &trend,
                migration_status: status,
                anomaly,
                reference_count: reference,
                season,
                weather,
                push_score: push,
            });
            prop_assert!(score >= 0);
            prop_assert!(score <= 100);
            prop_assert!(breakdown.raw_total() >= score);
        }

        /// Higher scores always rank strictly ahead of lower scores
        #[test]
        fn prop_ranking_descending_and_dense(
            scores in proptest::collection::vec(0..=100i32, 0..30),
        ) {
            let recommendations: Vec<HuntRecommendation> = scores
                .iter()
                .enumerate()
                .map(|(i, score)| recommendation(&format!("loc-{i:02}"), *score, 100))
                .collect();
            let total = recommendations.len();
            let ranked = rank_recommendations(recommendations, total);

            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score > pair[1].score {
                    prop_assert_eq!(pair[1].rank, pair[0].rank + 1);
                } else {
                    prop_assert_eq!(pair[1].rank, pair[0].rank);
                }
            }
            if let Some(first) = ranked.first() {
                prop_assert_eq!(first.rank, 1);
            }
        }

        /// The result list never exceeds the requested limit
        #[test]
        fn prop_ranking_truncates(
            scores in proptest::collection::vec(0..=100i32, 0..30),
            limit in 0usize..10,
        ) {
            let recommendations: Vec<HuntRecommendation> = scores
                .iter()
                .enumerate()
                .map(|(i, score)| recommendation(&format!("loc-{i:02}"), *score, 100))
                .collect();
            let ranked = rank_recommendations(recommendations, limit);
            prop_assert!(ranked.len() <= limit);
        }
    }
}

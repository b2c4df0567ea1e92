//! Hunt opportunity ranking
//!
//! Combines trend, volume, season state, hunting conditions, push
//! signals, migration status, and spike bonuses into one composite
//! score per candidate, then produces a ranked, capped list. Any
//! sub-score whose external input is missing degrades to 0 rather
//! than failing the request.

use chrono::NaiveDate;
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use shared::analytics::{rank_recommendations, score_candidate, ScoringInputs};
use shared::models::{
    HuntRecommendation, HuntingConditions, MigrationStatus, PushFactor, SeasonStatus, SeasonWindow,
    Trend, WeatherRating,
};
use shared::types::Coordinates;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::ConditionsClient;
use crate::services::{PushFactorService, SeasonService, TrendService};

/// Request filter for the ranker
#[derive(Debug, Clone)]
pub struct OpportunityFilter {
    /// Optional species slug; all species when absent
    pub species: Option<String>,
    /// Two-letter state codes
    pub states: Vec<String>,
    /// Date the hunt is planned for
    pub date: NaiveDate,
    /// Maximum recommendations to return
    pub limit: usize,
}

/// Per-request memo of conditions lookups, keyed by location. Passed
/// explicitly through the enrichment call so concurrent requests stay
/// isolated; a `None` value records a failed lookup so it is not
/// retried within the request.
pub type ConditionsMemo = HashMap<Uuid, Option<HuntingConditions>>;

/// Opportunity ranking service
#[derive(Clone)]
pub struct OpportunityService {
    db: PgPool,
    trends: TrendService,
    seasons: SeasonService,
    push: PushFactorService,
    conditions: Option<ConditionsClient>,
    batch_size: usize,
    batch_delay: Duration,
}

#[derive(Debug, FromRow)]
struct LocationCoordsRow {
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
}

impl OpportunityService {
    pub fn new(db: PgPool) -> Self {
        Self {
            trends: TrendService::new(db.clone()),
            seasons: SeasonService::new(db.clone()),
            push: PushFactorService::new(db.clone()),
            db,
            conditions: None,
            batch_size: 4,
            batch_delay: Duration::from_millis(250),
        }
    }

    /// Build from configuration; an empty conditions API key disables
    /// per-location weather enrichment
    pub fn from_config(db: PgPool, config: &Config) -> Self {
        let mut service = Self::new(db);
        if !config.weather.api_key.is_empty() {
            service.conditions = Some(ConditionsClient::new(
                config.weather.api_key.clone(),
                Duration::from_millis(config.weather.request_timeout_ms),
            ));
        }
        service.batch_size = config.enrichment.batch_size.max(1);
        service.batch_delay = Duration::from_millis(config.enrichment.batch_delay_ms);
        service
    }

    pub fn with_conditions_client(mut self, client: ConditionsClient) -> Self {
        self.conditions = Some(client);
        self
    }

    /// Rank candidate (location, species) pairs for the filter and
    /// return the top `limit` recommendations.
    pub async fn rank(&self, filter: &OpportunityFilter) -> AppResult<Vec<HuntRecommendation>> {
        if let Some(slug) = &filter.species {
            let known = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM species WHERE slug = $1)",
            )
            .bind(slug)
            .fetch_one(&self.db)
            .await?;
            if !known {
                return Err(AppError::NotFound("Species".to_string()));
            }
        }

        // Survey pairs, push snapshots, and season windows have no
        // ordering dependency on one another; fetch them together.
        let (candidates, push_factors, season_windows) = tokio::join!(
            self.trends
                .get_region_trends(&filter.states, filter.species.as_deref(), true),
            self.push.latest_for_states(&filter.states),
            self.seasons.open_windows(&filter.states, filter.date)
        );
        let candidates = candidates?;

        // Push and season reads only feed sub-scores: degrade, don't fail
        let push_by_state: HashMap<String, PushFactor> = match push_factors {
            Ok(factors) => factors.into_iter().map(|p| (p.state.clone(), p)).collect(),
            Err(e) => {
                tracing::warn!("Push-factor read failed; push sub-scores degrade to zero: {}", e);
                HashMap::new()
            }
        };
        let season_windows: HashMap<(String, Uuid), SeasonWindow> = match season_windows {
            Ok(windows) => windows,
            Err(e) => {
                tracing::warn!("Season read failed; season sub-scores degrade to zero: {}", e);
                HashMap::new()
            }
        };

        let reference_count = candidates
            .iter()
            .map(|c| c.trend.current_count)
            .max()
            .unwrap_or(0)
            .max(1);

        // One conditions lookup per distinct location, throttled
        let mut memo = ConditionsMemo::new();
        let unique_locations: Vec<(Uuid, Coordinates)> = {
            let mut seen = Vec::new();
            for candidate in &candidates {
                if let Some(coordinates) = &candidate.coordinates {
                    if !seen.iter().any(|(id, _)| *id == candidate.location_id) {
                        seen.push((candidate.location_id, coordinates.clone()));
                    }
                }
            }
            seen
        };
        self.enrich_conditions(&unique_locations, &mut memo).await;

        let mut recommendations = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let season = season_windows.get(&(candidate.state.clone(), candidate.species_id));
            let season_status = season.map(|w| w.status_on(filter.date));
            let push = push_by_state.get(&candidate.state);
            let conditions = memo
                .get(&candidate.location_id)
                .and_then(|entry| entry.as_ref());

            let (score_breakdown, score) = score_candidate(&ScoringInputs {
                trend: &candidate.trend,
                migration_status: candidate.migration_status,
                anomaly: candidate.anomaly,
                reference_count,
                season: season_status,
                weather: conditions.map(|c| c.rating),
                push_score: push.map(|p| p.push_score),
            });

            recommendations.push(HuntRecommendation {
                rank: 0,
                score,
                location_id: candidate.location_id,
                location_name: candidate.location_name,
                location_type: candidate.location_type,
                state: candidate.state,
                flyway: candidate.flyway,
                species: candidate.species,
                species_name: candidate.species_name,
                latest_count: candidate.trend.current_count,
                survey_date: candidate.survey_date,
                trend: candidate.trend.trend,
                delta: candidate.trend.delta,
                delta_percent: candidate.trend.delta_percent,
                migration_status: candidate.migration_status,
                is_anomaly: candidate.anomaly.is_spike(),
                push_score: push.map(|p| p.push_score),
                cold_front_present: push.map_or(false, |p| p.cold_front_present),
                cold_front_incoming: push.map_or(false, |p| p.cold_front_incoming),
                season_open: matches!(season_status, Some(SeasonStatus::Open { .. })),
                season_name: season.map(|w| w.name.clone()),
                season_start: season.map(|w| w.start_date),
                season_end: season.map(|w| w.end_date),
                bag_limit: season.and_then(|w| w.bag_limit),
                weather_rating: conditions.map(|c| c.rating),
                temperature: conditions.map(|c| c.temperature),
                wind_speed: conditions.map(|c| c.wind_speed),
                conditions: conditions.map(|c| c.conditions.clone()),
                score_breakdown,
            });
        }

        Ok(rank_recommendations(recommendations, filter.limit))
    }

    /// Fetch conditions for each location in small paced batches.
    /// Failures are memoized as `None` and never retried; one bad
    /// location never blocks the others.
    async fn enrich_conditions(
        &self,
        locations: &[(Uuid, Coordinates)],
        memo: &mut ConditionsMemo,
    ) {
        let Some(client) = &self.conditions else {
            tracing::debug!("Conditions client unconfigured; skipping weather enrichment");
            return;
        };

        let pending: Vec<(Uuid, &Coordinates)> = locations
            .iter()
            .filter(|(id, _)| !memo.contains_key(id))
            .map(|(id, coordinates)| (*id, coordinates))
            .collect();

        for (batch_index, batch) in pending.chunks(self.batch_size).enumerate() {
            if batch_index > 0 {
                tokio::time::sleep(self.batch_delay).await;
            }

            let fetches = batch.iter().map(|&(id, coordinates)| async move {
                (id, client.get_current(coordinates).await)
            });

            for (location_id, result) in join_all(fetches).await {
                match result {
                    Ok(conditions) => {
                        memo.insert(location_id, Some(conditions));
                    }
                    Err(e) => {
                        tracing::warn!(
                            location_id = %location_id,
                            "Conditions lookup failed; weather sub-score degrades to zero: {}",
                            e
                        );
                        memo.insert(location_id, None);
                    }
                }
            }
        }
    }

    /// Raw per-location conditions lookup for the conditions endpoint
    pub async fn location_conditions(&self, location_id: Uuid) -> AppResult<HuntingConditions> {
        let client = self.conditions.as_ref().ok_or_else(|| {
            AppError::Configuration("Conditions API key not configured".to_string())
        })?;

        let row = sqlx::query_as::<_, LocationCoordsRow>(
            "SELECT latitude, longitude FROM locations WHERE id = $1",
        )
        .bind(location_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Location".to_string()))?;

        let coordinates = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude),
            _ => return Err(AppError::NotFound("Location coordinates".to_string())),
        };

        client.get_current(&coordinates).await
    }

    /// Flatten recommendations into CSV for download
    pub fn export_to_csv(recommendations: &[HuntRecommendation]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for recommendation in recommendations {
            wtr.serialize(CsvRecommendation::from(recommendation))
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

/// Flat CSV row for recommendation export
#[derive(Debug, Serialize)]
struct CsvRecommendation<'a> {
    rank: u32,
    score: i32,
    location: &'a str,
    state: &'a str,
    flyway: &'a str,
    species: &'a str,
    latest_count: i64,
    trend: Trend,
    delta_percent: Option<Decimal>,
    migration_status: MigrationStatus,
    is_anomaly: bool,
    season_open: bool,
    weather_rating: Option<WeatherRating>,
}

impl<'a> From<&'a HuntRecommendation> for CsvRecommendation<'a> {
    fn from(rec: &'a HuntRecommendation) -> Self {
        Self {
            rank: rec.rank,
            score: rec.score,
            location: &rec.location_name,
            state: &rec.state,
            flyway: &rec.flyway,
            species: &rec.species,
            latest_count: rec.latest_count,
            trend: rec.trend,
            delta_percent: rec.delta_percent,
            migration_status: rec.migration_status,
            is_anomaly: rec.is_anomaly,
            season_open: rec.season_open,
            weather_rating: rec.weather_rating,
        }
    }
}

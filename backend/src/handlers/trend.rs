//! HTTP handlers for trend endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::validation::parse_state_filter;

use crate::error::{AppError, AppResult};
use crate::models::SurveyRecord;
use crate::services::trend::{EnrichedTrend, LocationTrend};
use crate::services::TrendService;
use crate::AppState;

/// Get the trend for one (location, species) series
pub async fn get_trend(
    State(state): State<AppState>,
    Path((location_id, species_slug)): Path<(Uuid, String)>,
) -> AppResult<Json<EnrichedTrend>> {
    let service = TrendService::new(state.db);
    let trend = service.get_trend(location_id, &species_slug).await?;
    Ok(Json(trend))
}

/// Query parameters for region-wide trends
#[derive(Debug, Deserialize)]
pub struct RegionTrendQuery {
    /// Comma-separated two-letter state codes
    pub states: String,
    pub species: Option<String>,
}

/// Get one trend per (location, species) pair across a region
pub async fn list_region_trends(
    State(state): State<AppState>,
    Query(query): Query<RegionTrendQuery>,
) -> AppResult<Json<Vec<LocationTrend>>> {
    let states =
        parse_state_filter(&query.states).map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = TrendService::new(state.db);
    let trends = service
        .get_region_trends(&states, query.species.as_deref(), false)
        .await?;
    Ok(Json(trends))
}

/// Query parameters for survey history
#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub limit: Option<i64>,
}

/// Get the flat survey series for one (location, species), newest first
pub async fn get_survey_history(
    State(state): State<AppState>,
    Path((location_id, species_slug)): Path<(Uuid, String)>,
    Query(query): Query<SeriesQuery>,
) -> AppResult<Json<Vec<SurveyRecord>>> {
    let limit = query.limit.unwrap_or(12).clamp(1, 100);
    let service = TrendService::new(state.db);
    let records = service
        .get_series(location_id, &species_slug, limit)
        .await?;
    Ok(Json(records))
}

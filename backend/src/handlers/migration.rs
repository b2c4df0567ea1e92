//! HTTP handlers for regional migration endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared::validation::parse_state_filter;

use crate::error::{AppError, AppResult};
use crate::services::migration::RegionalSummary;
use crate::AppState;

/// Query parameters for the regional migration summary
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Comma-separated two-letter state codes
    pub states: String,
    /// Recompute even when a fresh cached summary exists
    #[serde(default)]
    pub force_refresh: bool,
}

/// Get the regional migration summary: intensity index, movement
/// direction, and per-trend tallies
pub async fn get_migration_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<RegionalSummary>> {
    let states =
        parse_state_filter(&query.states).map_err(|e| AppError::ValidationError(e.to_string()))?;

    let summary = state
        .migration
        .regional_summary(&states, query.force_refresh)
        .await?;
    Ok(Json(summary))
}

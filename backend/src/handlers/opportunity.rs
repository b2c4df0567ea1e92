//! HTTP handlers for hunt opportunity endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::validation::{parse_state_filter, validate_species_slug};

use crate::error::{AppError, AppResult};
use crate::models::{HuntRecommendation, HuntingConditions};
use crate::services::opportunity::OpportunityFilter;
use crate::services::OpportunityService;
use crate::AppState;

/// Query parameters for hunt opportunity ranking
#[derive(Debug, Deserialize, Validate)]
pub struct OpportunityQuery {
    /// Comma-separated two-letter state codes
    pub states: String,
    /// Optional species slug filter
    pub species: Option<String>,
    /// Hunt date; defaults to today
    pub date: Option<NaiveDate>,
    /// Maximum recommendations to return; defaults to 10
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

fn build_filter(query: &OpportunityQuery) -> AppResult<OpportunityFilter> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let states =
        parse_state_filter(&query.states).map_err(|e| AppError::ValidationError(e.to_string()))?;
    if let Some(slug) = &query.species {
        validate_species_slug(slug).map_err(|e| AppError::ValidationError(e.to_string()))?;
    }

    Ok(OpportunityFilter {
        species: query.species.clone(),
        states,
        date: query.date.unwrap_or_else(|| Utc::now().date_naive()),
        limit: query.limit.unwrap_or(10) as usize,
    })
}

/// Rank hunt opportunities for a region, species, and date
pub async fn rank_opportunities(
    State(state): State<AppState>,
    Query(query): Query<OpportunityQuery>,
) -> AppResult<Json<Vec<HuntRecommendation>>> {
    let filter = build_filter(&query)?;
    let service = OpportunityService::from_config(state.db, &state.config);
    let recommendations = service.rank(&filter).await?;
    Ok(Json(recommendations))
}

/// Export ranked hunt opportunities as CSV
pub async fn export_opportunities(
    State(state): State<AppState>,
    Query(query): Query<OpportunityQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = build_filter(&query)?;
    let service = OpportunityService::from_config(state.db, &state.config);
    let recommendations = service.rank(&filter).await?;
    let csv = OpportunityService::export_to_csv(&recommendations)?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv))
}

/// Get raw hunting conditions for one location
pub async fn get_location_conditions(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> AppResult<Json<HuntingConditions>> {
    let service = OpportunityService::from_config(state.db, &state.config);
    let conditions = service.location_conditions(location_id).await?;
    Ok(Json(conditions))
}

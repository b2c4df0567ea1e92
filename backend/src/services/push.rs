//! Push-factor service: latest atmospheric snapshot per state

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use shared::models::PushFactor;

use crate::error::AppResult;

/// Push-factor service reading the external push-factor store
#[derive(Clone)]
pub struct PushFactorService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct PushFactorRow {
    state: String,
    push_score: i32,
    cold_front_present: bool,
    cold_front_incoming: bool,
    wind_from_north: bool,
    temperature: Decimal,
    active_alerts: Vec<String>,
    recorded_at: DateTime<Utc>,
}

impl From<PushFactorRow> for PushFactor {
    fn from(row: PushFactorRow) -> Self {
        PushFactor {
            state: row.state,
            push_score: row.push_score,
            cold_front_present: row.cold_front_present,
            cold_front_incoming: row.cold_front_incoming,
            wind_from_north: row.wind_from_north,
            temperature: row.temperature,
            active_alerts: row.active_alerts,
            recorded_at: row.recorded_at,
        }
    }
}

impl PushFactorService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Latest snapshot per state, ordered by state code
    pub async fn latest_for_states(&self, states: &[String]) -> AppResult<Vec<PushFactor>> {
        let rows = sqlx::query_as::<_, PushFactorRow>(
            r#"
            SELECT DISTINCT ON (state)
                   state, push_score, cold_front_present, cold_front_incoming,
                   wind_from_north, temperature, active_alerts, recorded_at
            FROM push_factors
            WHERE state = ANY($1)
            ORDER BY state, recorded_at DESC
            "#,
        )
        .bind(states)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(PushFactor::from).collect())
    }
}

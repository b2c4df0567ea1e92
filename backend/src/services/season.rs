//! Season service: regulatory window lookups per (state, species)

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use shared::models::SeasonWindow;

use crate::error::AppResult;

/// Season service reading the external season/license store
#[derive(Clone)]
pub struct SeasonService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct SeasonRow {
    state: String,
    species_id: Uuid,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    bag_limit: Option<i32>,
    is_conservation_order: bool,
}

impl From<SeasonRow> for SeasonWindow {
    fn from(row: SeasonRow) -> Self {
        SeasonWindow {
            state: row.state,
            species_id: row.species_id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            bag_limit: row.bag_limit,
            is_conservation_order: row.is_conservation_order,
        }
    }
}

impl SeasonService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Windows open on `date` for every species in the given states,
    /// keyed by (state, species). A regular season wins over a
    /// conservation order when both are open.
    pub async fn open_windows(
        &self,
        states: &[String],
        date: NaiveDate,
    ) -> AppResult<HashMap<(String, Uuid), SeasonWindow>> {
        let rows = sqlx::query_as::<_, SeasonRow>(
            r#"
            SELECT state, species_id, name, start_date, end_date, bag_limit, is_conservation_order
            FROM seasons
            WHERE state = ANY($1) AND start_date <= $2 AND end_date >= $2
            ORDER BY state, species_id, is_conservation_order, start_date
            "#,
        )
        .bind(states)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        let mut windows = HashMap::new();
        for row in rows {
            windows
                .entry((row.state.clone(), row.species_id))
                .or_insert_with(|| SeasonWindow::from(row));
        }
        Ok(windows)
    }
}

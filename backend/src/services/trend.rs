//! Trend service: per-series delta computation over the survey store
//!
//! The same three-branch trend rule runs whether one series is pulled
//! for a detail view or latest-vs-prior pairs are pulled for a whole
//! region at once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::analytics::{classify_anomaly, classify_migration_status, compute_trend};
use shared::models::{
    AnomalyFlag, CountObservation, Location, MigrationStatus, Species, SpeciesCategory,
    SurveyRecord, SurveySource, SurveyType, TrendResult,
};
use shared::types::Coordinates;

use crate::error::{AppError, AppResult};

/// Trend service reading the external survey store
#[derive(Clone)]
pub struct TrendService {
    db: PgPool,
}

/// Trend for one (location, species) series with derived classifications
#[derive(Debug, Serialize)]
pub struct EnrichedTrend {
    pub location: Location,
    pub species: Species,
    pub trend: TrendResult,
    pub anomaly: AnomalyFlag,
    pub migration_status: MigrationStatus,
}

/// One region-wide series with its location and species context
#[derive(Debug, Clone, Serialize)]
pub struct LocationTrend {
    pub location_id: Uuid,
    pub location_name: String,
    pub location_type: String,
    pub state: String,
    pub flyway: String,
    #[serde(skip)]
    pub coordinates: Option<Coordinates>,
    pub species_id: Uuid,
    pub species: String,
    pub species_name: String,
    /// Date of the latest observation
    pub survey_date: NaiveDate,
    pub trend: TrendResult,
    pub anomaly: AnomalyFlag,
    pub migration_status: MigrationStatus,
}

#[derive(Debug, FromRow)]
struct CountRow {
    count: i64,
    survey_date: NaiveDate,
}

#[derive(Debug, FromRow)]
struct LocationRow {
    id: Uuid,
    name: String,
    location_type: String,
    state: String,
    flyway: String,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
    is_aggregate: bool,
    survey_only: bool,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        let coordinates = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };
        Location {
            id: row.id,
            name: row.name,
            location_type: row.location_type,
            state: row.state,
            flyway: row.flyway,
            coordinates,
            is_aggregate: row.is_aggregate,
            survey_only: row.survey_only,
        }
    }
}

#[derive(Debug, FromRow)]
struct SpeciesRow {
    id: Uuid,
    slug: String,
    name: String,
    category: String,
}

impl SpeciesRow {
    fn into_species(self) -> AppResult<Species> {
        let category = SpeciesCategory::parse(&self.category).ok_or_else(|| {
            AppError::Internal(format!("Unknown species category: {}", self.category))
        })?;
        Ok(Species {
            id: self.id,
            slug: self.slug,
            name: self.name,
            category,
        })
    }
}

#[derive(Debug, FromRow)]
struct SurveyRecordRow {
    id: Uuid,
    location_id: Uuid,
    species_id: Uuid,
    count: i64,
    survey_date: NaiveDate,
    survey_type: String,
    source: String,
}

impl SurveyRecordRow {
    fn into_record(self) -> AppResult<SurveyRecord> {
        let survey_type = SurveyType::parse(&self.survey_type).ok_or_else(|| {
            AppError::Internal(format!("Unknown survey type: {}", self.survey_type))
        })?;
        let source = SurveySource::parse(&self.source)
            .ok_or_else(|| AppError::Internal(format!("Unknown survey source: {}", self.source)))?;
        Ok(SurveyRecord {
            id: self.id,
            location_id: self.location_id,
            species_id: self.species_id,
            count: self.count,
            survey_date: self.survey_date,
            survey_type,
            source,
        })
    }
}

#[derive(Debug, FromRow)]
struct SeriesRow {
    location_id: Uuid,
    location_name: String,
    location_type: String,
    state: String,
    flyway: String,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
    species_id: Uuid,
    species: String,
    species_name: String,
    count: i64,
    survey_date: NaiveDate,
    rn: i64,
}

impl CountRow {
    fn observation(&self) -> CountObservation {
        CountObservation {
            count: self.count,
            survey_date: self.survey_date,
        }
    }
}

impl SeriesRow {
    fn observation(&self) -> CountObservation {
        CountObservation {
            count: self.count,
            survey_date: self.survey_date,
        }
    }
}

impl TrendService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Trend for one (location, species) series: latest observation
    /// against the prior one
    pub async fn get_trend(&self, location_id: Uuid, species_slug: &str) -> AppResult<EnrichedTrend> {
        let species = self.get_species(species_slug).await?;
        let location = self.get_location(location_id).await?;

        let rows = sqlx::query_as::<_, CountRow>(
            r#"
            SELECT count, survey_date
            FROM survey_records
            WHERE location_id = $1 AND species_id = $2
            ORDER BY survey_date DESC
            LIMIT 2
            "#,
        )
        .bind(location_id)
        .bind(species.id)
        .fetch_all(&self.db)
        .await?;

        let current = rows
            .first()
            .ok_or_else(|| AppError::NotFound("Survey record".to_string()))?;
        let previous = rows.get(1).map(|r| r.observation());

        let trend = compute_trend(&current.observation(), previous.as_ref());
        let anomaly = classify_anomaly(&trend);
        let migration_status = classify_migration_status(&trend);

        Ok(EnrichedTrend {
            location,
            species,
            trend,
            anomaly,
            migration_status,
        })
    }

    /// Flat ordered series for one (location, species), newest first
    pub async fn get_series(
        &self,
        location_id: Uuid,
        species_slug: &str,
        limit: i64,
    ) -> AppResult<Vec<SurveyRecord>> {
        let species = self.get_species(species_slug).await?;
        self.get_location(location_id).await?;

        let rows = sqlx::query_as::<_, SurveyRecordRow>(
            r#"
            SELECT id, location_id, species_id, count, survey_date, survey_type, source
            FROM survey_records
            WHERE location_id = $1 AND species_id = $2
            ORDER BY survey_date DESC
            LIMIT $3
            "#,
        )
        .bind(location_id)
        .bind(species.id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|row| row.into_record()).collect()
    }

    async fn get_species(&self, slug: &str) -> AppResult<Species> {
        let row = sqlx::query_as::<_, SpeciesRow>(
            "SELECT id, slug, name, category FROM species WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Species".to_string()))?;
        row.into_species()
    }

    async fn get_location(&self, location_id: Uuid) -> AppResult<Location> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT id, name, location_type, state, flyway, latitude, longitude,
                   is_aggregate, survey_only
            FROM locations
            WHERE id = $1
            "#,
        )
        .bind(location_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Location".to_string()))?;
        Ok(Location::from(row))
    }

    /// Batched variant: one trend per (location, species) pair across a
    /// region, from latest-vs-prior pairs fetched in a single query.
    ///
    /// Statewide roll-up locations are always excluded so regional
    /// aggregates do not double count; `huntable_only` additionally
    /// drops survey-only locations for the ranker.
    ///
    /// Output is ordered by location name then species slug so results
    /// are deterministic regardless of store iteration order.
    pub async fn get_region_trends(
        &self,
        states: &[String],
        species_slug: Option<&str>,
        huntable_only: bool,
    ) -> AppResult<Vec<LocationTrend>> {
        let rows = sqlx::query_as::<_, SeriesRow>(
            r#"
            SELECT t.location_id, t.location_name, t.location_type, t.state, t.flyway,
                   t.latitude, t.longitude,
                   t.species_id, t.species, t.species_name, t.count, t.survey_date, t.rn
            FROM (
                SELECT l.id AS location_id, l.name AS location_name, l.location_type,
                       l.state, l.flyway, l.latitude, l.longitude,
                       s.id AS species_id, s.slug AS species, s.name AS species_name,
                       sr.count, sr.survey_date,
                       ROW_NUMBER() OVER (
                           PARTITION BY sr.location_id, sr.species_id
                           ORDER BY sr.survey_date DESC
                       ) AS rn
                FROM survey_records sr
                JOIN locations l ON l.id = sr.location_id
                JOIN species s ON s.id = sr.species_id
                WHERE l.state = ANY($1)
                  AND NOT l.is_aggregate
                  AND (NOT $2 OR NOT l.survey_only)
                  AND ($3::text IS NULL OR s.slug = $3)
            ) t
            WHERE t.rn <= 2
            ORDER BY t.location_name, t.species, t.location_id, t.species_id, t.rn
            "#,
        )
        .bind(states)
        .bind(huntable_only)
        .bind(species_slug)
        .fetch_all(&self.db)
        .await?;

        Ok(pair_series(rows))
    }
}

/// Fold ordered (rn 1, rn 2) rows into one trend per series. The rn 2
/// row, when present, is the prior observation of the rn 1 row just
/// before it.
fn pair_series(rows: Vec<SeriesRow>) -> Vec<LocationTrend> {
    let mut trends = Vec::new();
    let mut rows = rows.into_iter().peekable();

    while let Some(current) = rows.next() {
        if current.rn != 1 {
            continue;
        }
        let has_prior = matches!(
            rows.peek(),
            Some(next) if next.rn == 2
                && next.location_id == current.location_id
                && next.species_id == current.species_id
        );
        let previous = if has_prior {
            rows.next().map(|r| r.observation())
        } else {
            None
        };

        let trend = compute_trend(&current.observation(), previous.as_ref());
        let anomaly = classify_anomaly(&trend);
        let migration_status = classify_migration_status(&trend);

        let coordinates = match (current.latitude, current.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };

        trends.push(LocationTrend {
            location_id: current.location_id,
            location_name: current.location_name,
            location_type: current.location_type,
            state: current.state,
            flyway: current.flyway,
            coordinates,
            species_id: current.species_id,
            species: current.species,
            species_name: current.species_name,
            survey_date: current.survey_date,
            trend,
            anomaly,
            migration_status,
        });
    }

    trends
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Trend;

    fn row(name: &str, slug: &str, ids: (Uuid, Uuid), count: i64, day: u32, rn: i64) -> SeriesRow {
        SeriesRow {
            location_id: ids.0,
            location_name: name.to_string(),
            location_type: "refuge".to_string(),
            state: "TX".to_string(),
            flyway: "central".to_string(),
            latitude: None,
            longitude: None,
            species_id: ids.1,
            species: slug.to_string(),
            species_name: slug.to_string(),
            count,
            survey_date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            rn,
        }
    }

    #[test]
    fn pairs_latest_with_prior_per_series() {
        let a = (Uuid::new_v4(), Uuid::new_v4());
        let b = (Uuid::new_v4(), Uuid::new_v4());
        let rows = vec![
            row("Anahuac", "mallard", a, 1300, 15, 1),
            row("Anahuac", "mallard", a, 1000, 8, 2),
            row("Hagerman", "mallard", b, 400, 15, 1),
        ];

        let trends = pair_series(rows);
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].trend.trend, Trend::Increasing);
        assert_eq!(trends[0].trend.previous_count, Some(1000));
        assert_eq!(trends[1].trend.trend, Trend::New);
        assert_eq!(trends[1].trend.previous_count, None);
    }

    #[test]
    fn does_not_pair_across_series() {
        let a = (Uuid::new_v4(), Uuid::new_v4());
        let b = (a.0, Uuid::new_v4());
        // Two species at the same location, each with one record
        let rows = vec![
            row("Anahuac", "mallard", a, 500, 15, 1),
            row("Anahuac", "pintail", b, 300, 15, 1),
        ];

        let trends = pair_series(rows);
        assert_eq!(trends.len(), 2);
        assert!(trends.iter().all(|t| t.trend.trend == Trend::New));
    }
}

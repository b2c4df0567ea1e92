//! Migration service: regional movement direction, intensity index,
//! and the cached regional summary

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use shared::analytics::{migration_index, movement_direction, overall_push_score};
use shared::models::{AnomalyFlag, MigrationIndex, MovementDirection, PushFactor, Trend, TrendResult};

use crate::error::AppResult;
use crate::services::{PushFactorService, TrendService};

/// Regional summary time-to-live when none is configured
const DEFAULT_SUMMARY_TTL: Duration = Duration::from_secs(900);

/// Migration service aggregating region-wide trends and push signals
#[derive(Clone)]
pub struct MigrationService {
    trends: TrendService,
    push: PushFactorService,
    cache: Arc<RwLock<HashMap<String, CachedSummary>>>,
    ttl: Duration,
}

/// Aggregate regional migration picture
#[derive(Debug, Clone, Serialize)]
pub struct RegionalSummary {
    pub states: Vec<String>,
    pub series_count: usize,
    pub increasing: usize,
    pub decreasing: usize,
    pub stable: usize,
    pub new_series: usize,
    pub spike_count: usize,
    pub drop_count: usize,
    pub overall_push_score: i32,
    pub migration_index: MigrationIndex,
    pub movement_direction: Option<MovementDirection>,
    pub push_factors: Vec<PushFactor>,
    pub computed_at: DateTime<Utc>,
}

#[derive(Clone)]
struct CachedSummary {
    summary: RegionalSummary,
    expires_at: Instant,
}

impl MigrationService {
    pub fn new(db: PgPool) -> Self {
        Self {
            trends: TrendService::new(db.clone()),
            push: PushFactorService::new(db),
            cache: Arc::new(RwLock::new(HashMap::new())),
            ttl: DEFAULT_SUMMARY_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Regional summary for a set of states. Served from the cache
    /// when fresh; `force_refresh` recomputes and replaces the entry.
    pub async fn regional_summary(
        &self,
        states: &[String],
        force_refresh: bool,
    ) -> AppResult<RegionalSummary> {
        let mut states: Vec<String> = states.to_vec();
        states.sort();
        states.dedup();
        let cache_key = states.join(",");

        if !force_refresh {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(&cache_key) {
                if entry.expires_at > Instant::now() {
                    return Ok(entry.summary.clone());
                }
            }
        }

        let summary = self.compute_summary(&states).await?;

        let mut cache = self.cache.write().await;
        cache.insert(
            cache_key,
            CachedSummary {
                summary: summary.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );

        Ok(summary)
    }

    async fn compute_summary(&self, states: &[String]) -> AppResult<RegionalSummary> {
        // The two reads are independent; issue them together
        let (trends, push_factors) = tokio::join!(
            self.trends.get_region_trends(states, None, false),
            self.push.latest_for_states(states)
        );
        let trends = trends?;
        let push_factors = push_factors?;

        let series: Vec<TrendResult> = trends.iter().map(|t| t.trend.clone()).collect();
        let overall = overall_push_score(&push_factors);

        let count_of = |wanted: Trend| series.iter().filter(|t| t.trend == wanted).count();

        Ok(RegionalSummary {
            states: states.to_vec(),
            series_count: series.len(),
            increasing: count_of(Trend::Increasing),
            decreasing: count_of(Trend::Decreasing),
            stable: count_of(Trend::Stable),
            new_series: count_of(Trend::New),
            spike_count: trends
                .iter()
                .filter(|t| t.anomaly == AnomalyFlag::Spike)
                .count(),
            drop_count: trends
                .iter()
                .filter(|t| t.anomaly == AnomalyFlag::Drop)
                .count(),
            overall_push_score: overall,
            migration_index: migration_index(&series, overall),
            movement_direction: movement_direction(&series, &push_factors),
            push_factors,
            computed_at: Utc::now(),
        })
    }
}

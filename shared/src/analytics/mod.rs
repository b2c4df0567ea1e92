//! Pure analytics core: trend deltas, anomaly detection, migration
//! classification, regional aggregation, and opportunity scoring.
//!
//! Everything here is a pure function of its inputs so the same rules
//! apply whether a series arrives as a flat ordered list or as a
//! latest-vs-prior pairing across many groups.

pub mod index;
pub mod movement;
pub mod scoring;
pub mod trend;

pub use index::{migration_index, overall_push_score};
pub use movement::movement_direction;
pub use scoring::{rank_recommendations, score_candidate, ScoringInputs};
pub use trend::{classify_anomaly, classify_migration_status, compute_trend};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero, the rounding every scoring formula uses
pub(crate) fn round_half_up(value: Decimal) -> i32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}

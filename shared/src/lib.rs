//! Shared types and analytics for the HuntStack migration platform
//!
//! This crate contains the domain models and the pure analytics core
//! (trend deltas, anomaly detection, migration classification, index
//! aggregation, opportunity scoring) shared between the backend and
//! other components of the system. Nothing in here performs I/O.

pub mod analytics;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;

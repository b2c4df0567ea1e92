//! Models for the HuntStack migration analytics service
//!
//! Re-exports models from the shared crate

pub use shared::models::*;

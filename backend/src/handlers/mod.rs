//! HTTP handlers for the HuntStack migration analytics service

pub mod health;
pub mod migration;
pub mod opportunity;
pub mod trend;

pub use health::*;
pub use migration::*;
pub use opportunity::*;
pub use trend::*;

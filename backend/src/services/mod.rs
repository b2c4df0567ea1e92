//! Business logic services for the HuntStack migration analytics service

pub mod migration;
pub mod opportunity;
pub mod push;
pub mod season;
pub mod trend;

pub use migration::MigrationService;
pub use opportunity::OpportunityService;
pub use push::PushFactorService;
pub use season::SeasonService;
pub use trend::TrendService;

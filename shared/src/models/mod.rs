//! Domain models for the HuntStack migration platform

pub mod conditions;
pub mod location;
pub mod migration;
pub mod push;
pub mod recommendation;
pub mod season;
pub mod species;
pub mod survey;
pub mod trend;

pub use conditions::*;
pub use location::*;
pub use migration::*;
pub use push::*;
pub use recommendation::*;
pub use season::*;
pub use species::*;
pub use survey::*;
pub use trend::*;

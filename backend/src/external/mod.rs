//! External API integrations

pub mod conditions;

pub use conditions::ConditionsClient;

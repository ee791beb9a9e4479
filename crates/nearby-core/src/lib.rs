use thiserror::Error;

pub mod app_config;
pub mod business;
pub mod config;
pub mod listing;

pub use app_config::AppConfig;
pub use business::{Business, Coordinate};
pub use listing::{BusinessListing, PageRequest, SearchBusinesses, SearchOptions, SortMode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

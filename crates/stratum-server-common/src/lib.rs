// Shared server infrastructure for Stratum
//
// This crate provides the plumbing every service built on Stratum needs:
//
// - Configuration (env + optional config file, connection construction)
// - AppState (central application state)
// - Logging initialization (console + rolling file)
// - Error responses (AppError with actix-web integration)

pub mod error;
pub mod model;
pub mod startup;

// Re-export common types for convenience
pub use stratum_common::{StratumError, sha256_hex};

// Re-export model types
pub use model::{AppState, Configuration};

// Re-export error wrapper
pub use error::AppError;

// Re-export logging entry points
pub use startup::logging::{LoggingConfig, LoggingGuard, init_logging};

//! Error types for Stratum
//!
//! This module defines `StratumError`, the application-specific error enum
//! shared by every crate in the workspace. The web layer maps each variant
//! to an HTTP status code via [`StratumError::status_code`].

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum StratumError {
    #[error("{0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("not-null constraint violated: {0}")]
    NotNullConstraint(String),

    #[error("unique constraint violated: {0}")]
    UniqueConstraint(String),

    #[error("identity provider unreachable: {0}")]
    IdpConnection(String),

    #[error("broker connection failed: {0}")]
    BrokerConnection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl StratumError {
    /// HTTP status code the variant maps to at the web boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            StratumError::NotFound(_) => 404,
            StratumError::InvalidData(_) => 400,
            StratumError::Authentication(_) => 401,
            StratumError::NotNullConstraint(_) => 400,
            StratumError::UniqueConstraint(_) => 400,
            StratumError::IdpConnection(_) => 502,
            StratumError::BrokerConnection(_) => 500,
            StratumError::Database(_) => 500,
            StratumError::Config(_) => 500,
            StratumError::Internal(_) => 500,
        }
    }

    /// Shortcut for the common "object not found" case.
    pub fn not_found(what: impl Into<String>) -> Self {
        StratumError::NotFound(what.into())
    }
}

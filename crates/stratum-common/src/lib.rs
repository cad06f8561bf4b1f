//! Stratum Common - Shared error types, digests, and utilities
//!
//! This crate provides the foundational types used across all Stratum components:
//! - Error types with HTTP status mapping
//! - SHA-256 / HMAC-SHA-256 digest helpers
//! - Small shared utilities

pub mod crypto;
pub mod error;
pub mod utils;

// Re-exports for convenience
pub use crypto::{hmac_sha256_hex, sha256_hex};
pub use error::StratumError;
pub use utils::display_name;

/// Broker channel on which account notifications are published when no
/// channel is configured.
pub const DEFAULT_NOTIFY_CHANNEL: &str = "stratum.notify.account";

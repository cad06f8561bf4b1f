//! Stratum Auth - Accounts, access tokens, and permissions
//!
//! This crate owns the account domain shared by all services:
//! - Account read models and query services
//! - JWT access tokens with cached decoding, persisted fingerprints,
//!   and revocation
//! - Role and permission model
//! - Account notifications

pub mod model;
pub mod service;

pub use model::{AccountInfo, AccountProfile, ApiPermission, AuthContext, JwtClaims, Role};

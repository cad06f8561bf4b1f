//! Stratum API - Shared wire-level models and input validation
//!
//! This crate defines the types that cross the HTTP and websocket
//! boundaries of services built on Stratum:
//! - Status messages pushed to frontends
//! - Pagination envelope
//! - Lookup schemas for dropdowns
//! - Field validation and upload verification

pub mod model;
pub mod upload;
pub mod validation;

pub use model::{AccountLookup, AlertSeverity, Page, StatusMessage};
pub use upload::{FileKind, verify_png_upload, verify_upload, verify_xlsx_upload};

//! Stratum Persistence - Database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity definitions for the shared data model
//! - Schema setup and teardown derived from the entities
//! - Managed database objects (functions, triggers, views)
//! - Static seed data import (countries)

pub mod entity;
pub mod model;
pub mod objects;
pub mod setup;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;

// Re-export model types
pub use model::{CountryInfo, CountryLoad, CountryLookup};

// Re-export setup entry points
pub use setup::{InitOptions, init_db};

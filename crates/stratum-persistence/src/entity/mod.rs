//! SeaORM entities for the shared data model

pub mod access_token;
pub mod account;
pub mod country;
pub mod data_grid;
pub mod data_grid_filter;
pub mod notification;

pub mod prelude;

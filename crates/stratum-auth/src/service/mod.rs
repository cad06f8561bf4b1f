//! Account, token, and notification services

pub mod account;
pub mod notification;
pub mod token;

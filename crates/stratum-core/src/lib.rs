//! Stratum Core - Realtime push and broker messaging
//!
//! This crate provides:
//! - `PushManager`: the registry of active realtime connections, keyed by
//!   account, used to fan out status messages to frontends
//! - `Broker`: Redis-backed publish/subscribe used to relay account
//!   notifications between service instances

pub mod broker;
pub mod model;
pub mod push;

pub use broker::Broker;
pub use model::AccountNotice;
pub use push::PushManager;

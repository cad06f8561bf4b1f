//! Service startup helpers

pub mod logging;

//! Common utilities and shared functionality
//!
//! Numeric helpers, the generator trait and the configuration loader used
//! across the engine.

pub mod types;
pub mod config;
pub mod traits;

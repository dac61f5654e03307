//! # Social Server Library
//!
//! Composition root of the Social user service: wires configuration,
//! store, validator, service and router together and serves them.

pub mod app;
pub mod logging;
pub mod startup;

pub use app::Application;

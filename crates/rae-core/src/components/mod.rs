//! Components
//!
//! Agent state and per-cohort parameters.

pub mod agent;

pub use agent::*;

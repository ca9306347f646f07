//! Setup
//!
//! Population construction.

pub mod population;

pub use population::*;

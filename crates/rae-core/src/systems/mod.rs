//! Round Systems
//!
//! The per-iteration pipeline: noise, service exchange, trust aggregation, and bisection.

pub mod noise;
pub mod exchange;
pub mod aggregate;
pub mod bisect;

// Re-export commonly used systems
pub use noise::power_draw;
pub use exchange::{run_round, sample_suppliers};
pub use aggregate::{new_reception_estimate, reception_estimates};
pub use bisect::{two_means, Bisection, MAX_KMEANS_ITERATIONS};

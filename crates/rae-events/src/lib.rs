//! Shared exchange types and serialization for the trust simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod entry;
pub mod snapshot;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export entry types
pub use entry::{AgentId, AgentMode, ReportEntry};

// Re-export snapshot types
pub use snapshot::{AgentSnapshot, IterationRow, PopulationSnapshot};

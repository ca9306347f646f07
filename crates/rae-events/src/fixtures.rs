//! Sample data fixtures for testing.
//!
//! This module provides ready-made entry sets for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // rae-events = { path = "../rae-events", features = ["test-fixtures"] }
//!
//! use rae_events::fixtures;
//!
//! let modes = fixtures::two_by_two_modes();
//! let entries = fixtures::exploitative_round();
//! ```

use crate::{AgentId, AgentMode, ReportEntry};

/// Modes for a four-agent population: agents 0-1 honest, 2-3 strategic.
pub fn two_by_two_modes() -> Vec<AgentMode> {
    vec![
        AgentMode::Honest,
        AgentMode::Honest,
        AgentMode::Strategic,
        AgentMode::Strategic,
    ]
}

/// A round over [`two_by_two_modes`] where honest suppliers give strategic
/// receivers uniformly more than strategic suppliers give honest receivers.
///
/// Contains 12 entries (every agent served by every other agent):
/// - honest -> strategic answers: 0.8, 0.9, 0.7, 0.85
/// - strategic -> honest answers: 0.2, 0.1, 0.3, 0.15
/// - in-group answers: 0.5
pub fn exploitative_round() -> Vec<ReportEntry> {
    let e = |s: usize, r: usize, answer: f64| ReportEntry::new(AgentId(s), AgentId(r), answer, answer * 0.5);
    vec![
        // honest -> strategic
        e(0, 2, 0.8),
        e(0, 3, 0.9),
        e(1, 2, 0.7),
        e(1, 3, 0.85),
        // strategic -> honest
        e(2, 0, 0.2),
        e(2, 1, 0.1),
        e(3, 0, 0.3),
        e(3, 1, 0.15),
        // in-group
        e(0, 1, 0.5),
        e(1, 0, 0.5),
        e(2, 3, 0.5),
        e(3, 2, 0.5),
    ]
}

/// Same shape as [`exploitative_round`] with identical answers everywhere.
pub fn uniform_round(answer: f64) -> Vec<ReportEntry> {
    exploitative_round()
        .into_iter()
        .map(|entry| ReportEntry::new(entry.supplier_id, entry.receiver_id, answer, answer))
        .collect()
}

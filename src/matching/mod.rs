//! Matching subsystem.
//!
//! # Data Flow
//! ```text
//! FrontendCallRecord[] + RouteRecord[]
//!     → matcher.rs (per-call tier search: exact → parameter → normalized)
//!     → normalizer.rs (canonical path forms for the last tier)
//!     → AggregateMatchReport (matched, unmatched sets, statistics)
//! ```
//!
//! # Design Decisions
//! - Deterministic: same inputs always produce the same report
//! - First hit wins within a tier; tiers are ordered by confidence
//! - Plain sequential scans; route counts do not justify index structures

pub mod matcher;
pub mod normalizer;

pub use matcher::{
    match_routes, AggregateMatchReport, ConfidenceTier, MatchResult, MatchStatistics,
};
pub use normalizer::normalize;

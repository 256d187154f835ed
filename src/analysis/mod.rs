//! Analysis subsystem.
//!
//! # Data Flow
//! ```text
//! RouteRecord[] ──────────────→ duplicates.rs → DuplicateGroup[]
//! unmatched frontend/backend ─→ mismatch.rs  → {by_reason, statistics}
//!                                            → MismatchSuggestion[] (ranked)
//! ```
//!
//! # Design Decisions
//! - Both passes are pure over their inputs; nothing here touches I/O
//! - Duplicate detection keys on the registered path, suggestion ranking
//!   on the normalized one: different questions, different keys

pub mod duplicates;
pub mod mismatch;

pub use duplicates::{detect_duplicates, DuplicateGroup, Severity};
pub use mismatch::{
    analyze_unmatched, suggest_matches, MismatchAnalysis, MismatchReason, MismatchStatistics,
    MismatchSuggestion,
};

//! Audit orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! Discovery (backend collector ∥ frontend scanner, joined)
//!     → Matching (tiered reconciliation)
//!     → Analysis (duplicates, mismatch reasons, suggestions)
//!     → Reporting (aggregate handed to external renderers)
//!
//! Side channels:
//!     events.rs  → progress + phase-complete listeners
//!     cache.rs   → previous report for unchanged inputs
//!     errors()   → non-fatal problems recorded along the way
//! ```
//!
//! # Design Decisions
//! - Strictly sequential phases, no re-entry
//! - Only discovery failures abort; later phases degrade
//! - No cancellation below phase granularity

pub mod cache;
pub mod events;
pub mod orchestrator;

pub use events::{AuditEvent, AuditPhase, EventBus};
pub use orchestrator::{AuditError, AuditOrchestrator, AuditReport, StoreVerifier};

//! Route Discovery & Reconciliation Engine

pub mod analysis;
pub mod audit;
pub mod config;
pub mod discovery;
pub mod matching;
pub mod report;

pub use audit::{AuditOrchestrator, AuditReport};
pub use config::AuditConfig;
pub use discovery::{FrontendCallRecord, RouteRecord, RouteTree};
pub use matching::AggregateMatchReport;

//! Progress event publication.
//!
//! # Responsibilities
//! - Name the four audit phases
//! - Deliver progress and phase-completion events to registered listeners
//!
//! # Design Decisions
//! - Plain synchronous dispatch in registration order; no parallelism is
//!   implied by events
//! - Listeners are infallible closures; a listener that needs to fail
//!   should record state of its own

use serde::{Deserialize, Serialize};

/// The four sequential phases of an audit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditPhase {
    Discovery,
    Matching,
    Analysis,
    Reporting,
}

impl std::fmt::Display for AuditPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AuditPhase::Discovery => "discovery",
            AuditPhase::Matching => "matching",
            AuditPhase::Analysis => "analysis",
            AuditPhase::Reporting => "reporting",
        };
        f.write_str(name)
    }
}

/// One observable step of an audit run.
#[derive(Debug, Clone)]
pub enum AuditEvent {
    /// A finer step inside a phase.
    Progress { phase: AuditPhase, message: String },

    /// A phase ran to completion.
    PhaseComplete { phase: AuditPhase, summary: String },
}

type Listener = Box<dyn Fn(&AuditEvent) + Send + Sync>;

/// Synchronous publish/subscribe fan-out for audit events.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are invoked in registration order.
    pub fn subscribe(&mut self, listener: impl Fn(&AuditEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Dispatch one event to every listener, synchronously.
    pub fn emit(&self, event: AuditEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    pub fn progress(&self, phase: AuditPhase, message: impl Into<String>) {
        self.emit(AuditEvent::Progress {
            phase,
            message: message.into(),
        });
    }

    pub fn phase_complete(&self, phase: AuditPhase, summary: impl Into<String>) {
        self.emit(AuditEvent::PhaseComplete {
            phase,
            summary: summary.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn listeners_receive_events_in_registration_order() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let first = seen.clone();
        bus.subscribe(move |_| {
            first.fetch_add(1, Ordering::SeqCst);
        });
        let second = seen.clone();
        bus.subscribe(move |_| {
            second.fetch_add(10, Ordering::SeqCst);
        });

        bus.progress(AuditPhase::Discovery, "walking tree");
        assert_eq!(seen.load(Ordering::SeqCst), 11);
    }
}

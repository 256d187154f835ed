//! Audit run orchestration.
//!
//! # Responsibilities
//! - Sequence the four phases: Discovery → Matching → Analysis → Reporting
//! - Join backend and frontend discovery before matching starts
//! - Contain non-fatal phase errors as partial results
//!
//! # Design Decisions
//! - Discovery failure is fatal: matching without data is meaningless
//! - Matching/Analysis errors append to an internal list and the run
//!   degrades instead of aborting
//! - One orchestrator holds one in-flight run's state; concurrent `run`
//!   calls on the same instance are not isolated (documented limitation)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::duplicates::{detect_duplicates, DuplicateGroup};
use crate::analysis::mismatch::{
    analyze_unmatched, suggest_matches, MismatchAnalysis, MismatchSuggestion,
};
use crate::audit::cache::{content_fingerprint, RunCache};
use crate::audit::events::{AuditEvent, AuditPhase, EventBus};
use crate::config::schema::AuditConfig;
use crate::discovery::collector::BackendRouteCollector;
use crate::discovery::registry::ModuleRegistry;
use crate::discovery::tree::RouteTree;
use crate::discovery::types::{CallScanner, DiscoveryError, FrontendCallRecord, RouteRecord};
use crate::matching::matcher::{match_routes, AggregateMatchReport};

/// Errors surfaced by an audit run.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Fatal: a required discovery source was unreachable.
    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Non-fatal: the relational-store verification hook reported a
    /// problem. Recorded, run degrades.
    #[error("store verification failed: {0}")]
    Verification(String),

    /// Non-fatal: an analysis step reported a problem.
    #[error("analysis degraded: {0}")]
    Analysis(String),
}

/// External relational-store verifier (literal statement round-trips).
/// Only the seam is part of the engine.
pub trait StoreVerifier: Send + Sync {
    fn verify(&self) -> Result<(), String>;
}

/// Aggregate results of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub backend_routes: Vec<RouteRecord>,
    pub frontend_calls: Vec<FrontendCallRecord>,
    pub match_report: AggregateMatchReport,
    pub duplicates: Vec<DuplicateGroup>,
    pub mismatch_analysis: MismatchAnalysis,
    pub suggestions: Vec<MismatchSuggestion>,

    /// What discovery skipped, and why.
    pub skips: Vec<String>,

    /// Non-fatal errors recorded during the run.
    pub error_messages: Vec<String>,
}

/// Four-phase sequential audit pipeline.
pub struct AuditOrchestrator {
    config: AuditConfig,
    events: EventBus,
    errors: Vec<AuditError>,
    cache: RunCache,
    verifier: Option<Box<dyn StoreVerifier>>,
}

impl AuditOrchestrator {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            config,
            events: EventBus::new(),
            errors: Vec::new(),
            cache: RunCache::new(),
            verifier: None,
        }
    }

    /// Register a progress listener.
    pub fn subscribe(&mut self, listener: impl Fn(&AuditEvent) + Send + Sync + 'static) {
        self.events.subscribe(listener);
    }

    /// Plug in the external store verifier.
    pub fn set_verifier(&mut self, verifier: Box<dyn StoreVerifier>) {
        self.verifier = Some(verifier);
    }

    /// Non-fatal errors recorded by the most recent run.
    pub fn errors(&self) -> &[AuditError] {
        &self.errors
    }

    /// Execute one full audit run.
    pub async fn run(
        &mut self,
        live_tree: Option<&RouteTree>,
        registry: Option<&dyn ModuleRegistry>,
        scanner: &dyn CallScanner,
    ) -> Result<AuditReport, AuditError> {
        self.errors.clear();

        // Phase 1: Discovery. Backend and frontend proceed concurrently;
        // matching must not start until both complete.
        self.events
            .progress(AuditPhase::Discovery, "collecting backend routes");
        self.events
            .progress(AuditPhase::Discovery, "scanning frontend call sites");

        let collector = BackendRouteCollector::new(self.config.discovery.clone());
        let (backend, frontend) = tokio::join!(
            collector.collect(live_tree, registry),
            async { scanner.scan_api_calls() },
        );
        let backend = backend?;
        let frontend = frontend?;

        self.events.phase_complete(
            AuditPhase::Discovery,
            format!(
                "{} backend routes, {} frontend calls, {} skipped",
                backend.routes.len(),
                frontend.len(),
                backend.skips.len()
            ),
        );

        if self.config.orchestrator.cache_enabled {
            let fingerprint = content_fingerprint(&backend.routes, &frontend);
            if let Some(cached) = self.cache.lookup(&fingerprint) {
                tracing::info!("discovered content unchanged, reusing previous report");
                return Ok(cached.clone());
            }
        }

        // Phase 2: Matching.
        self.events.progress(
            AuditPhase::Matching,
            "reconciling frontend calls against backend routes",
        );
        let match_report = match_routes(&frontend, &backend.routes);
        self.events.phase_complete(
            AuditPhase::Matching,
            format!(
                "{} matched, {} unmatched frontend, {} unmatched backend",
                match_report.statistics.matched_count,
                match_report.unmatched_frontend.len(),
                match_report.unmatched_backend.len()
            ),
        );

        // Phase 3: Analysis.
        if self.config.orchestrator.skip_verification {
            tracing::debug!("store verification skipped by configuration");
        } else if let Some(verifier) = &self.verifier {
            self.events
                .progress(AuditPhase::Analysis, "verifying relational store");
            if let Err(detail) = verifier.verify() {
                tracing::warn!(error = %detail, "store verification failed, continuing");
                self.errors.push(AuditError::Verification(detail));
            }
        }

        self.events
            .progress(AuditPhase::Analysis, "detecting duplicate registrations");
        let duplicates = detect_duplicates(&backend.routes);

        self.events
            .progress(AuditPhase::Analysis, "classifying unmatched routes");
        let mismatch_analysis = analyze_unmatched(
            &match_report.unmatched_frontend,
            &match_report.unmatched_backend,
        );
        let suggestions = suggest_matches(
            &match_report.unmatched_frontend,
            &match_report.unmatched_backend,
            &self.config.matching,
        );
        self.events.phase_complete(
            AuditPhase::Analysis,
            format!(
                "{} duplicate groups, {} suggestions",
                duplicates.len(),
                suggestions.len()
            ),
        );

        // Phase 4: Reporting. The rendered output belongs to external
        // collaborators; the orchestrator assembles the aggregate.
        let report = AuditReport {
            match_report,
            duplicates,
            mismatch_analysis,
            suggestions,
            skips: backend.skips,
            error_messages: self.errors.iter().map(|e| e.to_string()).collect(),
            backend_routes: backend.routes,
            frontend_calls: frontend,
        };
        self.events.phase_complete(
            AuditPhase::Reporting,
            format!("{} non-fatal errors recorded", report.error_messages.len()),
        );

        if self.config.orchestrator.cache_enabled {
            let fingerprint =
                content_fingerprint(&report.backend_routes, &report.frontend_calls);
            self.cache.store(fingerprint, report.clone());
        }

        Ok(report)
    }
}

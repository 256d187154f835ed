//! Mismatch classification and ranked suggestions.
//!
//! # Responsibilities
//! - Explain each unmatched frontend call with the best reason available
//! - Rank plausible (frontend, backend) corrections by similarity
//!
//! # Design Decisions
//! - The method gate is hard: pairs with differing methods are never
//!   suggested, however similar their paths look
//! - Similarity is a weighted blend of segment-count closeness and
//!   literal-segment overlap, monotonic in both signals
//! - Output is capped to a configured top-N; the floor drops noise pairs

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::schema::MatchingConfig;
use crate::discovery::types::{FrontendCallRecord, RouteRecord};
use crate::matching::normalizer::{is_parameter_segment, normalize, strip_query};

/// Why an unmatched frontend call found no backend counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MismatchReason {
    /// No backend route shares the call's method at all.
    NoCandidate,
    /// A same-path-shape candidate exists under a different method.
    MethodMismatch,
    /// Same method exists, but every candidate differs in segment count.
    PathStructureMismatch,
    /// Same method and segment count, but parameter positions differ.
    ParameterCountMismatch,
}

/// Per-reason breakdown of unmatched frontend calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MismatchAnalysis {
    pub by_reason: BTreeMap<MismatchReason, Vec<FrontendCallRecord>>,
    pub statistics: MismatchStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchStatistics {
    pub total_unmatched_frontend: usize,
    pub total_unmatched_backend: usize,
    pub no_candidate: usize,
    pub method_mismatch: usize,
    pub path_structure_mismatch: usize,
    pub parameter_count_mismatch: usize,
}

/// One ranked candidate correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MismatchSuggestion {
    pub frontend: FrontendCallRecord,
    pub backend: RouteRecord,
    /// Within [0, 1].
    pub similarity: f64,
    pub reason: String,
    pub suggested_action: String,
}

/// Classify every unmatched frontend call.
pub fn analyze_unmatched(
    unmatched_frontend: &[FrontendCallRecord],
    unmatched_backend: &[RouteRecord],
) -> MismatchAnalysis {
    let mut analysis = MismatchAnalysis::default();
    analysis.statistics.total_unmatched_frontend = unmatched_frontend.len();
    analysis.statistics.total_unmatched_backend = unmatched_backend.len();

    for call in unmatched_frontend {
        let reason = classify(call, unmatched_backend);
        match reason {
            MismatchReason::NoCandidate => analysis.statistics.no_candidate += 1,
            MismatchReason::MethodMismatch => analysis.statistics.method_mismatch += 1,
            MismatchReason::PathStructureMismatch => {
                analysis.statistics.path_structure_mismatch += 1
            }
            MismatchReason::ParameterCountMismatch => {
                analysis.statistics.parameter_count_mismatch += 1
            }
        }
        analysis
            .by_reason
            .entry(reason)
            .or_default()
            .push(call.clone());
    }

    analysis
}

fn classify(call: &FrontendCallRecord, backend: &[RouteRecord]) -> MismatchReason {
    let same_method: Vec<&RouteRecord> = backend
        .iter()
        .filter(|r| r.method.eq_ignore_ascii_case(&call.method))
        .collect();

    if same_method.is_empty() {
        let call_shape = normalize(&call.full_path);
        let other_method_same_shape = backend
            .iter()
            .any(|r| normalize(&r.path) == call_shape);
        return if other_method_same_shape {
            MismatchReason::MethodMismatch
        } else {
            MismatchReason::NoCandidate
        };
    }

    let call_count = segment_count(&call.full_path);
    if !same_method
        .iter()
        .any(|r| segment_count(&r.path) == call_count)
    {
        return MismatchReason::PathStructureMismatch;
    }

    MismatchReason::ParameterCountMismatch
}

/// Rank plausible corrections for the unmatched sets.
pub fn suggest_matches(
    unmatched_frontend: &[FrontendCallRecord],
    unmatched_backend: &[RouteRecord],
    config: &MatchingConfig,
) -> Vec<MismatchSuggestion> {
    let mut suggestions = Vec::new();

    for call in unmatched_frontend {
        for route in unmatched_backend {
            // Hard gate: never suggest across methods.
            if !route.method.eq_ignore_ascii_case(&call.method) {
                continue;
            }
            let similarity = path_similarity(&call.full_path, &route.path);
            if similarity < config.min_similarity {
                continue;
            }
            suggestions.push(MismatchSuggestion {
                frontend: call.clone(),
                backend: route.clone(),
                similarity,
                reason: describe_pair(&call.full_path, &route.path),
                suggested_action: action_for_pair(&call.full_path, &route.path),
            });
        }
    }

    suggestions.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    suggestions.truncate(config.max_suggestions);
    suggestions
}

/// Weighted blend: 0.6 × segment-count closeness + 0.4 × literal overlap.
fn path_similarity(frontend_path: &str, backend_path: &str) -> f64 {
    let fe = segments(frontend_path);
    let be = segments(backend_path);

    let count_closeness = if fe.is_empty() && be.is_empty() {
        1.0
    } else {
        let max = fe.len().max(be.len()) as f64;
        let min = fe.len().min(be.len()) as f64;
        min / max
    };

    let fe_literals: HashSet<&str> = fe
        .iter()
        .copied()
        .filter(|&s| !is_parameter_segment(s))
        .collect();
    let be_literals: HashSet<&str> = be
        .iter()
        .copied()
        .filter(|&s| !is_parameter_segment(s))
        .collect();

    let literal_overlap = if fe_literals.is_empty() && be_literals.is_empty() {
        1.0
    } else {
        let shared = fe_literals.intersection(&be_literals).count() as f64;
        shared / fe_literals.len().max(be_literals.len()) as f64
    };

    0.6 * count_closeness + 0.4 * literal_overlap
}

fn describe_pair(frontend_path: &str, backend_path: &str) -> String {
    let fe = segment_count(frontend_path);
    let be = segment_count(backend_path);
    if fe != be {
        format!("segment counts differ ({fe} vs {be})")
    } else if normalize(frontend_path) == normalize(backend_path) {
        "paths agree after normalization".to_string()
    } else {
        "parameter positions or literals differ".to_string()
    }
}

fn action_for_pair(frontend_path: &str, backend_path: &str) -> String {
    let fe = segment_count(frontend_path);
    let be = segment_count(backend_path);
    match fe.cmp(&be) {
        Ordering::Greater => "register missing backend route or shorten the client path".into(),
        Ordering::Less => "extend the client path or retire the backend route".into(),
        Ordering::Equal => "rename parameter or align the differing segment".into(),
    }
}

fn segments(path: &str) -> Vec<&str> {
    strip_query(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

fn segment_count(path: &str) -> usize {
    segments(path).len()
}

//! Frontend-to-backend route reconciliation.
//!
//! # Responsibilities
//! - Match each frontend call against backend candidates of the same
//!   method in three confidence tiers
//! - Produce matched/unmatched sets and coverage statistics
//!
//! # Design Decisions
//! - Tiers are tried in order across all candidates; the first hit wins
//! - Backend routes are a non-exhausting candidate pool: several calls may
//!   legitimately hit one parameterized route
//! - `match_rate` is 0 exactly when no backend route exists (never NaN)

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::discovery::types::{FrontendCallRecord, RouteRecord};
use crate::matching::normalizer::{is_parameter_segment, normalize, strip_query};

/// How much normalization was required to establish a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceTier {
    /// Raw paths equal after query-string stripping only.
    Exact,
    /// Segment counts equal, each pair literal-equal or parameterized.
    ParameterMatch,
    /// Fully normalized forms equal.
    Normalized,
}

/// One reconciled (call, route) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub call: FrontendCallRecord,
    pub route: RouteRecord,
    pub tier: ConfidenceTier,
}

/// Coverage statistics for one matching pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub total_frontend: usize,
    pub total_backend: usize,
    pub matched_count: usize,
    pub match_rate: f64,
}

/// Full output of one matching pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMatchReport {
    pub matched: Vec<MatchResult>,
    pub unmatched_frontend: Vec<FrontendCallRecord>,
    pub unmatched_backend: Vec<RouteRecord>,
    pub statistics: MatchStatistics,
}

/// Reconcile frontend calls against backend routes.
pub fn match_routes(
    calls: &[FrontendCallRecord],
    routes: &[RouteRecord],
) -> AggregateMatchReport {
    let mut matched = Vec::new();
    let mut unmatched_frontend = Vec::new();
    let mut hit_routes: HashSet<usize> = HashSet::new();

    for call in calls {
        match find_match(call, routes) {
            Some((idx, tier)) => {
                hit_routes.insert(idx);
                matched.push(MatchResult {
                    call: call.clone(),
                    route: routes[idx].clone(),
                    tier,
                });
            }
            None => unmatched_frontend.push(call.clone()),
        }
    }

    let unmatched_backend: Vec<RouteRecord> = routes
        .iter()
        .enumerate()
        .filter(|(idx, _)| !hit_routes.contains(idx))
        .map(|(_, route)| route.clone())
        .collect();

    let matched_count = matched.len();
    let match_rate = if routes.is_empty() {
        0.0
    } else {
        matched_count as f64 / routes.len() as f64
    };

    AggregateMatchReport {
        matched,
        unmatched_frontend,
        unmatched_backend,
        statistics: MatchStatistics {
            total_frontend: calls.len(),
            total_backend: routes.len(),
            matched_count,
            match_rate,
        },
    }
}

fn find_match(
    call: &FrontendCallRecord,
    routes: &[RouteRecord],
) -> Option<(usize, ConfidenceTier)> {
    let candidates: Vec<usize> = routes
        .iter()
        .enumerate()
        .filter(|(_, route)| route.method.eq_ignore_ascii_case(&call.method))
        .map(|(idx, _)| idx)
        .collect();

    let call_path = strip_query(&call.full_path);

    for &idx in &candidates {
        if routes[idx].path == call_path {
            return Some((idx, ConfidenceTier::Exact));
        }
    }

    for &idx in &candidates {
        if segments_align(call_path, &routes[idx].path) {
            return Some((idx, ConfidenceTier::ParameterMatch));
        }
    }

    let call_normalized = normalize(&call.full_path);
    for &idx in &candidates {
        if normalize(&routes[idx].path) == call_normalized {
            return Some((idx, ConfidenceTier::Normalized));
        }
    }

    None
}

/// Tier-2 alignment: equal segment counts, and every segment pair either
/// matches literally or has a parameter on at least one side.
fn segments_align(call_path: &str, route_path: &str) -> bool {
    let call_segments = path_segments(call_path);
    let route_segments = path_segments(route_path);
    if call_segments.len() != route_segments.len() {
        return false;
    }
    call_segments
        .iter()
        .zip(route_segments.iter())
        .all(|(&c, &r)| c == r || is_parameter_segment(c) || is_parameter_segment(r))
}

// Raw split, empty segments preserved: a trailing-slash difference is a
// real tier-2 rejection and falls through to the normalized tier.
fn path_segments(path: &str) -> Vec<&str> {
    strip_query(path).split('/').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::types::RouteOrigin;

    fn route(method: &str, path: &str) -> RouteRecord {
        RouteRecord {
            method: method.to_string(),
            path: path.to_string(),
            handler_name: "handler".into(),
            middleware_names: vec![],
            module_name: None,
            origin: RouteOrigin::FrameworkDeclared,
            requires_auth: false,
            source_file: "unknown".into(),
        }
    }

    fn call(method: &str, path: &str) -> FrontendCallRecord {
        FrontendCallRecord {
            method: method.to_string(),
            full_path: path.to_string(),
            source_file: "app.js".into(),
            line_number: 1,
        }
    }

    #[test]
    fn exact_match_wins_first() {
        let report = match_routes(&[call("GET", "/api/users")], &[route("GET", "/api/users")]);
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].tier, ConfidenceTier::Exact);
    }

    #[test]
    fn query_string_does_not_break_exact_match() {
        let report = match_routes(
            &[call("GET", "/api/users?page=2")],
            &[route("GET", "/api/users")],
        );
        assert_eq!(report.matched[0].tier, ConfidenceTier::Exact);
    }

    #[test]
    fn literal_value_matches_parameter_segment() {
        let report = match_routes(
            &[call("GET", "/api/x/123")],
            &[route("GET", "/api/x/:id")],
        );
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].tier, ConfidenceTier::ParameterMatch);
    }

    #[test]
    fn method_comparison_is_case_insensitive() {
        let report = match_routes(&[call("get", "/api/users")], &[route("GET", "/api/users")]);
        assert_eq!(report.matched.len(), 1);
    }

    #[test]
    fn method_mismatch_never_matches() {
        let report = match_routes(&[call("POST", "/api/users")], &[route("GET", "/api/users")]);
        assert!(report.matched.is_empty());
        assert_eq!(report.unmatched_frontend.len(), 1);
        assert_eq!(report.unmatched_backend.len(), 1);
    }

    #[test]
    fn normalized_tier_catches_trailing_slash_variant() {
        // Tier 2 rejects the extra empty segment from the trailing slash;
        // the normalized forms are equal.
        let report = match_routes(
            &[call("GET", "/api/users/${id}/")],
            &[route("GET", "/api/users/:userId")],
        );
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].tier, ConfidenceTier::Normalized);
    }

    #[test]
    fn renamed_parameter_is_a_parameter_match() {
        let report = match_routes(
            &[call("GET", "/api/users/${id}")],
            &[route("GET", "/api/users/:userId")],
        );
        assert_eq!(report.matched[0].tier, ConfidenceTier::ParameterMatch);
    }

    #[test]
    fn backend_pool_is_non_exhausting() {
        let routes = [route("GET", "/api/users/:id")];
        let calls = [call("GET", "/api/users/1"), call("GET", "/api/users/2")];
        let report = match_routes(&calls, &routes);
        assert_eq!(report.matched.len(), 2);
        assert!(report.unmatched_backend.is_empty());
    }

    #[test]
    fn match_rate_is_zero_for_empty_backend() {
        let report = match_routes(&[call("GET", "/api/users")], &[]);
        assert_eq!(report.statistics.match_rate, 0.0);
        assert!(report.statistics.match_rate.is_finite());
    }

    #[test]
    fn duplicate_backend_routes_yield_single_match() {
        let routes = [route("GET", "/api/clients"), route("GET", "/api/clients")];
        let report = match_routes(&[call("GET", "/api/clients")], &routes);
        assert_eq!(report.matched.len(), 1);
    }

    #[test]
    fn full_crud_surface_reconciles_completely() {
        let routes = [
            route("GET", "/api/users"),
            route("POST", "/api/users"),
            route("PUT", "/api/users/:id"),
            route("DELETE", "/api/users/:id"),
        ];
        let calls = [
            call("GET", "/api/users"),
            call("POST", "/api/users"),
            call("PUT", "/api/users/:id"),
            call("DELETE", "/api/users/:id"),
        ];
        let report = match_routes(&calls, &routes);
        assert_eq!(report.matched.len(), 4);
        assert!(report.unmatched_frontend.is_empty());
        assert!(report.unmatched_backend.is_empty());
    }
}

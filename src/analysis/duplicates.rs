//! Duplicate route registration detection.
//!
//! # Responsibilities
//! - Group backend records by registration key (`METHOD:path`)
//! - Flag every re-registration of an already-seen key
//!
//! # Design Decisions
//! - The key uses the path as registered, not the canonicalized form:
//!   textually different but semantically identical paths are intentionally
//!   not flagged, to avoid false positives
//! - Groups are pairwise `[first seen, current]`; k registrations of one
//!   key produce k−1 overlapping groups
//! - Severity is fixed at High: two handlers competing for one route is
//!   always a defect

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::discovery::types::RouteRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    High,
}

/// One duplicated (method, path) registration pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub method: String,
    pub path: String,
    /// Exactly the first-seen registration and the colliding one.
    pub routes: [RouteRecord; 2],
    pub severity: Severity,
    pub message: String,
}

/// Single-pass duplicate detection over a backend route list.
pub fn detect_duplicates(routes: &[RouteRecord]) -> Vec<DuplicateGroup> {
    let mut first_seen: HashMap<String, &RouteRecord> = HashMap::new();
    let mut groups = Vec::new();

    for route in routes {
        let key = route.registration_key();
        match first_seen.get(key.as_str()) {
            Some(first) => {
                groups.push(DuplicateGroup {
                    method: route.method.to_uppercase(),
                    path: route.path.clone(),
                    routes: [(*first).clone(), route.clone()],
                    severity: Severity::High,
                    message: format!(
                        "{} {} is registered more than once ({} and {})",
                        route.method.to_uppercase(),
                        route.path,
                        first.handler_name,
                        route.handler_name
                    ),
                });
            }
            None => {
                first_seen.insert(key, route);
            }
        }
    }

    groups
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

    #[test]
    fn two_identical_registrations_form_one_group() {
        let routes = [route("GET", "/api/clients"), route("GET", "/api/clients")];
        let groups = detect_duplicates(&routes);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].severity, Severity::High);
        assert_eq!(groups[0].routes[0], routes[0]);
        assert_eq!(groups[0].routes[1], routes[1]);
    }

    #[test]
    fn three_identical_registrations_form_two_overlapping_groups() {
        let routes = [
            route("GET", "/api/x"),
            route("GET", "/api/x"),
            route("GET", "/api/x"),
        ];
        let groups = detect_duplicates(&routes);
        assert_eq!(groups.len(), 2);
        // Both groups anchor on the first-seen registration.
        assert_eq!(groups[0].routes[0], routes[0]);
        assert_eq!(groups[1].routes[0], routes[0]);
    }

    #[test]
    fn unique_registrations_produce_no_groups() {
        let routes = [
            route("GET", "/api/x"),
            route("POST", "/api/x"),
            route("GET", "/api/y"),
        ];
        assert!(detect_duplicates(&routes).is_empty());
    }

    #[test]
    fn method_comparison_is_case_insensitive() {
        let routes = [route("get", "/api/x"), route("GET", "/api/x")];
        assert_eq!(detect_duplicates(&routes).len(), 1);
    }

    #[test]
    fn per_method_grouping() {
        let routes = [
            route("GET", "/api/test"),
            route("GET", "/api/test"),
            route("POST", "/api/test"),
            route("POST", "/api/test"),
        ];
        let groups = detect_duplicates(&routes);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn semantically_equal_but_textually_different_paths_are_not_flagged() {
        let routes = [route("GET", "/api/x/:id"), route("GET", "/api/x/{id}")];
        assert!(detect_duplicates(&routes).is_empty());
    }
}

//! End-to-end tests for the audit pipeline.

use route_audit::analysis::detect_duplicates;
use route_audit::audit::AuditOrchestrator;
use route_audit::config::AuditConfig;
use route_audit::discovery::tree::RouteTree;
use route_audit::discovery::RouteOrigin;

mod common;
use common::{client_registry, compiled, frontend_call, mount, terminal, FixedScanner};

fn audit_config() -> AuditConfig {
    let mut config = AuditConfig::default();
    config.discovery.modules = vec!["clients".to_string()];
    config
}

#[tokio::test]
async fn full_pipeline_over_three_sources() {
    let live = RouteTree {
        nodes: vec![mount(
            &compiled("/api/status"),
            vec![terminal("/", &["GET"], &["statusHandler"])],
        )],
    };
    let registry = client_registry();

    let legacy_dir = tempfile::tempdir().unwrap();
    common::write_legacy_file(
        legacy_dir.path(),
        "reports",
        r#"
        [[nodes]]
        kind = "terminal"
        path_fragment = "/"
        methods = ["GET"]
        handler_chain = ["legacyReports"]
        "#,
    );

    let mut config = audit_config();
    config.discovery.legacy_route_dir =
        Some(legacy_dir.path().to_string_lossy().into_owned());
    config.discovery.legacy_modules = vec!["reports".to_string()];

    let scanner = FixedScanner(vec![
        frontend_call("GET", "/api/status"),
        frontend_call("GET", "/api/clients"),
        frontend_call("GET", "/api/clients/17"),
        frontend_call("GET", "/api/reports"),
        frontend_call("DELETE", "/api/clients/17"),
    ]);

    let mut orchestrator = AuditOrchestrator::new(config);
    let report = orchestrator
        .run(Some(&live), Some(&registry), &scanner)
        .await
        .unwrap();

    // 1 live + 3 modular + 1 legacy.
    assert_eq!(report.backend_routes.len(), 5);
    assert!(report
        .backend_routes
        .iter()
        .any(|r| r.path == "/api/reports" && r.origin == RouteOrigin::Legacy));
    assert!(report
        .backend_routes
        .iter()
        .any(|r| r.path == "/api/clients/:id" && r.requires_auth));

    // Four calls land; the DELETE has no backend counterpart.
    assert_eq!(report.match_report.statistics.matched_count, 4);
    assert_eq!(report.match_report.unmatched_frontend.len(), 1);
    assert_eq!(
        report.match_report.unmatched_frontend[0].method,
        "DELETE"
    );
    assert!(report.duplicates.is_empty());
    assert_eq!(report.mismatch_analysis.statistics.no_candidate, 1);
}

#[tokio::test]
async fn duplicate_registration_is_reported_once_and_still_matches() {
    // Backend registers GET /api/clients twice; one frontend call.
    let live = RouteTree {
        nodes: vec![
            terminal("/api/clients", &["GET"], &["listClients"]),
            terminal("/api/clients", &["GET"], &["listClientsAgain"]),
        ],
    };

    let scanner = FixedScanner(vec![frontend_call("GET", "/api/clients")]);
    let mut orchestrator = AuditOrchestrator::new(AuditConfig::default());
    let report = orchestrator
        .run(Some(&live), None, &scanner)
        .await
        .unwrap();

    assert_eq!(report.match_report.matched.len(), 1);
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(detect_duplicates(&report.backend_routes).len(), 1);
}

#[tokio::test]
async fn broken_legacy_file_degrades_to_partial_results() {
    let legacy_dir = tempfile::tempdir().unwrap();
    common::write_legacy_file(
        legacy_dir.path(),
        "good",
        r#"
        [[nodes]]
        kind = "terminal"
        path_fragment = "/"
        methods = ["GET"]
        handler_chain = ["goodHandler"]
        "#,
    );
    common::write_legacy_file(legacy_dir.path(), "broken", "[[nodes]] this is not toml");

    let mut config = AuditConfig::default();
    config.discovery.legacy_route_dir =
        Some(legacy_dir.path().to_string_lossy().into_owned());

    let scanner = FixedScanner(vec![frontend_call("GET", "/api/good")]);
    let mut orchestrator = AuditOrchestrator::new(config);
    let report = orchestrator.run(None, None, &scanner).await.unwrap();

    assert_eq!(report.backend_routes.len(), 1);
    assert_eq!(report.match_report.statistics.matched_count, 1);
    assert_eq!(report.skips.len(), 1);
    assert!(report.skips[0].contains("broken"));
}

#[tokio::test]
async fn suggestions_surface_renamed_parameter_pairs() {
    let live = RouteTree {
        nodes: vec![terminal(
            "/api/users/:userId/settings",
            &["PUT"],
            &["updateSettings"],
        )],
    };
    // Client misspells the collection segment, so no tier matches.
    let scanner = FixedScanner(vec![frontend_call("PUT", "/api/user/${id}/settings")]);

    let mut orchestrator = AuditOrchestrator::new(AuditConfig::default());
    let report = orchestrator
        .run(Some(&live), None, &scanner)
        .await
        .unwrap();

    assert!(report.match_report.matched.is_empty());
    assert_eq!(report.suggestions.len(), 1);
    let suggestion = &report.suggestions[0];
    assert_eq!(suggestion.frontend.method, "PUT");
    assert_eq!(suggestion.backend.path, "/api/users/:userId/settings");
    assert!(suggestion.similarity > 0.5);
}

#[tokio::test]
async fn mount_decoding_feeds_matching() {
    // Nested mounts with compiled prefixes reconstruct the full path the
    // frontend actually calls.
    let live = RouteTree {
        nodes: vec![mount(
            &compiled("/api"),
            vec![mount(
                &compiled("/invoices"),
                vec![terminal("/:id/pdf", &["GET"], &["renderPdf"])],
            )],
        )],
    };
    let scanner = FixedScanner(vec![frontend_call("GET", "/api/invoices/42/pdf")]);

    let mut orchestrator = AuditOrchestrator::new(AuditConfig::default());
    let report = orchestrator
        .run(Some(&live), None, &scanner)
        .await
        .unwrap();

    assert_eq!(report.backend_routes[0].path, "/api/invoices/:id/pdf");
    assert_eq!(report.match_report.statistics.matched_count, 1);
}

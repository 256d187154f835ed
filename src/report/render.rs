//! Report rendering (JSON and Markdown).
//!
//! Deliberately thin: the engine owns the aggregate results, the renderer
//! only formats them.

use std::fmt::Write;

use crate::audit::orchestrator::AuditReport;

/// Serialize the full report as pretty JSON.
pub fn render_json(report: &AuditReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Render a human-readable Markdown summary.
pub fn render_markdown(report: &AuditReport) -> String {
    let mut out = String::new();
    let stats = &report.match_report.statistics;

    let _ = writeln!(out, "# Route Audit Report\n");
    let _ = writeln!(out, "## Coverage\n");
    let _ = writeln!(out, "- Backend routes: {}", stats.total_backend);
    let _ = writeln!(out, "- Frontend calls: {}", stats.total_frontend);
    let _ = writeln!(
        out,
        "- Matched: {} ({:.1}% of backend)",
        stats.matched_count,
        stats.match_rate * 100.0
    );
    let _ = writeln!(out, "- Skipped during discovery: {}\n", report.skips.len());

    if !report.duplicates.is_empty() {
        let _ = writeln!(out, "## Duplicate registrations\n");
        for group in &report.duplicates {
            let _ = writeln!(out, "- **HIGH** {}", group.message);
        }
        let _ = writeln!(out);
    }

    if !report.match_report.unmatched_frontend.is_empty() {
        let _ = writeln!(out, "## Frontend calls with no backend route\n");
        for call in &report.match_report.unmatched_frontend {
            let _ = writeln!(
                out,
                "- `{} {}` ({}:{})",
                call.method, call.full_path, call.source_file, call.line_number
            );
        }
        let _ = writeln!(out);
    }

    if !report.match_report.unmatched_backend.is_empty() {
        let _ = writeln!(out, "## Backend routes with no caller\n");
        for route in &report.match_report.unmatched_backend {
            let _ = writeln!(out, "- `{} {}` ({})", route.method, route.path, route.handler_name);
        }
        let _ = writeln!(out);
    }

    if !report.suggestions.is_empty() {
        let _ = writeln!(out, "## Suggestions\n");
        for suggestion in &report.suggestions {
            let _ = writeln!(
                out,
                "- `{} {}` ↔ `{} {}` (similarity {:.2}): {}; {}",
                suggestion.frontend.method,
                suggestion.frontend.full_path,
                suggestion.backend.method,
                suggestion.backend.path,
                suggestion.similarity,
                suggestion.reason,
                suggestion.suggested_action
            );
        }
        let _ = writeln!(out);
    }

    if !report.skips.is_empty() {
        let _ = writeln!(out, "## Skipped during discovery\n");
        for skip in &report.skips {
            let _ = writeln!(out, "- {skip}");
        }
        let _ = writeln!(out);
    }

    if !report.error_messages.is_empty() {
        let _ = writeln!(out, "## Non-fatal errors\n");
        for error in &report.error_messages {
            let _ = writeln!(out, "- {error}");
        }
        let _ = writeln!(out);
    }

    out
}

/// Render the discovered route table (for the `routes` subcommand).
pub fn render_route_table(routes: &[crate::discovery::types::RouteRecord]) -> String {
    let mut out = String::new();
    for route in routes {
        let auth = if route.requires_auth { "auth" } else { "open" };
        let module = route.module_name.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{:7} {:40} {:20} [{:?}] {} {}",
            route.method, route.path, route.handler_name, route.origin, auth, module
        );
    }
    out
}

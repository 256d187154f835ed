//! Report rendering subsystem (thin collaborator over the audit results).

pub mod render;

pub use render::{render_json, render_markdown, render_route_table};

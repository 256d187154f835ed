//! Route Audit CLI
//!
//! Audits consistency between the server-side route registry and the set
//! of client call sites that invoke it.
//!
//! # Architecture Overview
//!
//! ```text
//!   live tree (TOML)  ──┐
//!   legacy route dir  ──┼─▶ discovery ──┐
//!   DI registry       ──┘               │ join
//!   scan manifest ──────▶ frontend ─────┘
//!                                        ▼
//!                                    matching (3 tiers)
//!                                        ▼
//!                        analysis (duplicates, mismatches, suggestions)
//!                                        ▼
//!                          reporting (JSON / Markdown)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use route_audit::audit::{AuditEvent, AuditOrchestrator};
use route_audit::config::{load_config, AuditConfig};
use route_audit::discovery::tree::RouteTree;
use route_audit::discovery::ManifestScanner;
use route_audit::report;

#[derive(Parser)]
#[command(name = "route-audit")]
#[command(about = "Audit backend routes against frontend call sites", long_about = None)]
struct Cli {
    /// Path to the audit configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full audit pipeline
    Audit {
        /// Serialized live routing tree (TOML).
        #[arg(long)]
        live_tree: Option<PathBuf>,

        /// Frontend scan manifest (JSON).
        #[arg(long)]
        scan_manifest: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value = "markdown")]
        format: OutputFormat,
    },
    /// Discover and print the canonical backend route table
    Routes {
        /// Serialized live routing tree (TOML).
        #[arg(long)]
        live_tree: Option<PathBuf>,
    },
    /// Validate the configuration file and exit
    CheckConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => AuditConfig::default(),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("route_audit={}", config.observability.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        modules = config.discovery.modules.len(),
        legacy_dir = config.discovery.legacy_route_dir.as_deref().unwrap_or("-"),
        "Configuration loaded"
    );

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: AuditConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Audit {
            live_tree,
            scan_manifest,
            format,
        } => {
            let tree = load_live_tree(live_tree.as_deref()).await?;
            let scanner = ManifestScanner::new(scan_manifest);

            let mut orchestrator = AuditOrchestrator::new(config);
            orchestrator.subscribe(|event| match event {
                AuditEvent::Progress { phase, message } => {
                    tracing::info!(phase = %phase, "{message}");
                }
                AuditEvent::PhaseComplete { phase, summary } => {
                    tracing::info!(phase = %phase, "phase complete: {summary}");
                }
            });

            let audit = orchestrator.run(tree.as_ref(), None, &scanner).await?;
            match format {
                OutputFormat::Markdown => println!("{}", report::render_markdown(&audit)),
                OutputFormat::Json => println!("{}", report::render_json(&audit)?),
            }
            Ok(())
        }
        Commands::Routes { live_tree } => {
            let tree = load_live_tree(live_tree.as_deref()).await?;
            let collector = route_audit::discovery::BackendRouteCollector::new(
                config.discovery.clone(),
            );
            let outcome = collector.collect(tree.as_ref(), None).await?;
            print!("{}", report::render_route_table(&outcome.routes));
            for skip in &outcome.skips {
                eprintln!("skipped: {skip}");
            }
            Ok(())
        }
        Commands::CheckConfig => {
            // load_config already validated; reaching here means it passed.
            println!("configuration OK");
            Ok(())
        }
    }
}

async fn load_live_tree(
    path: Option<&std::path::Path>,
) -> Result<Option<RouteTree>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let content = tokio::fs::read_to_string(path).await?;
            Ok(Some(toml::from_str(&content)?))
        }
        None => Ok(None),
    }
}

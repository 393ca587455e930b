use clap::Parser;
use tracing_subscriber::EnvFilter;

use sentryscan::assembly::Assembly;
use sentryscan::cli::{resolve, Cli, ResolvedAction};
use sentryscan::config;
use sentryscan::errors::ScanError;
use sentryscan::pipeline::WorkflowConfig;
use sentryscan::plugins::{PluginRegistry, PluginRegistryBuilder};
use sentryscan::reporting;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    tracing::debug!(
        build_timestamp = env!("BUILD_TIMESTAMP"),
        git_hash = option_env!("GIT_HASH").unwrap_or("unknown"),
        "sentryscan starting"
    );

    match run(cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

/// No plugins are compiled into this binary: the core ships no scanning or
/// detection logic of its own (spec Non-goals). Integrators link
/// `sentryscan` as a library and register their own plugins through
/// `PluginRegistryBuilder`; this binary demonstrates target parsing, the
/// advisory-dump format, and exit-code mapping against whatever registry
/// is wired in here.
fn bootstrap_registry() -> PluginRegistry {
    PluginRegistryBuilder::new().build()
}

async fn run(cli: Cli) -> Result<i32, ScanError> {
    let action = resolve(&cli)?;

    let mut workflow_config = WorkflowConfig::default();
    if let Some(path) = &cli.config {
        let engine_config = config::parse_config(path).await?;
        if let Some(pool_size) = engine_config.pool_size {
            workflow_config.pool_size = pool_size;
        }
        if let Some(timeout) = engine_config.plugin_timeout() {
            workflow_config.plugin_timeout = timeout;
        }
        workflow_config.scan_deadline = engine_config.scan_deadline();
        if let Some(grace) = engine_config.grace_period() {
            workflow_config.grace_period = grace;
        }
        workflow_config.include = engine_config.include;
        workflow_config.exclude = engine_config.exclude;
    }
    if let Some(include) = &cli.detectors_include {
        workflow_config.include = Some(include.iter().map(|s| s.trim().to_string()).collect());
    }
    if !cli.detectors_exclude.is_empty() {
        workflow_config.exclude = cli.detectors_exclude.iter().map(|s| s.trim().to_string()).collect();
    }

    let registry = bootstrap_registry();

    match action {
        ResolvedAction::DumpAdvisories(path) => {
            let dump = reporting::dump_advisories(&registry);
            tokio::fs::write(&path, dump)
                .await
                .map_err(|e| ScanError::Config(format!("failed writing {}: {e}", path.display())))?;
            Ok(0)
        }
        ResolvedAction::Scan { target, seed_services } => {
            let assembly = Assembly::bootstrap(registry, workflow_config);
            let results = assembly.workflow().run_with_seed(target, seed_services).await;
            println!("{}", results.status_message);
            for finding in &results.findings {
                println!(
                    "[{:?}] {} on {}",
                    finding.vulnerability.severity, finding.vulnerability.title, finding.service.endpoint
                );
            }
            Ok(results.status.exit_code())
        }
    }
}

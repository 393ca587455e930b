use std::path::PathBuf;

use clap::Parser;

/// Network vulnerability scanner plugin engine — scans one target through
/// the port-scan, fingerprint, web-enrichment, and vuln-detection phases,
/// or dumps every installed detector's advisory catalog.
#[derive(Parser, Debug, Clone)]
#[command(name = "sentryscan", version, about)]
pub struct Cli {
    /// Scan an IPv4 address. Conflicts with --uri-target.
    #[arg(long, value_name = "IP")]
    pub ip_v4_target: Option<String>,

    /// Scan an IPv6 address. Conflicts with --uri-target.
    #[arg(long, value_name = "IP")]
    pub ip_v6_target: Option<String>,

    /// Scan a hostname. May combine with --ip-*-target to form one target.
    #[arg(long, value_name = "HOST")]
    pub hostname_target: Option<String>,

    /// Scan a URL; derives hostname, port, scheme, and path. Conflicts with
    /// --hostname-target and --ip-*-target.
    #[arg(long, value_name = "URL")]
    pub uri_target: Option<String>,

    /// Whitelist detectors by descriptor name (comma-separated).
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub detectors_include: Option<Vec<String>>,

    /// Blacklist detectors by descriptor name (comma-separated).
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub detectors_exclude: Vec<String>,

    /// Write every installed detector's advisory catalog to PATH; no scan
    /// is performed.
    #[arg(long, value_name = "PATH")]
    pub dump_advisories: Option<PathBuf>,

    /// Optional engine configuration file (pool size, timeouts, deadline).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

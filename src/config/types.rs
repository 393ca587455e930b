use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_pool_size() -> Option<usize> {
    None
}

fn default_plugin_timeout_secs() -> Option<u64> {
    None
}

/// Optional on-disk engine configuration (spec §2 ambient stack): pool
/// size, per-plugin timeout override, overall scan deadline, grace period,
/// and default include/exclude lists. Every field is optional; an absent
/// file or absent field falls back to the hardcoded defaults in
/// `engine::executor` and `pipeline::state`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EngineConfig {
    #[serde(default = "default_pool_size")]
    pub pool_size: Option<usize>,
    #[serde(default = "default_plugin_timeout_secs")]
    pub plugin_timeout_secs: Option<u64>,
    pub scan_deadline_secs: Option<u64>,
    pub grace_period_secs: Option<u64>,
    #[serde(default)]
    pub include: Option<HashSet<String>>,
    #[serde(default)]
    pub exclude: HashSet<String>,
}

impl EngineConfig {
    pub fn plugin_timeout(&self) -> Option<Duration> {
        self.plugin_timeout_secs.map(Duration::from_secs)
    }

    pub fn scan_deadline(&self) -> Option<Duration> {
        self.scan_deadline_secs.map(Duration::from_secs)
    }

    pub fn grace_period(&self) -> Option<Duration> {
        self.grace_period_secs.map(Duration::from_secs)
    }
}

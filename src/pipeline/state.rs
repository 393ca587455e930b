use std::collections::HashSet;
use std::time::Duration;

use crate::engine::{default_pool_size, DEFAULT_PLUGIN_TIMEOUT};

/// Default overall-scan grace period after the deadline expires, before the
/// pool is forcibly torn down (spec §5).
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Workflow-wide configuration: how many plugins may run concurrently, how
/// long each may run, the overall scan deadline (if any), and which plugins
/// are enabled. Mirrors the teacher's `PipelineConfig`, stripped of every
/// field tied to dropped teacher concerns (LLM provider, container image,
/// auth, cost budget).
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub pool_size: usize,
    pub plugin_timeout: Duration,
    pub scan_deadline: Option<Duration>,
    pub grace_period: Duration,
    pub include: Option<HashSet<String>>,
    pub exclude: HashSet<String>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            plugin_timeout: DEFAULT_PLUGIN_TIMEOUT,
            scan_deadline: None,
            grace_period: DEFAULT_GRACE_PERIOD,
            include: None,
            exclude: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_deadline() {
        let config = WorkflowConfig::default();
        assert!(config.scan_deadline.is_none());
        assert_eq!(config.grace_period, DEFAULT_GRACE_PERIOD);
    }
}

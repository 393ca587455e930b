//! Top-level constructor wiring, replacing the annotation-driven DI
//! container spec §9 calls out for re-architecture: one object builds the
//! manager and workflow from an already-built registry, so tests can wire
//! a smaller assembly around fakes without any framework involvement.

use crate::pipeline::{ScanWorkflow, WorkflowConfig};
use crate::plugins::{PluginManager, PluginRegistry};

pub struct Assembly {
    workflow: ScanWorkflow,
}

impl Assembly {
    pub fn bootstrap(registry: PluginRegistry, config: WorkflowConfig) -> Self {
        let manager = PluginManager::new(registry, config.include.clone(), config.exclude.clone());
        Self { workflow: ScanWorkflow::new(manager, config) }
    }

    pub fn workflow(&self) -> &ScanWorkflow {
        &self.workflow
    }

    pub fn registry(&self) -> &PluginRegistry {
        self.workflow.registry()
    }
}

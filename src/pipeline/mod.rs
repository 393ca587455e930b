//! The four-phase scan workflow and the state it carries between phases.

pub mod phase;
pub mod state;
pub mod workflow;

pub use phase::{PhaseDefinition, PhaseName, PHASES};
pub use state::{WorkflowConfig, DEFAULT_GRACE_PERIOD};
pub use workflow::ScanWorkflow;

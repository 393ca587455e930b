//! Bounded, timeout-enforcing execution of individual plugin units.

pub mod executor;

pub use executor::{default_pool_size, ExecutionEngine, ExecutionResult, DEFAULT_PLUGIN_TIMEOUT};

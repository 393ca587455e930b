//! Plugin descriptor model, selector matching, registry, and manager.
//!
//! The engine ships no concrete scanning/detection logic of its own — spec
//! Non-goals rule out the core performing network I/O or encoding a
//! vulnerability taxonomy. Concrete plugins are supplied by callers via
//! [`registry::PluginRegistryBuilder`]; [`crate::assembly::Assembly`] wires
//! them into a [`manager::PluginManager`].

pub mod descriptor;
pub mod manager;
pub mod registry;
pub mod selectors;
pub mod traits;

pub use descriptor::{PluginDescriptor, PluginType};
pub use manager::{PluginManager, PluginMatch, RemoteDetectorMatch};
pub use registry::{PluginRegistry, PluginRegistryBuilder, RegisteredPlugin};
pub use selectors::{matches, matches_os, matches_service, OsClassSelector, Selectors};
pub use traits::{Plugin, PortScanner, RemoteDetector, ServiceFingerprinter, VulnDetector};

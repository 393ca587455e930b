use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{NetworkService, OsClass};

use super::descriptor::PluginType;
use super::registry::{PluginRegistry, RegisteredPlugin};
use super::selectors::matches;
use super::traits::{PortScanner, RemoteDetector, ServiceFingerprinter, VulnDetector};

/// One plugin matched against one service, ready for the execution engine
/// to schedule.
#[derive(Clone)]
pub struct PluginMatch<T> {
    pub plugin: T,
    pub service: NetworkService,
}

/// One [`RemoteDetector`] sub-definition paired with the services it
/// matched. Always emitted once per sub-definition of every enabled, present
/// remote detector — `services` may be empty (spec §3/§4.3's "always
/// include... even when empty" rule).
#[derive(Clone)]
pub struct RemoteDetectorMatch {
    pub plugin: Arc<dyn RemoteDetector>,
    pub sub_definition: String,
    pub services: Vec<NetworkService>,
}

/// Wraps a [`PluginRegistry`] with the include/exclude filtering and
/// selector matching that decides, for a given target/service, which
/// plugins actually run (spec §4.3).
pub struct PluginManager {
    registry: PluginRegistry,
    include: Option<HashSet<String>>,
    exclude: HashSet<String>,
}

impl PluginManager {
    pub fn new(registry: PluginRegistry, include: Option<HashSet<String>>, exclude: HashSet<String>) -> Self {
        Self { registry, include, exclude }
    }

    fn is_enabled(&self, name: &str) -> bool {
        if self.exclude.contains(name) {
            return false;
        }
        match &self.include {
            Some(allowed) => allowed.contains(name),
            None => true,
        }
    }

    /// All enabled port scanners, in registry order. Port scanning runs once
    /// per target with no service to match against yet.
    pub fn port_scanners(&self) -> Vec<Arc<dyn PortScanner>> {
        self.registry
            .by_kind(PluginType::PortScan)
            .filter(|p| self.is_enabled(&p.descriptor().name))
            .filter_map(|p| match p {
                RegisteredPlugin::PortScan(scanner) => Some(scanner.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the same descriptor as `port_scanners()[0]` whenever that's
    /// non-empty, `None` otherwise (spec §8 invariant 5).
    pub fn port_scanner(&self) -> Option<Arc<dyn PortScanner>> {
        self.port_scanners().into_iter().next()
    }

    /// Enabled fingerprinters whose selectors match `service`. A
    /// fingerprinter with no selectors declared at all is skipped rather
    /// than treated as matching everything (spec §9 open question).
    pub fn fingerprinters_for(
        &self,
        service: &NetworkService,
        os_classes: &[OsClass],
    ) -> Vec<Arc<dyn ServiceFingerprinter>> {
        self.registry
            .by_kind(PluginType::ServiceFingerprint)
            .filter(|p| self.is_enabled(&p.descriptor().name))
            .filter(|p| !p.descriptor().selectors.is_empty())
            .filter(|p| matches(&p.descriptor().selectors, service, os_classes))
            .filter_map(|p| match p {
                RegisteredPlugin::ServiceFingerprint(fp) => Some(fp.clone()),
                _ => None,
            })
            .collect()
    }

    /// Enabled vuln detectors, in registry order, each paired with the
    /// subset of `services` it matches, in input order. Flattening this in
    /// order gives the (registry order, input service order) stability
    /// guarantee spec §4.5 requires.
    pub fn matching_vuln_detectors(
        &self,
        services: &[NetworkService],
        os_classes: &[OsClass],
    ) -> Vec<PluginMatch<Arc<dyn VulnDetector>>> {
        self.registry
            .by_kind(PluginType::VulnDetection)
            .filter(|p| self.is_enabled(&p.descriptor().name))
            .filter_map(|p| match p {
                RegisteredPlugin::VulnDetection(detector) => Some(detector.clone()),
                _ => None,
            })
            .flat_map(|detector| {
                let selectors = detector.descriptor().selectors.clone();
                let matched: Vec<_> = services
                    .iter()
                    .filter(|s| matches(&selectors, s, os_classes))
                    .cloned()
                    .collect();
                matched.into_iter().map({
                    let detector = detector.clone();
                    move |service| PluginMatch { plugin: detector.clone(), service }
                })
            })
            .collect()
    }

    /// Every enabled, present remote detector, expanded once per
    /// sub-definition (spec §9: one runtime plugin fronting many logical
    /// detectors). Unlike [`matching_vuln_detectors`], a sub-definition is
    /// always emitted even when it matches zero services — spec §3's
    /// "a result is always emitted if the [remote] detector is present"
    /// invariant applies per sub-definition, not per match.
    pub fn matching_remote_detectors(
        &self,
        services: &[NetworkService],
        os_classes: &[OsClass],
    ) -> Vec<RemoteDetectorMatch> {
        self.registry
            .by_kind(PluginType::RemoteVulnDetection)
            .filter(|p| self.is_enabled(&p.descriptor().name))
            .filter_map(|p| match p {
                RegisteredPlugin::RemoteVulnDetection(detector) => Some(detector.clone()),
                _ => None,
            })
            .flat_map(|detector| {
                detector.sub_definitions().to_vec().into_iter().map({
                    let detector = detector.clone();
                    move |sub_def| {
                        let matched: Vec<_> =
                            services.iter().filter(|s| matches(&sub_def.selectors, s, os_classes)).cloned().collect();
                        RemoteDetectorMatch { plugin: detector.clone(), sub_definition: sub_def.name, services: matched }
                    }
                })
            })
            .collect()
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }
}

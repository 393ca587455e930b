use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ScanError;

use super::descriptor::{PluginDescriptor, PluginType};
use super::traits::{Plugin, PortScanner, RemoteDetector, ServiceFingerprinter, VulnDetector};

/// A registered plugin, tagged by kind so the registry can hand back a
/// concrete trait object without the caller downcasting.
#[derive(Clone)]
pub enum RegisteredPlugin {
    PortScan(Arc<dyn PortScanner>),
    ServiceFingerprint(Arc<dyn ServiceFingerprinter>),
    VulnDetection(Arc<dyn VulnDetector>),
    RemoteVulnDetection(Arc<dyn RemoteDetector>),
}

impl RegisteredPlugin {
    pub fn descriptor(&self) -> &PluginDescriptor {
        match self {
            RegisteredPlugin::PortScan(p) => p.descriptor(),
            RegisteredPlugin::ServiceFingerprint(p) => p.descriptor(),
            RegisteredPlugin::VulnDetection(p) => p.descriptor(),
            RegisteredPlugin::RemoteVulnDetection(p) => p.descriptor(),
        }
    }

    pub fn plugin_type(&self) -> PluginType {
        self.descriptor().plugin_type
    }
}

/// Flat list of every registered plugin plus an index by [`PluginType`],
/// built once at startup and never mutated afterward. Registration order is
/// preserved and used as the tiebreaker for the manager's stable output
/// ordering (spec §4.3).
#[derive(Clone)]
pub struct PluginRegistry {
    plugins: Vec<RegisteredPlugin>,
    by_kind: HashMap<PluginType, Vec<usize>>,
}

impl PluginRegistry {
    pub fn by_kind(&self, kind: PluginType) -> impl Iterator<Item = &RegisteredPlugin> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.plugins[idx])
    }

    pub fn all(&self) -> &[RegisteredPlugin] {
        &self.plugins
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredPlugin> {
        self.plugins.iter().find(|p| p.descriptor().name == name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// Builder that registers plugins one at a time and fails fast on a
/// duplicate name, matching the teacher's DI-container-replacement design
/// note: a naming collision is a fatal startup error, never a silent
/// override.
#[derive(Default)]
pub struct PluginRegistryBuilder {
    plugins: Vec<RegisteredPlugin>,
    seen_names: std::collections::HashSet<String>,
}

impl PluginRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, plugin: RegisteredPlugin) -> Result<(), ScanError> {
        let name = plugin.descriptor().name.clone();
        if !self.seen_names.insert(name.clone()) {
            return Err(ScanError::DuplicatePluginName(name));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn register_port_scanner(mut self, plugin: Arc<dyn PortScanner>) -> Result<Self, ScanError> {
        self.push(RegisteredPlugin::PortScan(plugin))?;
        Ok(self)
    }

    pub fn register_fingerprinter(
        mut self,
        plugin: Arc<dyn ServiceFingerprinter>,
    ) -> Result<Self, ScanError> {
        self.push(RegisteredPlugin::ServiceFingerprint(plugin))?;
        Ok(self)
    }

    pub fn register_vuln_detector(mut self, plugin: Arc<dyn VulnDetector>) -> Result<Self, ScanError> {
        self.push(RegisteredPlugin::VulnDetection(plugin))?;
        Ok(self)
    }

    pub fn register_remote_detector(
        mut self,
        plugin: Arc<dyn RemoteDetector>,
    ) -> Result<Self, ScanError> {
        self.push(RegisteredPlugin::RemoteVulnDetection(plugin))?;
        Ok(self)
    }

    pub fn build(self) -> PluginRegistry {
        let mut by_kind: HashMap<PluginType, Vec<usize>> = HashMap::new();
        for (idx, plugin) in self.plugins.iter().enumerate() {
            by_kind.entry(plugin.plugin_type()).or_default().push(idx);
        }
        PluginRegistry { plugins: self.plugins, by_kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PortScanningReport, TargetInfo};
    use async_trait::async_trait;

    struct Stub(PluginDescriptor);

    impl Plugin for Stub {
        fn descriptor(&self) -> &PluginDescriptor {
            &self.0
        }
    }

    #[async_trait]
    impl PortScanner for Stub {
        async fn scan(&self, target: &TargetInfo) -> Result<PortScanningReport, ScanError> {
            Ok(PortScanningReport { target: target.clone(), services: Vec::new() })
        }
    }

    fn stub(name: &str) -> Arc<dyn PortScanner> {
        Arc::new(Stub(PluginDescriptor::new(PluginType::PortScan, name, "1.0.0")))
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let result = PluginRegistryBuilder::new()
            .register_port_scanner(stub("tcp-connect"))
            .unwrap()
            .register_port_scanner(stub("tcp-connect"));
        assert!(matches!(result, Err(ScanError::DuplicatePluginName(_))));
    }

    #[test]
    fn by_kind_preserves_registration_order() {
        let registry = PluginRegistryBuilder::new()
            .register_port_scanner(stub("a"))
            .unwrap()
            .register_port_scanner(stub("b"))
            .unwrap()
            .build();
        let names: Vec<_> = registry
            .by_kind(PluginType::PortScan)
            .map(|p| p.descriptor().name.clone())
            .collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}

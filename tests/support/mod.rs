use std::sync::Arc;

use async_trait::async_trait;
use sentryscan::errors::ScanError;
use sentryscan::models::{
    DetectionReport, FingerprintingReport, NetworkEndpoint, NetworkService, PortScanningReport,
    TargetInfo, Transport,
};
use sentryscan::plugins::descriptor::RemoteSubDefinition;
use sentryscan::plugins::{Plugin, PluginDescriptor, PortScanner, RemoteDetector, VulnDetector};

pub fn service(name: &str, port: u16) -> NetworkService {
    let endpoint = NetworkEndpoint::ip("10.0.0.1".parse().unwrap()).with_port(port).unwrap();
    NetworkService::new(endpoint, Transport::Tcp).with_service_name(name)
}

pub fn service_with_software(service_name: &str, port: u16, software: &str) -> NetworkService {
    service(service_name, port).with_software(sentryscan::models::Software {
        name: software.to_string(),
        version: None,
    })
}

pub struct FakePortScanner {
    descriptor: PluginDescriptor,
    services: Vec<NetworkService>,
}

impl FakePortScanner {
    pub fn new(name: &str, services: Vec<NetworkService>) -> Arc<Self> {
        Arc::new(Self {
            descriptor: PluginDescriptor::new(sentryscan::plugins::PluginType::PortScan, name, "1.0.0"),
            services,
        })
    }
}

impl Plugin for FakePortScanner {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

#[async_trait]
impl PortScanner for FakePortScanner {
    async fn scan(&self, target: &TargetInfo) -> Result<PortScanningReport, ScanError> {
        Ok(PortScanningReport { target: target.clone(), services: self.services.clone() })
    }
}

pub struct FakeFingerprinter {
    descriptor: PluginDescriptor,
}

impl FakeFingerprinter {
    pub fn new(name: &str, selectors: sentryscan::plugins::Selectors) -> Arc<Self> {
        Arc::new(Self { descriptor: PluginDescriptor::new(sentryscan::plugins::PluginType::ServiceFingerprint, name, "1.0.0").with_selectors(selectors) })
    }
}

impl Plugin for FakeFingerprinter {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

#[async_trait]
impl sentryscan::plugins::ServiceFingerprinter for FakeFingerprinter {
    async fn fingerprint(&self, service: &NetworkService) -> Result<FingerprintingReport, ScanError> {
        Ok(FingerprintingReport { service: service.clone() })
    }
}

/// A vuln detector whose outcome (`Ok` with zero findings, or `Err`) is fixed
/// at construction time, so scenario 7 can force every installed detector to
/// fail deterministically.
pub struct FakeVulnDetector {
    descriptor: PluginDescriptor,
    should_fail: bool,
}

impl FakeVulnDetector {
    pub fn new(descriptor: PluginDescriptor, should_fail: bool) -> Arc<Self> {
        Arc::new(Self { descriptor, should_fail })
    }
}

impl Plugin for FakeVulnDetector {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

#[async_trait]
impl VulnDetector for FakeVulnDetector {
    async fn detect(
        &self,
        _target: &TargetInfo,
        _service: &NetworkService,
    ) -> Result<Vec<DetectionReport>, ScanError> {
        if self.should_fail {
            Err(ScanError::execution_failed(&self.descriptor.name, "forced failure"))
        } else {
            Ok(Vec::new())
        }
    }
}

pub struct FakeRemoteDetector {
    descriptor: PluginDescriptor,
    sub_definitions: Vec<RemoteSubDefinition>,
}

impl FakeRemoteDetector {
    pub fn new(name: &str, sub_definitions: Vec<RemoteSubDefinition>) -> Arc<Self> {
        Arc::new(Self {
            descriptor: PluginDescriptor::new(sentryscan::plugins::PluginType::RemoteVulnDetection, name, "1.0.0"),
            sub_definitions,
        })
    }
}

impl Plugin for FakeRemoteDetector {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

#[async_trait]
impl RemoteDetector for FakeRemoteDetector {
    fn sub_definitions(&self) -> &[RemoteSubDefinition] {
        &self.sub_definitions
    }

    async fn detect_remote(
        &self,
        _target: &TargetInfo,
        _services: &[NetworkService],
        _sub_definition: &str,
    ) -> Result<Vec<DetectionReport>, ScanError> {
        Ok(Vec::new())
    }
}

use async_trait::async_trait;

use crate::errors::ScanError;
use crate::models::{DetectionReport, FingerprintingReport, NetworkService, PortScanningReport, TargetInfo};

use super::descriptor::{PluginDescriptor, RemoteSubDefinition};

/// Shared identity every plugin kind implements. Mirrors the base
/// `Plugin`/specialized-sub-trait split: the orchestrator only ever needs
/// `descriptor()` to route and filter; the kind-specific trait is where the
/// actual work method lives.
pub trait Plugin: Send + Sync {
    fn descriptor(&self) -> &PluginDescriptor;
}

/// Phase 1: discovers open services on a target. Runs once per target, not
/// once per service, since nothing is known about services yet.
#[async_trait]
pub trait PortScanner: Plugin {
    async fn scan(&self, target: &TargetInfo) -> Result<PortScanningReport, ScanError>;
}

/// Phase 2: identifies the service/software running on one already-open
/// port.
#[async_trait]
pub trait ServiceFingerprinter: Plugin {
    async fn fingerprint(&self, service: &NetworkService) -> Result<FingerprintingReport, ScanError>;
}

/// Phase 4: checks one already-identified service for vulnerabilities,
/// reporting zero or more findings.
#[async_trait]
pub trait VulnDetector: Plugin {
    async fn detect(
        &self,
        target: &TargetInfo,
        service: &NetworkService,
    ) -> Result<Vec<DetectionReport>, ScanError>;
}

/// Phase 4 variant: a single runtime plugin fronting many logical
/// sub-definitions (spec §9), each identified by name. The manager enumerates
/// `sub_definitions()` once at construction time and invokes `detect_remote`
/// once per sub-definition, handing it that sub-definition's full matched
/// service list — which may be empty (spec §3: "a result is always emitted
/// if the detector is present; per-sub-definition service lists may be
/// empty").
#[async_trait]
pub trait RemoteDetector: Plugin {
    fn sub_definitions(&self) -> &[RemoteSubDefinition];

    async fn detect_remote(
        &self,
        target: &TargetInfo,
        services: &[NetworkService],
        sub_definition: &str,
    ) -> Result<Vec<DetectionReport>, ScanError>;
}

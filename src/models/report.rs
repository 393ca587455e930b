use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::service::NetworkService;
use super::target::TargetInfo;
use super::vulnerability::Vulnerability;

/// Output of the port-scan phase: the target plus every discovered service,
/// with no fingerprinting applied yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortScanningReport {
    pub target: TargetInfo,
    pub services: Vec<NetworkService>,
}

/// Output of the fingerprinting phase for a single service: the enriched
/// version of that service, to be merged back into the port-scan report by
/// identity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintingReport {
    pub service: NetworkService,
}

/// The accumulated report after fingerprinting (and web-service enrichment)
/// has run: the same shape as a `PortScanningReport` but with `services`
/// enriched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconnaissanceReport {
    pub target: TargetInfo,
    pub services: Vec<NetworkService>,
}

impl ReconnaissanceReport {
    pub fn from_port_scan(report: PortScanningReport) -> Self {
        Self { target: report.target, services: report.services }
    }

    /// Replaces the service matching `enriched`'s identity key with the
    /// enriched version, per spec §4.5 phase 2's merge rule. No-op if the
    /// identity key isn't found (shouldn't happen since fingerprinters are
    /// always invoked with a service drawn from this same report).
    pub fn merge_fingerprint(&mut self, enriched: NetworkService) {
        let key = enriched.identity_key();
        if let Some(slot) = self.services.iter_mut().find(|s| s.identity_key() == key) {
            *slot = enriched;
        }
    }
}

/// A single detected vulnerability on a single service, for a single target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub target: TargetInfo,
    pub service: NetworkService,
    pub vulnerability: Vulnerability,
    pub timestamp: DateTime<Utc>,
}

/// One reported vulnerability, flattened out of a detector's
/// `DetectionReport`s (spec §4.5 phase 4: "flatten into `ScanFindings`").
pub type ScanFinding = DetectionReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    Succeeded,
    PartiallySucceeded,
    Failed,
}

impl ScanStatus {
    /// Process exit code for this status (spec §6: 0/1/2).
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanStatus::Succeeded => 0,
            ScanStatus::Failed => 1,
            ScanStatus::PartiallySucceeded => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResults {
    pub status: ScanStatus,
    pub status_message: String,
    pub duration: std::time::Duration,
    pub reconnaissance_report: ReconnaissanceReport,
    pub findings: Vec<ScanFinding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NetworkEndpoint, Transport};

    fn svc(port: u16) -> NetworkService {
        NetworkService::new(
            NetworkEndpoint::ip("10.0.0.1".parse().unwrap()).with_port(port).unwrap(),
            Transport::Tcp,
        )
    }

    #[test]
    fn merge_fingerprint_replaces_matching_service() {
        let mut recon = ReconnaissanceReport::from_port_scan(PortScaningReportBuilder::one(svc(80)));
        let enriched = svc(80).with_service_name("http");
        recon.merge_fingerprint(enriched.clone());
        assert_eq!(recon.services[0], enriched);
    }

    #[test]
    fn merge_fingerprint_is_noop_for_unknown_service() {
        let mut recon = ReconnaissanceReport::from_port_scan(PortScaningReportBuilder::one(svc(80)));
        let stray = svc(9999).with_service_name("weird");
        recon.merge_fingerprint(stray);
        assert_eq!(recon.services[0].service_name, None);
    }

    struct PortScaningReportBuilder;
    impl PortScaningReportBuilder {
        fn one(s: NetworkService) -> PortScanningReport {
            PortScanningReport { target: TargetInfo::default(), services: vec![s] }
        }
    }
}

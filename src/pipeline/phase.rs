use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseName {
    PortScan,
    ServiceFingerprint,
    WebEnrichment,
    VulnDetection,
}

impl std::fmt::Display for PhaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PortScan => write!(f, "port-scan"),
            Self::ServiceFingerprint => write!(f, "service-fingerprint"),
            Self::WebEnrichment => write!(f, "web-enrichment"),
            Self::VulnDetection => write!(f, "vuln-detection"),
        }
    }
}

pub struct PhaseDefinition {
    pub name: PhaseName,
    pub display_name: &'static str,
    pub description: &'static str,
}

pub static PHASES: &[PhaseDefinition] = &[
    PhaseDefinition {
        name: PhaseName::PortScan,
        display_name: "Port Scan",
        description: "Discovers open services on every target endpoint",
    },
    PhaseDefinition {
        name: PhaseName::ServiceFingerprint,
        display_name: "Service Fingerprint",
        description: "Identifies the service/software running on each open port",
    },
    PhaseDefinition {
        name: PhaseName::WebEnrichment,
        display_name: "Web Enrichment",
        description: "Attaches web-service context to HTTP(S) services",
    },
    PhaseDefinition {
        name: PhaseName::VulnDetection,
        display_name: "Vulnerability Detection",
        description: "Runs local and remote vulnerability detectors against identified services",
    },
];

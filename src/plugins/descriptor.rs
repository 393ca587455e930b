use serde::{Deserialize, Serialize};

use crate::models::Vulnerability;

use super::selectors::Selectors;

/// The kind of work a plugin performs, mirroring the four phases of the
/// scan workflow (spec §4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PluginType {
    PortScan,
    ServiceFingerprint,
    VulnDetection,
    RemoteVulnDetection,
}

impl PluginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginType::PortScan => "PORT_SCAN",
            PluginType::ServiceFingerprint => "SERVICE_FINGERPRINT",
            PluginType::VulnDetection => "VULN_DETECTION",
            PluginType::RemoteVulnDetection => "REMOTE_VULN_DETECTION",
        }
    }
}

/// One logical sub-detector fronted by a [`super::traits::RemoteDetector`]
/// runtime plugin (spec §9): its own name and its own selectors, since a
/// single remote detector can front several independently-matched
/// sub-definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSubDefinition {
    pub name: String,
    #[serde(default)]
    pub selectors: Selectors,
}

/// Static metadata describing a plugin: identity, the services it applies
/// to, and the advisories it may ever report. Every plugin implementation
/// exposes exactly one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub plugin_type: PluginType,
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    #[serde(default)]
    pub selectors: Selectors,
    #[serde(default)]
    pub advisories: Vec<Vulnerability>,
}

impl PluginDescriptor {
    pub fn new(
        plugin_type: PluginType,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            plugin_type,
            name: name.into(),
            version: version.into(),
            description: String::new(),
            author: String::new(),
            selectors: Selectors::default(),
            advisories: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn with_advisories(mut self, advisories: Vec<Vulnerability>) -> Self {
        self.advisories = advisories;
        self
    }
}

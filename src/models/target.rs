use serde::{Deserialize, Serialize};

use super::endpoint::NetworkEndpoint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsClass {
    pub os_type: String,
    pub vendor: String,
    pub os_family: String,
    /// Confidence, 0-100.
    pub accuracy: u8,
}

impl OsClass {
    pub fn new(os_type: impl Into<String>, vendor: impl Into<String>, os_family: impl Into<String>, accuracy: u8) -> Self {
        Self {
            os_type: os_type.into(),
            vendor: vendor.into(),
            os_family: os_family.into(),
            accuracy: accuracy.min(100),
        }
    }
}

/// A set of endpoints co-located on one host, plus ranked OS-class guesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TargetInfo {
    pub endpoints: Vec<NetworkEndpoint>,
    pub os_classes: Vec<OsClass>,
}

impl TargetInfo {
    pub fn new(endpoints: Vec<NetworkEndpoint>) -> Self {
        Self { endpoints, os_classes: Vec::new() }
    }

    pub fn with_os_classes(mut self, os_classes: Vec<OsClass>) -> Self {
        self.os_classes = os_classes;
        self
    }
}

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::errors::ScanError;

/// Which combination of address/hostname/port a [`NetworkEndpoint`] carries.
///
/// Computed from the populated fields rather than stored redundantly, so an
/// endpoint can never drift out of sync with its own type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndpointType {
    Ip,
    Hostname,
    IpHostname,
    IpPort,
    HostnamePort,
    IpHostnamePort,
}

/// A network endpoint: an optional IPv4/IPv6 address, an optional hostname,
/// and an optional port, at least one of address or hostname present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEndpoint {
    pub ip_address: Option<IpAddr>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
}

impl NetworkEndpoint {
    pub fn ip(ip_address: IpAddr) -> Self {
        Self { ip_address: Some(ip_address), hostname: None, port: None }
    }

    pub fn hostname(hostname: impl Into<String>) -> Self {
        Self { ip_address: None, hostname: Some(hostname.into()), port: None }
    }

    pub fn ip_hostname(ip_address: IpAddr, hostname: impl Into<String>) -> Self {
        Self { ip_address: Some(ip_address), hostname: Some(hostname.into()), port: None }
    }

    /// Attaches a port, validating the 1-65535 range.
    pub fn with_port(mut self, port: u16) -> Result<Self, ScanError> {
        if port == 0 {
            return Err(ScanError::InvalidArgument {
                flag: "port".into(),
                reason: "port must be in range 1-65535".into(),
            });
        }
        self.port = Some(port);
        Ok(self)
    }

    pub fn endpoint_type(&self) -> EndpointType {
        match (self.ip_address.is_some(), self.hostname.is_some(), self.port.is_some()) {
            (true, false, false) => EndpointType::Ip,
            (false, true, false) => EndpointType::Hostname,
            (true, true, false) => EndpointType::IpHostname,
            (true, false, true) => EndpointType::IpPort,
            (false, true, true) => EndpointType::HostnamePort,
            (true, true, true) => EndpointType::IpHostnamePort,
            (false, false, _) => EndpointType::Hostname,
        }
    }

    /// Identity key used to correlate the same endpoint across reports
    /// (e.g. when merging a fingerprinting report back into a port-scan
    /// report's service list).
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.ip_address.map(|a| a.to_string()).unwrap_or_default(),
            self.hostname.clone().unwrap_or_default(),
            self.port.map(|p| p.to_string()).unwrap_or_default(),
        )
    }
}

impl fmt::Display for NetworkEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = self
            .hostname
            .clone()
            .or_else(|| self.ip_address.map(|a| a.to_string()))
            .unwrap_or_else(|| "?".to_string());
        match self.port {
            Some(p) => write!(f, "{host}:{p}"),
            None => write!(f, "{host}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_ip_only() {
        let ep = NetworkEndpoint::ip("10.0.0.1".parse().unwrap());
        assert_eq!(ep.endpoint_type(), EndpointType::Ip);
    }

    #[test]
    fn classifies_ip_hostname_port() {
        let ep = NetworkEndpoint::ip_hostname("10.0.0.1".parse().unwrap(), "example.com")
            .with_port(443)
            .unwrap();
        assert_eq!(ep.endpoint_type(), EndpointType::IpHostnamePort);
    }

    #[test]
    fn rejects_port_zero() {
        let err = NetworkEndpoint::hostname("example.com").with_port(0);
        assert!(err.is_err());
    }

    #[test]
    fn identity_key_distinguishes_ports() {
        let a = NetworkEndpoint::hostname("h").with_port(80).unwrap();
        let b = NetworkEndpoint::hostname("h").with_port(443).unwrap();
        assert_ne!(a.identity_key(), b.identity_key());
    }
}

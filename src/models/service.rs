use serde::{Deserialize, Serialize};

use super::endpoint::NetworkEndpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Transport {
    Tcp,
    Udp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Software {
    pub name: String,
    pub version: Option<String>,
}

/// Context attached to a service once it's been identified as belonging to
/// a particular protocol family. Only the web-service variant exists today;
/// it carries the enriched fields §4.5 (web-service enrichment) sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceContext {
    WebService(WebServiceContext),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WebServiceContext {
    pub application_root: Option<String>,
}

/// A network endpoint plus transport and whatever identification has been
/// discovered about the service running there. Every field beyond
/// `endpoint` and `transport` is optional and populated incrementally as
/// the scan workflow progresses through its phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkService {
    pub endpoint: NetworkEndpoint,
    pub transport: Transport,
    pub service_name: Option<String>,
    pub software: Option<Software>,
    pub service_context: Option<ServiceContext>,
}

impl NetworkService {
    pub fn new(endpoint: NetworkEndpoint, transport: Transport) -> Self {
        Self {
            endpoint,
            transport,
            service_name: None,
            software: None,
            service_context: None,
        }
    }

    /// Sets the service name, lowercasing it per the canonical-form invariant.
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into().to_lowercase());
        self
    }

    pub fn with_software(mut self, software: Software) -> Self {
        self.software = Some(software);
        self
    }

    /// Identity used to correlate the same service across reports: endpoint
    /// address/hostname/port plus transport (spec §4.5: "keyed by
    /// endpoint+transport+port").
    pub fn identity_key(&self) -> String {
        format!("{}|{:?}", self.endpoint.identity_key(), self.transport)
    }

    pub fn web_service_context(&self) -> Option<&WebServiceContext> {
        match &self.service_context {
            Some(ServiceContext::WebService(ctx)) => Some(ctx),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    fn ep() -> NetworkEndpoint {
        NetworkEndpoint::ip("10.0.0.1".parse::<IpAddr>().unwrap())
            .with_port(80)
            .unwrap()
    }

    #[test]
    fn service_name_is_lowercased() {
        let svc = NetworkService::new(ep(), Transport::Tcp).with_service_name("HTTP");
        assert_eq!(svc.service_name.as_deref(), Some("http"));
    }

    #[test]
    fn identity_key_includes_transport() {
        let tcp = NetworkService::new(ep(), Transport::Tcp);
        let udp = NetworkService::new(ep(), Transport::Udp);
        assert_ne!(tcp.identity_key(), udp.identity_key());
    }
}

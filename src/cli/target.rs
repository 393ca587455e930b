use std::net::IpAddr;
use std::path::PathBuf;

use crate::errors::ScanError;
use crate::models::{NetworkEndpoint, NetworkService, ServiceContext, TargetInfo, Transport, WebServiceContext};

use super::commands::Cli;

/// What a resolved CLI invocation asks the caller to do: run a scan against
/// a target, or dump the installed advisory catalog without scanning.
pub enum ResolvedAction {
    Scan { target: TargetInfo, seed_services: Vec<NetworkService> },
    DumpAdvisories(PathBuf),
}

/// Validates and resolves the canonical target-selector flags (spec §6).
pub fn resolve(cli: &Cli) -> Result<ResolvedAction, ScanError> {
    if let Some(path) = &cli.dump_advisories {
        return Ok(ResolvedAction::DumpAdvisories(path.clone()));
    }

    let has_uri = cli.uri_target.is_some();
    let has_ip_or_host = cli.ip_v4_target.is_some() || cli.ip_v6_target.is_some() || cli.hostname_target.is_some();

    if has_uri && has_ip_or_host {
        return Err(ScanError::InvalidArgument {
            flag: "uri-target".into(),
            reason: "conflicts with --hostname-target and --ip-*-target".into(),
        });
    }

    if !has_uri && !has_ip_or_host {
        return Err(ScanError::InvalidArgument {
            flag: "target".into(),
            reason: "one of --ip-v4-target, --ip-v6-target, --hostname-target, or --uri-target is required".into(),
        });
    }

    if let Some(uri) = &cli.uri_target {
        let (endpoint, service) = from_uri(uri)?;
        let target = TargetInfo::new(vec![endpoint]);
        return Ok(ResolvedAction::Scan { target, seed_services: vec![service] });
    }

    let mut ip_addresses: Vec<IpAddr> = Vec::new();
    if let Some(ip) = &cli.ip_v4_target {
        ip_addresses.push(parse_ip(ip, "ip-v4-target")?);
    }
    if let Some(ip) = &cli.ip_v6_target {
        ip_addresses.push(parse_ip(ip, "ip-v6-target")?);
    }

    let endpoints = if ip_addresses.is_empty() {
        vec![NetworkEndpoint::hostname(cli.hostname_target.clone().unwrap())]
    } else {
        ip_addresses
            .into_iter()
            .map(|ip| match &cli.hostname_target {
                Some(host) => NetworkEndpoint::ip_hostname(ip, host.clone()),
                None => NetworkEndpoint::ip(ip),
            })
            .collect()
    };

    Ok(ResolvedAction::Scan { target: TargetInfo::new(endpoints), seed_services: Vec::new() })
}

fn parse_ip(value: &str, flag: &'static str) -> Result<IpAddr, ScanError> {
    value
        .parse()
        .map_err(|_| ScanError::InvalidArgument { flag: flag.into(), reason: format!("'{value}' is not a valid IP address") })
}

/// Derives an endpoint + seed service from a URI target without performing
/// any network I/O: the host is carried as a hostname only, address-family
/// tagging is deferred to the reconnaissance phase (spec §6).
fn from_uri(uri: &str) -> Result<(NetworkEndpoint, NetworkService), ScanError> {
    let (scheme, rest) = uri.split_once("://").ok_or_else(|| ScanError::InvalidArgument {
        flag: "uri-target".into(),
        reason: format!("'{uri}' is missing a scheme"),
    })?;

    let scheme = scheme.to_lowercase();
    let default_port = match scheme.as_str() {
        "http" => 80,
        "https" => 443,
        other => {
            return Err(ScanError::InvalidArgument {
                flag: "uri-target".into(),
                reason: format!("unsupported scheme '{other}'"),
            })
        }
    };

    let (authority, path) = match rest.split_once('/') {
        Some((authority, path)) => (authority, format!("/{path}")),
        None => (rest, String::new()),
    };

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port_str)) => {
            let port: u16 = port_str.parse().map_err(|_| ScanError::InvalidArgument {
                flag: "uri-target".into(),
                reason: format!("'{port_str}' is not a valid port"),
            })?;
            (host.to_string(), port)
        }
        None => (authority.to_string(), default_port),
    };

    if host.is_empty() {
        return Err(ScanError::InvalidArgument { flag: "uri-target".into(), reason: "missing host".into() });
    }

    let endpoint = NetworkEndpoint::hostname(host).with_port(port)?;
    let service = NetworkService::new(endpoint.clone(), Transport::Tcp)
        .with_service_name(&scheme)
        .with_web_service_context(WebServiceContext {
            application_root: if path.is_empty() { None } else { Some(path) },
        });

    Ok((endpoint, service))
}

trait WithWebServiceContext {
    fn with_web_service_context(self, ctx: WebServiceContext) -> Self;
}

impl WithWebServiceContext for NetworkService {
    fn with_web_service_context(mut self, ctx: WebServiceContext) -> Self {
        self.service_context = Some(ServiceContext::WebService(ctx));
        self
    }
}

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{NetworkService, OsClass};

/// Constraint on the OS class(es) a plugin wants to run against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsClassSelector {
    #[serde(default)]
    pub vendors: HashSet<String>,
    #[serde(default)]
    pub families: HashSet<String>,
    #[serde(default)]
    pub min_accuracy: u8,
}

/// The set of constraints a plugin declares on which services it should be
/// invoked against. Every field is independently optional; an absent
/// constraint is satisfied by anything (spec §4.1's permissive-missing
/// policy), and the same policy applies when the *service* side is missing
/// the information a present constraint asks about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    #[serde(default)]
    pub service_names: Option<HashSet<String>>,
    #[serde(default)]
    pub software_name: Option<String>,
    #[serde(default)]
    pub os_class: Option<OsClassSelector>,
    #[serde(default)]
    pub for_web_service: bool,
}

impl Selectors {
    /// True if this declares no constraint at all. A fingerprinter with an
    /// empty selector set is skipped rather than treated as matching
    /// everything (spec §9 open question, resolved: preserve observed
    /// behavior).
    pub fn is_empty(&self) -> bool {
        self.service_names.is_none()
            && self.software_name.is_none()
            && self.os_class.is_none()
            && !self.for_web_service
    }
}

/// Service names treated as "web services" for the purposes of the
/// `for_web_service` selector and the web-service enrichment phase (spec
/// §6's canonical recognized set), matched case-insensitively.
pub const WEB_SERVICE_NAMES: &[&str] =
    &["http", "https", "http-proxy", "http-alt", "https-alt", "ssl/http", "ssl/https"];

/// True if `service`'s service name is one of [`WEB_SERVICE_NAMES`].
pub fn is_web_service(service: &NetworkService) -> bool {
    service
        .service_name
        .as_deref()
        .map(|name| WEB_SERVICE_NAMES.iter().any(|w| w.eq_ignore_ascii_case(name)))
        .unwrap_or(false)
}

/// Whether `service` satisfies `selectors`, per spec §4.1: each present
/// constraint must match; a constraint with no corresponding information on
/// the service side is treated as satisfied, not rejected.
pub fn matches_service(selectors: &Selectors, service: &NetworkService) -> bool {
    if let Some(names) = &selectors.service_names {
        match &service.service_name {
            Some(name) => {
                if !names.contains(name) {
                    return false;
                }
            }
            None => {}
        }
    }

    if let Some(wanted) = &selectors.software_name {
        if let Some(software) = &service.software {
            if &software.name != wanted {
                return false;
            }
        }
    }

    if selectors.for_web_service && !is_web_service(service) {
        return false;
    }

    true
}

/// Whether any of `os_classes` satisfies `selector`. An empty `os_classes`
/// list (no OS information available) satisfies any selector, per the same
/// permissive-missing policy as [`matches_service`].
pub fn matches_os(selector: &OsClassSelector, os_classes: &[OsClass]) -> bool {
    if os_classes.is_empty() {
        return true;
    }

    os_classes.iter().any(|os| {
        let vendor_ok = selector.vendors.is_empty() || selector.vendors.contains(&os.vendor);
        let family_ok = selector.families.is_empty() || selector.families.contains(&os.os_family);
        let accuracy_ok = os.accuracy >= selector.min_accuracy;
        vendor_ok && family_ok && accuracy_ok
    })
}

/// Whether `service` satisfies `selectors` fully, combining the service-level
/// checks in [`matches_service`] with the OS-class check when one is
/// declared and OS information is available for `os_classes`.
pub fn matches(selectors: &Selectors, service: &NetworkService, os_classes: &[OsClass]) -> bool {
    if !matches_service(selectors, service) {
        return false;
    }
    if let Some(os_selector) = &selectors.os_class {
        if !matches_os(os_selector, os_classes) {
            return false;
        }
    }
    true
}

/// Filters `services` down to those matching `selectors`, preserving input
/// order (spec §4.1/§4.5's stable-ordering guarantee).
pub fn filter_services<'a>(
    selectors: &Selectors,
    services: &'a [NetworkService],
    os_classes: &[OsClass],
) -> Vec<&'a NetworkService> {
    services.iter().filter(|s| matches(selectors, s, os_classes)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NetworkEndpoint, Transport};

    fn svc(name: Option<&str>) -> NetworkService {
        let mut s = NetworkService::new(
            NetworkEndpoint::ip("10.0.0.1".parse().unwrap()).with_port(80).unwrap(),
            Transport::Tcp,
        );
        if let Some(name) = name {
            s = s.with_service_name(name);
        }
        s
    }

    #[test]
    fn missing_service_name_satisfies_any_name_constraint() {
        let mut names = HashSet::new();
        names.insert("http".to_string());
        let selectors = Selectors { service_names: Some(names), ..Default::default() };
        assert!(matches_service(&selectors, &svc(None)));
    }

    #[test]
    fn present_service_name_must_match() {
        let mut names = HashSet::new();
        names.insert("ssh".to_string());
        let selectors = Selectors { service_names: Some(names), ..Default::default() };
        assert!(!matches_service(&selectors, &svc(Some("http"))));
    }

    #[test]
    fn empty_os_classes_satisfies_any_os_selector() {
        let selector = OsClassSelector { min_accuracy: 90, ..Default::default() };
        assert!(matches_os(&selector, &[]));
    }

    #[test]
    fn for_web_service_rejects_non_web_service() {
        let selectors = Selectors { for_web_service: true, ..Default::default() };
        assert!(!matches_service(&selectors, &svc(Some("ssh"))));
        assert!(matches_service(&selectors, &svc(Some("http"))));
    }

    #[test]
    fn filter_services_preserves_order() {
        let services = vec![svc(Some("http")), svc(Some("ssh")), svc(Some("https"))];
        let selectors = Selectors { for_web_service: true, ..Default::default() };
        let filtered = filter_services(&selectors, &services, &[]);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].service_name.as_deref(), Some("http"));
        assert_eq!(filtered[1].service_name.as_deref(), Some("https"));
    }
}

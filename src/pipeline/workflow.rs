use std::time::Instant;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::engine::ExecutionEngine;
use crate::models::{
    NetworkService, PortScanningReport, ReconnaissanceReport, ScanFinding, ScanResults, ScanStatus,
    ServiceContext, TargetInfo, WebServiceContext,
};
use crate::plugins::{selectors::is_web_service, PluginManager};

use super::phase::PhaseName;
use super::state::WorkflowConfig;

/// Drives the four-phase scan workflow — port scan, service fingerprint,
/// web enrichment, vuln detection — against one target, fanning each
/// phase's plugin calls out through the execution engine and imposing a
/// hard happens-before barrier between phases (spec §4.5/§5).
pub struct ScanWorkflow {
    manager: PluginManager,
    engine: ExecutionEngine,
    config: WorkflowConfig,
}

impl ScanWorkflow {
    pub fn new(manager: PluginManager, config: WorkflowConfig) -> Self {
        let engine = ExecutionEngine::with_grace_period(config.pool_size, config.plugin_timeout, config.grace_period);
        Self { manager, engine, config }
    }

    pub fn registry(&self) -> &crate::plugins::PluginRegistry {
        self.manager.registry()
    }

    pub async fn run(&self, target: TargetInfo) -> ScanResults {
        self.run_with_seed(target, Vec::new()).await
    }

    /// Runs the workflow with `seed_services` already known (e.g. a service
    /// derived from `--uri-target`, spec §6) merged ahead of whatever the
    /// port scan phase discovers. Seed entries win ties on identity key.
    pub async fn run_with_seed(&self, target: TargetInfo, seed_services: Vec<NetworkService>) -> ScanResults {
        let start = Instant::now();
        let deadline_token = CancellationToken::new();
        let _deadline_guard = self.config.scan_deadline.map(|deadline| {
            let token = deadline_token.clone();
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                token.cancel();
            })
        });

        let mut any_failure = false;

        info!(phase = %PhaseName::PortScan, "starting phase");
        let (port_report, scan_failed) = self.run_port_scan(&target, seed_services, &deadline_token).await;
        any_failure |= scan_failed;

        if port_report.services.is_empty() && scan_failed {
            return ScanResults {
                status: ScanStatus::Failed,
                status_message: "every port scanner failed or none were enabled".to_string(),
                duration: start.elapsed(),
                reconnaissance_report: ReconnaissanceReport::from_port_scan(port_report),
                findings: Vec::new(),
            };
        }

        let mut recon = ReconnaissanceReport::from_port_scan(port_report);

        if deadline_token.is_cancelled() {
            return self.partial_results(recon, Vec::new(), start, "scan deadline expired during port scan");
        }

        info!(phase = %PhaseName::ServiceFingerprint, "starting phase");
        any_failure |= self
            .run_fingerprint_round(&mut recon, &target, &deadline_token, false)
            .await;

        if deadline_token.is_cancelled() {
            return self.partial_results(recon, Vec::new(), start, "scan deadline expired during fingerprinting");
        }

        info!(phase = %PhaseName::WebEnrichment, "starting phase");
        any_failure |= self
            .run_fingerprint_round(&mut recon, &target, &deadline_token, true)
            .await;
        self.default_web_service_context(&mut recon);

        if deadline_token.is_cancelled() {
            return self.partial_results(recon, Vec::new(), start, "scan deadline expired during web enrichment");
        }

        info!(phase = %PhaseName::VulnDetection, "starting phase");
        let detection = self.run_vuln_detection(&recon, &target, &deadline_token).await;
        any_failure |= detection.any_failure;

        let (status, status_message) = if detection.attempted > 0 && detection.failed == detection.attempted {
            (ScanStatus::Failed, "All VulnDetectors failed.".to_string())
        } else if any_failure {
            (ScanStatus::PartiallySucceeded, "one or more plugins failed or timed out; results are partial".to_string())
        } else {
            (ScanStatus::Succeeded, "scan completed successfully".to_string())
        };
        let findings = detection.findings;

        info!(findings = findings.len(), status = ?status, "scan complete");

        ScanResults {
            status,
            status_message,
            duration: start.elapsed(),
            reconnaissance_report: recon,
            findings,
        }
    }

    fn partial_results(
        &self,
        recon: ReconnaissanceReport,
        findings: Vec<ScanFinding>,
        start: Instant,
        reason: &str,
    ) -> ScanResults {
        warn!(reason, "scan cut short");
        ScanResults {
            status: ScanStatus::PartiallySucceeded,
            status_message: reason.to_string(),
            duration: start.elapsed(),
            reconnaissance_report: recon,
            findings,
        }
    }

    /// Phase 3, unconditional step: any service identified as web (§4.1
    /// predicate) that still has no `WebServiceContext` gets a default
    /// application root of `"/"` regardless of whether any web-flagged
    /// fingerprinter plugin matched it (spec §4.5 step 3). URI-seeded
    /// services already carry their own context from `cli::target::from_uri`
    /// and are left untouched.
    fn default_web_service_context(&self, recon: &mut ReconnaissanceReport) {
        for service in &mut recon.services {
            if is_web_service(service) && service.web_service_context().is_none() {
                service.service_context =
                    Some(ServiceContext::WebService(WebServiceContext { application_root: Some("/".to_string()) }));
            }
        }
    }

    async fn run_port_scan(
        &self,
        target: &TargetInfo,
        seed_services: Vec<NetworkService>,
        deadline_token: &CancellationToken,
    ) -> (PortScanningReport, bool) {
        let mut services: Vec<NetworkService> = seed_services;
        let scanners = self.manager.port_scanners();
        if scanners.is_empty() {
            let failed = services.is_empty();
            return (PortScanningReport { target: target.clone(), services }, failed);
        }

        let futures = scanners.into_iter().map(|scanner| {
            let descriptor = scanner.descriptor().clone();
            let target = target.clone();
            async move { self.engine.execute(descriptor, deadline_token, async move { scanner.scan(&target).await }).await }
        });
        let results = join_all(futures).await;

        let mut any_success = false;
        let mut any_failure = false;
        for result in results {
            match result.outcome {
                Ok(report) => {
                    any_success = true;
                    for service in report.services {
                        if !services.iter().any(|s| s.identity_key() == service.identity_key()) {
                            services.push(service);
                        }
                    }
                }
                Err(_) => any_failure = true,
            }
        }

        (PortScanningReport { target: target.clone(), services }, any_failure || !any_success)
    }

    /// Runs one fingerprinting round: `web_only` selects whether only
    /// for-web-service fingerprinters run (phase 3) or only general ones do
    /// (phase 2). Each service picks the first successful result among its
    /// matching fingerprinters, in registry order.
    async fn run_fingerprint_round(
        &self,
        recon: &mut ReconnaissanceReport,
        target: &TargetInfo,
        deadline_token: &CancellationToken,
        web_only: bool,
    ) -> bool {
        let mut any_failure = false;
        for service in recon.services.clone() {
            if deadline_token.is_cancelled() {
                return any_failure;
            }
            if web_only && !is_web_service(&service) {
                continue;
            }
            let candidates: Vec<_> = self
                .manager
                .fingerprinters_for(&service, &target.os_classes)
                .into_iter()
                .filter(|fp| fp.descriptor().selectors.for_web_service == web_only)
                .collect();
            if candidates.is_empty() {
                continue;
            }

            let futures = candidates.into_iter().map(|fp| {
                let descriptor = fp.descriptor().clone();
                let service = service.clone();
                async move {
                    self.engine.execute(descriptor, deadline_token, async move { fp.fingerprint(&service).await }).await
                }
            });
            let results = join_all(futures).await;

            let mut merged = false;
            for result in results {
                match result.outcome {
                    Ok(report) if !merged => {
                        recon.merge_fingerprint(report.service);
                        merged = true;
                    }
                    Ok(_) => {}
                    Err(_) => any_failure = true,
                }
            }
        }
        any_failure
    }

    async fn run_vuln_detection(
        &self,
        recon: &ReconnaissanceReport,
        target: &TargetInfo,
        deadline_token: &CancellationToken,
    ) -> DetectionOutcome {
        let mut findings = Vec::new();
        let mut attempted = 0usize;
        let mut failed = 0usize;

        let local_matches = self.manager.matching_vuln_detectors(&recon.services, &target.os_classes);
        let local_futures = local_matches.into_iter().map(|matched| {
            let descriptor = matched.plugin.descriptor().clone();
            let target = target.clone();
            let service = matched.service.clone();
            async move {
                self.engine
                    .execute(descriptor, deadline_token, async move { matched.plugin.detect(&target, &service).await })
                    .await
            }
        });
        for result in join_all(local_futures).await {
            attempted += 1;
            match result.outcome {
                Ok(reports) => findings.extend(reports),
                Err(_) => failed += 1,
            }
        }

        // Every sub-definition of every enabled remote detector is submitted
        // unconditionally, including ones with zero matched services, so the
        // detector is always reflected in `attempted`/`failed` regardless of
        // whether anything actually matched (spec §3/§4.3).
        let remote_matches = self.manager.matching_remote_detectors(&recon.services, &target.os_classes);
        let remote_futures = remote_matches.into_iter().map(|matched| {
            let descriptor = matched.plugin.descriptor().clone();
            let target = target.clone();
            let services = matched.services.clone();
            let sub_definition = matched.sub_definition.clone();
            async move {
                self.engine
                    .execute(descriptor, deadline_token, async move {
                        matched.plugin.detect_remote(&target, &services, &sub_definition).await
                    })
                    .await
            }
        });
        for result in join_all(remote_futures).await {
            attempted += 1;
            match result.outcome {
                Ok(reports) => findings.extend(reports),
                Err(_) => failed += 1,
            }
        }

        DetectionOutcome { findings, attempted, failed, any_failure: failed > 0 }
    }
}

struct DetectionOutcome {
    findings: Vec<ScanFinding>,
    attempted: usize,
    failed: usize,
    any_failure: bool,
}

//! Data model shared by every plugin and phase of the scan workflow.

pub mod endpoint;
pub mod report;
pub mod service;
pub mod target;
pub mod vulnerability;

pub use endpoint::{EndpointType, NetworkEndpoint};
pub use report::{
    DetectionReport, FingerprintingReport, PortScanningReport, ReconnaissanceReport, ScanFinding,
    ScanResults, ScanStatus,
};
pub use service::{NetworkService, ServiceContext, Software, Transport, WebServiceContext};
pub use target::{OsClass, TargetInfo};
pub use vulnerability::{AdvisoryId, Severity, Vulnerability};

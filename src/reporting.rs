use std::fmt::Write as _;

use crate::models::Vulnerability;
use crate::plugins::{PluginRegistry, PluginType};

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn render_advisory(out: &mut String, advisory: &Vulnerability) {
    let severity = format!("{:?}", advisory.severity).to_uppercase();
    let _ = writeln!(out, "main_id {{");
    let _ = writeln!(out, "  publisher: \"{}\"", escape(&advisory.main_id.publisher));
    let _ = writeln!(out, "  value: \"{}\"", escape(&advisory.main_id.value));
    let _ = writeln!(out, "}}");
    let _ = writeln!(out, "severity: {severity}");
    let _ = writeln!(out, "title: \"{}\"", escape(&advisory.title));
    let _ = writeln!(out, "description: \"{}\"", escape(&advisory.description));
}

/// Renders every installed vuln/remote detector's declared advisory catalog
/// as newline-delimited protobuf text-format-style blocks, in registry
/// order (spec §6).
pub fn dump_advisories(registry: &PluginRegistry) -> String {
    let mut out = String::new();
    for plugin in registry.all() {
        let descriptor = plugin.descriptor();
        if !matches!(descriptor.plugin_type, PluginType::VulnDetection | PluginType::RemoteVulnDetection) {
            continue;
        }
        for advisory in &descriptor.advisories {
            render_advisory(&mut out, advisory);
            out.push('\n');
        }
    }
    out
}

//! Output formatting utilities for CLI.

use dork::minimap::{Minimap, Scene};
use dork::world::{Finding, Report, Severity};
use serde::Serialize;

/// JSON-serializable validation report.
#[derive(Debug, Serialize)]
pub(super) struct JsonReport<'a> {
    /// Number of errors.
    pub(super) errors: usize,
    /// Number of warnings.
    pub(super) warnings: usize,
    /// Findings with their message text.
    pub(super) findings: Vec<JsonFinding<'a>>,
}

/// JSON-serializable finding.
#[derive(Debug, Serialize)]
pub(super) struct JsonFinding<'a> {
    /// How serious the finding is.
    pub(super) severity: Severity,
    /// The report line.
    pub(super) message: String,
    /// Structured finding.
    #[serde(flatten)]
    pub(super) finding: &'a Finding,
}

impl<'a> JsonReport<'a> {
    /// Create from a report.
    pub(super) fn from_report(report: &'a Report, quiet: bool) -> Self {
        let threshold = if quiet { Severity::Warning } else { Severity::Info };
        Self {
            errors: report.count(Severity::Error),
            warnings: report.count(Severity::Warning),
            findings: report
                .at_least(threshold)
                .map(|finding| JsonFinding {
                    severity: finding.severity(),
                    message: finding.to_string(),
                    finding,
                })
                .collect(),
        }
    }
}

/// Format a validation report as human-readable text.
pub(super) fn format_report(report: &Report, quiet: bool) -> String {
    let threshold = if quiet { Severity::Warning } else { Severity::Info };
    let mut output = String::new();

    for finding in report.at_least(threshold) {
        let tag = match finding.severity() {
            Severity::Info => " ",
            Severity::Warning => "?",
            Severity::Error => "✗",
        };
        output.push_str(&format!("  {tag} {finding}\n"));
    }

    output.push_str(&format!(
        "\n{} errors, {} warnings\n",
        report.count(Severity::Error),
        report.count(Severity::Warning)
    ));
    output
}

/// JSON-serializable minimap.
#[derive(Debug, Serialize)]
pub(super) struct JsonMap<'a> {
    /// Highlighted room.
    pub(super) location: Option<&'a str>,
    /// The layout.
    pub(super) minimap: &'a Minimap,
    /// The frame for `location`, if it can be drawn.
    pub(super) scene: Option<Scene>,
}

/// Describe layout conflicts, one per line.
pub(super) fn format_conflicts(minimap: &Minimap) -> String {
    let mut output = String::new();
    for conflict in minimap.conflicts() {
        output.push_str(&format!(
            "Overlap at ({}, {}): {}\n",
            conflict.origin.x,
            conflict.origin.y,
            conflict.rooms.join(", ")
        ));
    }
    output
}

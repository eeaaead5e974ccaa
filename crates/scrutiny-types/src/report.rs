use serde::{Deserialize, Serialize};

/// Full result of a non-streaming analysis, one field per agent output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub project_name: Option<String>,
    pub num_screens: u32,
    /// Wire values of the checks that were actually run.
    pub checks: Vec<String>,
    pub requirements_output: String,
    pub screen_output: String,
    pub compliance_output: String,
    pub report_output: String,
    /// Backend-formatted timestamp ("%Y-%m-%d %H:%M"); kept opaque.
    pub timestamp: String,
    /// Complete markdown report.
    pub full_report: String,
}

/// One entry of `GET /design/check-types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckTypeInfo {
    /// Wire value to send back in the `checks` form field.
    pub value: String,
    /// Enum identifier, e.g. `TRACEABILITY`.
    pub name: String,
}

/// One entry of `GET /design/models`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionModel {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub recommended: bool,
}

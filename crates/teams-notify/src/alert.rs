//! Alert event types produced by the API-management monitoring layer.

use serde::Deserialize;
use std::fmt;

/// An alert notification as delivered on the proxy request flow.
///
/// Every field is optional: the monitoring layer is allowed to send partial
/// data, and absent fields render as empty strings in the card rather than
/// failing the transformation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    /// Name of the alert definition that fired.
    #[serde(default)]
    pub alert_name: Option<String>,

    /// Organization identifier.
    #[serde(default)]
    pub org: Option<String>,

    /// Free-text description of the alert.
    #[serde(default)]
    pub description: Option<String>,

    /// Pre-formatted timestamp, passed through verbatim.
    #[serde(default)]
    pub alert_time: Option<String>,

    /// Link to the remediation runbook.
    #[serde(default)]
    pub playbook: Option<String>,

    /// Threshold breaches carried by this alert, in upstream order.
    #[serde(default)]
    pub threshold_violations_formatted: Vec<ThresholdViolation>,
}

/// One threshold breach record within an alert.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdViolation {
    /// API proxy the breach was observed on.
    #[serde(default)]
    pub proxy: Option<String>,

    /// Deployment region.
    #[serde(default)]
    pub region: Option<String>,

    /// HTTP status code, sent as either a string or a number.
    #[serde(default)]
    pub status_code: Option<FieldValue>,

    /// Observed metric value that tripped the threshold.
    #[serde(default)]
    pub trigger_value: Option<FieldValue>,

    /// How long the condition held.
    #[serde(default)]
    pub duration: Option<FieldValue>,

    /// Configured threshold.
    #[serde(default)]
    pub threshold_value: Option<FieldValue>,

    /// Human-readable violation summary.
    #[serde(default)]
    pub violation: Option<String>,
}

/// A scalar the monitoring layer sends as either a JSON string or a number.
///
/// Renders its native representation: strings verbatim, numbers without any
/// additional formatting.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// String form, e.g. `"503"`.
    String(String),
    /// Numeric form, e.g. `503` or `2.5`.
    Number(serde_json::Number),
    /// Boolean form, seen from some producers for on/off trigger values.
    Bool(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

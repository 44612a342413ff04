//! Teams message-card formatting for API-management monitoring alerts.
//!
//! This crate turns a raw alert notification from an API-management
//! monitoring layer into a Microsoft Teams MessageCard payload, ready for a
//! downstream step to post to an incoming webhook. The transformation runs
//! once per alert event on the proxy request flow; on every other flow stage
//! it is a no-op.
//!
//! # Usage
//!
//! ```
//! use teams_notify::{handle_flow_event, FlowStage};
//!
//! let raw = r#"{"alertName":"Latency","org":"acme"}"#;
//!
//! // On the proxy request flow the card payload is produced...
//! let payload = handle_flow_event(FlowStage::ProxyRequest, raw).unwrap();
//! assert!(payload.is_some());
//!
//! // ...on any other stage nothing is published.
//! let skipped = handle_flow_event(FlowStage::ProxyResponse, raw).unwrap();
//! assert!(skipped.is_none());
//! ```
//!
//! # Configuration
//!
//! The optional delivery channel is configured via environment variables:
//!
//! - `TEAMS_WEBHOOK_URL`: Microsoft Teams incoming webhook URL
//!
//! # Architecture
//!
//! - [`render_teams_payload`] is the pure transformation: alert JSON in,
//!   serialized card JSON out
//! - [`handle_flow_event`] gates the transformation on the flow stage
//! - [`AlertChannel`] / [`TeamsChannel`] deliver a rendered card over HTTP

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alert;
pub mod card;
pub mod channels;
pub mod error;
mod uri;

pub use alert::{AlertEvent, FieldValue, ThresholdViolation};
pub use card::{CardFact, CardSection, MessageCard};
pub use channels::teams::TeamsChannel;
pub use channels::AlertChannel;
pub use error::{ChannelError, FormatError};

use tracing::debug;

/// Stages of the hosting pipeline's request-processing flow.
///
/// Alert bodies are only available on the proxy request stage; the formatter
/// treats every other stage as outside its trigger condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    /// Request received from the client, before proxying upstream.
    ProxyRequest,
    /// Response about to be returned to the client.
    ProxyResponse,
    /// Request about to be sent to the upstream target.
    TargetRequest,
    /// Response received from the upstream target.
    TargetResponse,
    /// Fault handling flow.
    Error,
}

impl FlowStage {
    /// Map the pipeline's stage identifier onto a flow stage.
    ///
    /// Returns `None` for identifiers this formatter does not know, which
    /// callers treat the same as any non-matching stage.
    #[must_use]
    pub fn from_flow_name(name: &str) -> Option<Self> {
        match name {
            "PROXY_REQ_FLOW" => Some(Self::ProxyRequest),
            "PROXY_RESP_FLOW" => Some(Self::ProxyResponse),
            "TARGET_REQ_FLOW" => Some(Self::TargetRequest),
            "TARGET_RESP_FLOW" => Some(Self::TargetResponse),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Get the pipeline identifier for this stage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProxyRequest => "PROXY_REQ_FLOW",
            Self::ProxyResponse => "PROXY_RESP_FLOW",
            Self::TargetRequest => "TARGET_REQ_FLOW",
            Self::TargetResponse => "TARGET_RESP_FLOW",
            Self::Error => "ERROR",
        }
    }
}

/// Transform a raw alert body into a serialized Teams MessageCard.
///
/// This is the whole formatter: parse, render the violations block, assemble
/// the card, serialize. The only failure is an input body that does not
/// parse as an alert event; partial alerts render permissively.
///
/// # Errors
///
/// Returns [`FormatError::MalformedAlertPayload`] when `raw_alert` is not a
/// valid alert JSON document.
pub fn render_teams_payload(raw_alert: &str) -> Result<String, FormatError> {
    let alert: AlertEvent =
        serde_json::from_str(raw_alert).map_err(FormatError::MalformedAlertPayload)?;

    let card = MessageCard::from_alert(&alert);
    serde_json::to_string(&card).map_err(FormatError::Serialization)
}

/// Run the formatter for one pipeline event, gated on the flow stage.
///
/// Only the proxy request stage carries an alert body; on any other stage
/// this returns `Ok(None)` without touching the input. The returned payload
/// is the caller's to hand to the delivery step — nothing is published when
/// the gate does not pass or the body is malformed.
///
/// # Errors
///
/// Returns [`FormatError::MalformedAlertPayload`] when the gate passes but
/// `request_body` is not a valid alert JSON document.
pub fn handle_flow_event(
    stage: FlowStage,
    request_body: &str,
) -> Result<Option<String>, FormatError> {
    if stage != FlowStage::ProxyRequest {
        debug!(stage = stage.as_str(), "Skipping non-proxy-request flow");
        return Ok(None);
    }

    render_teams_payload(request_body).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ALERT: &str = r#"{
        "alertName": "Latency",
        "org": "Acme",
        "description": "p99 high",
        "alertTime": "2024-01-01T00:00Z",
        "playbook": "https://runbooks/x?y=1 2",
        "thresholdViolationsFormatted": []
    }"#;

    #[test]
    fn test_malformed_payload_is_rejected() {
        let err = render_teams_payload("{not json").unwrap_err();
        assert!(matches!(err, FormatError::MalformedAlertPayload(_)));

        let err = render_teams_payload("").unwrap_err();
        assert!(matches!(err, FormatError::MalformedAlertPayload(_)));
    }

    #[test]
    fn test_gate_skips_other_stages() {
        for stage in [
            FlowStage::ProxyResponse,
            FlowStage::TargetRequest,
            FlowStage::TargetResponse,
            FlowStage::Error,
        ] {
            // Even a malformed body must not error outside the gate.
            assert!(handle_flow_event(stage, "{not json").unwrap().is_none());
            assert!(handle_flow_event(stage, SAMPLE_ALERT).unwrap().is_none());
        }
    }

    #[test]
    fn test_proxy_request_produces_payload() {
        let payload = handle_flow_event(FlowStage::ProxyRequest, SAMPLE_ALERT)
            .unwrap()
            .unwrap();
        assert!(payload.contains("MessageCard"));
    }

    #[test]
    fn test_output_round_trips_with_one_section() {
        let payload = render_teams_payload(SAMPLE_ALERT).unwrap();
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(json["sections"].as_array().unwrap().len(), 1);
        assert_eq!(json["summary"], json["sections"][0]["activityTitle"]);
        assert_eq!(json["summary"], "Alert: Latency");
    }

    #[test]
    fn test_worked_example_text() {
        let payload = render_teams_payload(SAMPLE_ALERT).unwrap();
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(
            json["sections"][0]["text"],
            "No threshold violations found.<br>[Operations Runbook](https://runbooks/x?y=1%202)"
        );
    }

    #[test]
    fn test_flow_stage_names_round_trip() {
        for stage in [
            FlowStage::ProxyRequest,
            FlowStage::ProxyResponse,
            FlowStage::TargetRequest,
            FlowStage::TargetResponse,
            FlowStage::Error,
        ] {
            assert_eq!(FlowStage::from_flow_name(stage.as_str()), Some(stage));
        }
        assert_eq!(FlowStage::from_flow_name("POSTCLIENT_FLOW"), None);
    }
}

//! Teams MessageCard assembly from alert events.
//!
//! The card is built as a structured document and serialized in one step;
//! field content never touches the JSON framing.

use serde::Serialize;

use crate::alert::{AlertEvent, ThresholdViolation};
use crate::uri::encode_uri;

/// Theme color for alert cards (Teams sidebar strip).
const THEME_COLOR: &str = "FF4300";

/// Card type marker for the legacy connector schema.
const CARD_TYPE: &str = "MessageCard";

/// Canonical schema context URL.
const CARD_CONTEXT: &str = "http://schema.org/extensions";

/// Line break marker interpreted by the Teams markdown renderer.
const LINE_BREAK: &str = "<br>";

/// Replacement text when an alert carries no violation records.
const NO_VIOLATIONS_TEXT: &str = "No threshold violations found.";

/// Display label of the runbook link appended to the card text.
const RUNBOOK_LABEL: &str = "Operations Runbook";

/// A Teams MessageCard document for an incoming webhook.
#[derive(Debug, Serialize)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    card_type: &'static str,
    #[serde(rename = "@context")]
    context: &'static str,
    /// Notification summary, shown in toasts and channel previews.
    pub summary: String,
    #[serde(rename = "themeColor")]
    theme_color: &'static str,
    /// Card body. Always exactly one section.
    pub sections: Vec<CardSection>,
}

/// The single content section of an alert card.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSection {
    /// Section heading, identical to the card summary.
    pub activity_title: String,
    /// Subheading naming the originating organization.
    pub activity_subtitle: String,
    /// Enables markdown rendering of the text block and facts.
    pub markdown: bool,
    /// Name/value pairs rendered as a fact table.
    pub facts: Vec<CardFact>,
    /// Rendered violations followed by the runbook link.
    pub text: String,
}

/// One name/value entry in a section's fact table.
#[derive(Debug, Serialize)]
pub struct CardFact {
    name: String,
    value: String,
}

impl CardFact {
    /// Create a fact entry.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl MessageCard {
    /// Build the card for an alert event.
    ///
    /// Absent alert fields render as empty strings; an absent or empty
    /// violation list renders as a fixed placeholder line.
    #[must_use]
    pub fn from_alert(alert: &AlertEvent) -> Self {
        let alert_name = alert.alert_name.as_deref().unwrap_or_default();
        let title = format!("Alert: {alert_name}");

        let section = CardSection {
            activity_title: title.clone(),
            activity_subtitle: format!(
                "Organization: {}",
                alert.org.as_deref().unwrap_or_default()
            ),
            markdown: true,
            facts: vec![
                CardFact::new("Description", alert.description.as_deref().unwrap_or_default()),
                CardFact::new("Alert Time", alert.alert_time.as_deref().unwrap_or_default()),
            ],
            text: format!(
                "{}{LINE_BREAK}[{RUNBOOK_LABEL}]({})",
                render_violations(&alert.threshold_violations_formatted),
                encode_uri(alert.playbook.as_deref().unwrap_or_default()),
            ),
        };

        Self {
            card_type: CARD_TYPE,
            context: CARD_CONTEXT,
            summary: title,
            theme_color: THEME_COLOR,
            sections: vec![section],
        }
    }
}

/// Render the violation records as a markdown block, preserving input order.
///
/// Each record emits seven labeled lines; an extra line break after each
/// record separates it visually from the next.
fn render_violations(violations: &[ThresholdViolation]) -> String {
    if violations.is_empty() {
        return NO_VIOLATIONS_TEXT.to_string();
    }

    let mut block = String::new();
    for v in violations {
        push_labeled_line(&mut block, "Proxy", v.proxy.as_deref().unwrap_or_default());
        push_labeled_line(&mut block, "Region", v.region.as_deref().unwrap_or_default());
        push_labeled_line(&mut block, "Status Code", &render_value(&v.status_code));
        push_labeled_line(&mut block, "Trigger Value", &render_value(&v.trigger_value));
        push_labeled_line(&mut block, "Duration", &render_value(&v.duration));
        push_labeled_line(&mut block, "Threshold Value", &render_value(&v.threshold_value));
        push_labeled_line(&mut block, "Violation", v.violation.as_deref().unwrap_or_default());
        block.push_str(LINE_BREAK);
    }
    block
}

/// Append one `**Label**: `value`` line to the block.
///
/// Backticks in the value would terminate the code span early, so they are
/// neutralized before embedding.
fn push_labeled_line(block: &mut String, label: &str, value: &str) {
    let value = value.replace('`', "'");
    block.push_str(&format!("**{label}**: `{value}`{LINE_BREAK}"));
}

fn render_value(value: &Option<crate::alert::FieldValue>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

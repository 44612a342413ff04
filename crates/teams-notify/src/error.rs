//! Error types for alert-card formatting and delivery.

use thiserror::Error;

/// Errors that can occur while turning a raw alert body into a message card.
///
/// A payload that is not valid JSON (or does not fit the alert shape) is the
/// only failure the formatter itself defines. Missing fields, an empty
/// violation list, or a malformed playbook URL are rendered permissively and
/// never error.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The raw alert body could not be parsed as an alert event.
    #[error("malformed alert payload: {0}")]
    MalformedAlertPayload(#[source] serde_json::Error),

    /// The assembled card failed to serialize.
    #[error("card serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Errors that can occur when delivering a card to a webhook.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Channel is not configured
    #[error("Channel not configured: {0}")]
    NotConfigured(String),

    /// Rate limited by the service
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

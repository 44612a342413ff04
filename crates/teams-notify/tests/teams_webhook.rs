//! Integration tests for Teams webhook delivery.
//!
//! These tests verify that a rendered alert card reaches the incoming
//! webhook exactly as serialized, and that webhook failures map onto the
//! documented channel errors.

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use teams_notify::{AlertChannel, AlertEvent, ChannelError, MessageCard, TeamsChannel};

const SAMPLE_ALERT: &str = r#"{
    "alertName": "Latency",
    "org": "Acme",
    "description": "p99 high",
    "alertTime": "2024-01-01T00:00Z",
    "playbook": "https://runbooks/x?y=1 2",
    "thresholdViolationsFormatted": [
        {
            "proxy": "orders-v1",
            "region": "us-east-1",
            "statusCode": 503,
            "triggerValue": "2500ms",
            "duration": 300,
            "thresholdValue": 1000,
            "violation": "p99 latency above threshold"
        }
    ]
}"#;

fn sample_card() -> MessageCard {
    let alert: AlertEvent = serde_json::from_str(SAMPLE_ALERT).unwrap();
    MessageCard::from_alert(&alert)
}

#[tokio::test]
async fn delivers_serialized_card_to_webhook() {
    let server = MockServer::start().await;
    let card = sample_card();
    let expected = serde_json::to_value(&card).unwrap();

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("content-type", "application/json"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let channel = TeamsChannel::new(server.uri());
    channel.send(&card).await.unwrap();
}

#[tokio::test]
async fn delivery_works_through_channel_trait() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let channel: Box<dyn AlertChannel> = Box::new(TeamsChannel::new(server.uri()));
    assert!(channel.enabled());
    assert_eq!(channel.name(), "teams");
    channel.send(&sample_card()).await.unwrap();
}

#[tokio::test]
async fn rate_limit_response_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "17"))
        .expect(1)
        .mount(&server)
        .await;

    let channel = TeamsChannel::new(server.uri());
    let err = channel.send(&sample_card()).await.unwrap_err();

    assert!(matches!(
        err,
        ChannelError::RateLimited {
            retry_after_secs: 17
        }
    ));
}

#[tokio::test]
async fn server_error_maps_to_other() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let channel = TeamsChannel::new(server.uri());
    let err = channel.send(&sample_card()).await.unwrap_err();

    match err {
        ChannelError::Other(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("boom"));
        }
        other => panic!("expected Other, got: {other:?}"),
    }
}

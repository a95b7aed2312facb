//! End-to-end tests for [`HttpMatchNotifier`] against a local webhook.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use pawmatch_core::test_support::sample_match_result;
use pawmatch_notify::{HttpMatchNotifier, HttpMatchNotifierConfig, MatchNotifier, NotifyError};
use rstest::rstest;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Webhook {
    status: StatusCode,
    delay: Duration,
    received: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>,
}

impl Webhook {
    fn new(status: StatusCode, delay: Duration) -> Self {
        Self {
            status,
            delay,
            received: Arc::default(),
        }
    }

    fn received(&self) -> Vec<(Option<String>, serde_json::Value)> {
        self.received.lock().expect("webhook lock").clone()
    }
}

async fn capture(
    State(hook): State<Webhook>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    tokio::time::sleep(hook.delay).await;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let json = serde_json::from_slice(&body).expect("webhook body is JSON");
    hook.received
        .lock()
        .expect("webhook lock")
        .push((content_type, json));
    (hook.status, "received")
}

async fn spawn_webhook(hook: Webhook) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind webhook");
    let addr = listener.local_addr().expect("webhook address");
    let app = Router::new().route("/notify", post(capture)).with_state(hook);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("webhook serves");
    });
    addr
}

fn notifier_for(addr: SocketAddr, timeout: Duration) -> HttpMatchNotifier {
    let config =
        HttpMatchNotifierConfig::new(format!("http://{addr}/notify")).with_timeout(timeout);
    HttpMatchNotifier::with_config(config).expect("notifier should build")
}

#[rstest]
#[tokio::test]
async fn posts_envelope_as_json() {
    let hook = Webhook::new(StatusCode::OK, Duration::ZERO);
    let addr = spawn_webhook(hook.clone()).await;
    let found = sample_match_result();

    let receipt = notifier_for(addr, Duration::from_secs(5))
        .notify(&found)
        .await
        .expect("delivery succeeds");

    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.body, "received");
    let received = hook.received();
    assert_eq!(received.len(), 1);
    let (content_type, body) = received.first().expect("one request");
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        &serde_json::json!({
            "object": "special",
            "data": serde_json::to_value(&found).expect("match serialises"),
        })
    );
}

#[rstest]
#[tokio::test]
async fn non_success_status_is_an_error() {
    let hook = Webhook::new(StatusCode::BAD_GATEWAY, Duration::ZERO);
    let addr = spawn_webhook(hook.clone()).await;

    let err = notifier_for(addr, Duration::from_secs(5))
        .notify(&sample_match_result())
        .await
        .expect_err("502 should fail");

    match err {
        NotifyError::HttpStatus { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, "received");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert_eq!(hook.received().len(), 1);
}

#[rstest]
#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);

    let err = notifier_for(addr, Duration::from_secs(5))
        .notify(&sample_match_result())
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, NotifyError::Network { .. }), "got {err:?}");
}

#[rstest]
#[tokio::test]
async fn slow_webhook_times_out() {
    let hook = Webhook::new(StatusCode::OK, Duration::from_secs(3));
    let addr = spawn_webhook(hook).await;

    let err = notifier_for(addr, Duration::from_millis(200))
        .notify(&sample_match_result())
        .await
        .expect_err("request should time out");

    assert!(matches!(err, NotifyError::Timeout { .. }), "got {err:?}");
}

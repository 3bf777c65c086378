//! HTTP polling integration tests using wiremock.
//!
//! These tests drive the REST client, the HTTP fetcher and the credential
//! service against a mock access-control server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use credpoll::PollError;
use credpoll::client::{HttpFetcher, RestClient, RestConfig};
use credpoll::credential::{AddCardRequest, Card, CredentialService, issued_mobile_credential};
use credpoll::domain::PollOutcome;
use credpoll::poll::{CancelSignal, PollPolicy, Poller, cancel_pair};
use credpoll::trigger::{Trigger, TriggerRequest};

const API_KEY: &str = "test-api-key";
const CARDHOLDER: &str = "/api/cardholders/325";

/// Helper to build a client pointed at the mock server
fn client_for(server: &MockServer) -> Arc<RestClient> {
    let config = RestConfig::new(format!("{}/", server.uri()), API_KEY);
    Arc::new(RestClient::new(&config).unwrap())
}

fn fast_policy(max_attempts: u32) -> PollPolicy {
    PollPolicy::new(max_attempts, Duration::from_millis(10)).unwrap()
}

fn mobile_type(server: &MockServer) -> String {
    format!("{}/api/card_types/375", server.uri())
}

fn pending_cardholder(server: &MockServer) -> Value {
    json!({
        "href": format!("{}{}", server.uri(), CARDHOLDER),
        "cards": [
            {"number": "1234", "type": {"href": format!("{}/api/card_types/1", server.uri())}},
            {"number": "pixel-7", "type": {"href": mobile_type(server)}, "invitation": {"status": "sent"}}
        ]
    })
}

fn issued_cardholder(server: &MockServer) -> Value {
    json!({
        "href": format!("{}{}", server.uri(), CARDHOLDER),
        "cards": [
            {"number": "1234", "type": {"href": format!("{}/api/card_types/1", server.uri())}},
            {
                "href": format!("{}{}/cards/99", server.uri(), CARDHOLDER),
                "number": "pixel-7",
                "type": {"href": mobile_type(server)},
                "invitation": {"status": "sent", "href": "https://cloud.example.com/inv/abc"}
            }
        ]
    })
}

#[tokio::test]
async fn test_get_json_sends_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CARDHOLDER))
        .and(header("Authorization", format!("GGL-API-KEY {}", API_KEY).as_str()))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"firstName": "Ada"})))
        .expect(1)
        .mount(&server)
        .await;

    let doc = client_for(&server).get_json(CARDHOLDER).await.unwrap();
    assert_eq!(doc["firstName"], "Ada");
}

#[tokio::test]
async fn test_rejected_write_uses_message_field() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(CARDHOLDER))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Card type is not a mobile credential"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.submit(&TriggerRequest::patch(CARDHOLDER, json!({}))).await;

    match result {
        Err(PollError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Card type is not a mobile credential");
        }
        other => panic!("Expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejected_write_falls_back_to_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/cardholders/325/cards/99"))
        .respond_with(ResponseTemplate::new(403).set_body_string("  Operator lacks privilege  "))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .submit(&TriggerRequest::delete("/api/cardholders/325/cards/99"))
        .await;

    match result {
        Err(PollError::Rejected { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Operator lacks privilege");
        }
        other => panic!("Expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_poller_matches_after_pending_fetches() {
    let server = MockServer::start().await;

    // First two reads show the invitation without its cloud href
    Mock::given(method("GET"))
        .and(path(CARDHOLDER))
        .respond_with(ResponseTemplate::new(200).set_body_json(pending_cardholder(&server)))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CARDHOLDER))
        .respond_with(ResponseTemplate::new(200).set_body_json(issued_cardholder(&server)))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Arc::new(HttpFetcher::<Card>::new(client_for(&server)));
    let poller = Poller::with_policy(fetcher, fast_policy(10));
    let predicate = issued_mobile_credential(mobile_type(&server), None);

    let session = poller.run(CARDHOLDER, &predicate, &CancelSignal::never()).await;

    assert_eq!(session.fetch_count(), 3);
    match session.outcome {
        PollOutcome::Matched { snapshot, item } => {
            assert_eq!(snapshot.len(), 2);
            assert_eq!(item.invitation_href(), Some("https://cloud.example.com/inv/abc"));
        }
        other => panic!("Expected match, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_ends_poll_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CARDHOLDER))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "database offline"})))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Arc::new(HttpFetcher::<Card>::new(client_for(&server)));
    let poller = Poller::with_policy(fetcher, fast_policy(5));
    let predicate = issued_mobile_credential(mobile_type(&server), None);

    let outcome = poller.poll(CARDHOLDER, &predicate, &CancelSignal::never()).await;
    match outcome {
        PollOutcome::TransportError(e) => {
            assert!(e.is_transport());
            assert!(e.to_string().contains("database offline"));
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issue_patches_then_polls() {
    let server = MockServer::start().await;
    let request = AddCardRequest::new(mobile_type(&server))
        .with_number("pixel-7")
        .with_email("student@example.edu");

    Mock::given(method("PATCH"))
        .and(path(CARDHOLDER))
        .and(body_json(request.to_body()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CARDHOLDER))
        .respond_with(ResponseTemplate::new(200).set_body_json(pending_cardholder(&server)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CARDHOLDER))
        .respond_with(ResponseTemplate::new(200).set_body_json(issued_cardholder(&server)))
        .mount(&server)
        .await;

    let service = CredentialService::new(client_for(&server), "/cards", fast_policy(10));
    let issued = service.issue(CARDHOLDER, &request, &CancelSignal::never()).await.unwrap();

    assert_eq!(issued.operation.resource, CARDHOLDER);
    assert_eq!(issued.operation.correlation.as_deref(), Some("pixel-7"));
    assert_eq!(issued.completion.attempts, 2);
    assert_eq!(issued.completion.item.number.as_deref(), Some("pixel-7"));
}

#[tokio::test]
async fn test_issue_rejected_never_polls() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(CARDHOLDER))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid email"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let service = CredentialService::new(client_for(&server), "/cards", fast_policy(3));
    let request = AddCardRequest::new(mobile_type(&server)).with_email("not-an-email");
    let result = service.issue(CARDHOLDER, &request, &CancelSignal::never()).await;

    assert!(matches!(result, Err(PollError::Rejected { status: 400, .. })));
}

#[tokio::test]
async fn test_watch_times_out_with_last_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CARDHOLDER))
        .respond_with(ResponseTemplate::new(200).set_body_json(pending_cardholder(&server)))
        .expect(3)
        .mount(&server)
        .await;

    let service = CredentialService::new(client_for(&server), "/cards", fast_policy(3));
    let predicate = issued_mobile_credential(mobile_type(&server), Some("pixel-7".into()));
    let result = service.watch(CARDHOLDER, &predicate, &CancelSignal::never()).await;

    match result {
        Err(PollError::Timeout {
            resource,
            attempts,
            last_snapshot,
        }) => {
            assert_eq!(resource, CARDHOLDER);
            assert_eq!(attempts, 3);
            assert_eq!(last_snapshot["items"].as_array().map(Vec::len), Some(2));
        }
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_watch_cancelled_before_first_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issued_cardholder(&server)))
        .expect(0)
        .mount(&server)
        .await;

    let (handle, signal) = cancel_pair();
    handle.cancel();

    let service = CredentialService::new(client_for(&server), "/cards", fast_policy(3));
    let predicate = issued_mobile_credential(mobile_type(&server), None);
    let result = service.watch(CARDHOLDER, &predicate, &signal).await;

    assert!(matches!(result, Err(PollError::Cancelled)));
}

#[tokio::test]
async fn test_list_returns_only_mobile_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CARDHOLDER))
        .respond_with(ResponseTemplate::new(200).set_body_json(issued_cardholder(&server)))
        .mount(&server)
        .await;

    let service = CredentialService::new(client_for(&server), "/cards", fast_policy(1));
    let cards = service.list(CARDHOLDER).await.unwrap();

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].number.as_deref(), Some("pixel-7"));
}

#[tokio::test]
async fn test_revoke_deletes_card() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/cardholders/325/cards/99"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = CredentialService::new(client_for(&server), "/cards", fast_policy(1));
    let card_href = format!("{}/api/cardholders/325/cards/99", server.uri());
    service.revoke(&card_href).await.unwrap();
}

//! Single-host credential probe
//!
//! One outbound POST per invocation, no retries. Every failure mode
//! (unreachable host, non-2xx status, unreadable or non-object body)
//! collapses to `AuthOutcome::Failure`; nothing propagates to the
//! caller as an error.

use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::debug;

use crate::hosts::Host;

/// Fixed path appended to every host endpoint for credential checks.
pub const AUTH_PATH: &str = "/api/v1/auth/request_api_token/";

/// Result of one credential check against one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The host rejected the credentials or could not be reached.
    Failure,
    /// The host accepted the credentials. `body` is the host's JSON
    /// object response with `host_name` stamped in.
    Success { body: Vec<u8>, host_name: String },
}

/// Check the raw credential payload against a single host.
///
/// Only a 2xx response whose body parses as a JSON object is a
/// success; the object is re-serialized with the host's name stamped
/// in so the winner can be attributed downstream.
pub async fn probe_host(client: &reqwest::Client, host: &Host, payload: Bytes) -> AuthOutcome {
    let endpoint = format!("{}{}", host.endpoint, AUTH_PATH);

    let response = match client
        .post(&endpoint)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            debug!(host = %host.name, error = %e, "Credential check could not reach host");
            return AuthOutcome::Failure;
        }
    };

    if !response.status().is_success() {
        debug!(host = %host.name, status = %response.status(), "Host rejected credentials");
        return AuthOutcome::Failure;
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            debug!(host = %host.name, error = %e, "Failed to read host response body");
            return AuthOutcome::Failure;
        }
    };

    match stamp_host_name(&body, &host.name) {
        Some(stamped) => AuthOutcome::Success {
            body: stamped,
            host_name: host.name.clone(),
        },
        None => {
            debug!(host = %host.name, "Host response is not a JSON object");
            AuthOutcome::Failure
        }
    }
}

/// Parse `body` as a generic JSON object, insert the host's name under
/// `host_name` (overwriting any existing value), and re-serialize.
/// Unknown fields pass through untouched. Returns `None` when the body
/// is not a JSON object.
fn stamp_host_name(body: &[u8], host_name: &str) -> Option<Vec<u8>> {
    let mut object: Map<String, Value> = serde_json::from_slice(body).ok()?;
    object.insert(
        "host_name".to_string(),
        Value::String(host_name.to_string()),
    );
    serde_json::to_vec(&object).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{mock_host, test_client, unreachable_host};

    #[test]
    fn test_stamp_inserts_host_name() {
        let stamped = stamp_host_name(br#"{"message": "Some message"}"#, "demo").unwrap();
        assert_eq!(
            stamped,
            br#"{"host_name":"demo","message":"Some message"}"#
        );
    }

    #[test]
    fn test_stamp_preserves_unknown_fields() {
        let body = br#"{"auth_token": "abc123", "tier": 2, "nested": {"a": [1, 2]}}"#;
        let stamped = stamp_host_name(body, "pacific").unwrap();

        let object: Map<String, Value> = serde_json::from_slice(&stamped).unwrap();
        assert_eq!(object["host_name"], "pacific");
        assert_eq!(object["auth_token"], "abc123");
        assert_eq!(object["tier"], 2);
        assert_eq!(object["nested"]["a"][1], 2);
    }

    #[test]
    fn test_stamp_overwrites_existing_host_name() {
        let stamped = stamp_host_name(br#"{"host_name": "impostor"}"#, "demo").unwrap();
        assert_eq!(stamped, br#"{"host_name":"demo"}"#);
    }

    #[test]
    fn test_stamp_rejects_non_object_bodies() {
        assert!(stamp_host_name(b"not json", "demo").is_none());
        assert!(stamp_host_name(br#"[1, 2, 3]"#, "demo").is_none());
        assert!(stamp_host_name(br#""just a string""#, "demo").is_none());
        assert!(stamp_host_name(b"", "demo").is_none());
    }

    #[tokio::test]
    async fn test_probe_success_stamps_body() {
        let (host, _server) = mock_host("demo", 202, r#"{"message": "Some message"}"#).await;

        let outcome = probe_host(&test_client(), &host, Bytes::from(r#"{"phone": "123456"}"#)).await;

        assert_eq!(
            outcome,
            AuthOutcome::Success {
                body: br#"{"host_name":"demo","message":"Some message"}"#.to_vec(),
                host_name: "demo".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_probe_forwards_payload_to_auth_path() {
        use wiremock::matchers::{body_string, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(AUTH_PATH))
            .and(body_string(r#"{"phone": "123456"}"#))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"ok": true}"#, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let host = Host::new("demo", server.uri());
        let outcome = probe_host(&test_client(), &host, Bytes::from(r#"{"phone": "123456"}"#)).await;

        assert!(matches!(outcome, AuthOutcome::Success { .. }));
    }

    #[tokio::test]
    async fn test_probe_non_2xx_is_failure() {
        let (host, _server) = mock_host("demo", 400, r#"{"message": "Some message"}"#).await;

        let outcome = probe_host(&test_client(), &host, Bytes::from("{}")).await;
        assert_eq!(outcome, AuthOutcome::Failure);
    }

    #[tokio::test]
    async fn test_probe_non_object_body_is_failure() {
        let (host, _server) = mock_host("demo", 200, "<html>not json</html>").await;

        let outcome = probe_host(&test_client(), &host, Bytes::from("{}")).await;
        assert_eq!(outcome, AuthOutcome::Failure);
    }

    #[tokio::test]
    async fn test_probe_unreachable_host_is_failure() {
        let host = unreachable_host("gone");

        let outcome = probe_host(&test_client(), &host, Bytes::from("{}")).await;
        assert_eq!(outcome, AuthOutcome::Failure);
    }
}

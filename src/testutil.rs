//! Shared test helpers — available to all `#[cfg(test)]` modules in the crate.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::{Config, NodeConfig, ProbeConfig};
use crate::hosts::{Host, HostRegistry};
use crate::probe::AUTH_PATH;
use crate::AppState;

/// A `reqwest::Client` with proxy disabled (avoids macOS
/// system-configuration panics in sandboxed tests) and a request
/// timeout so a misbehaving endpoint cannot hang a test.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// A minimal `Config` around the given registry.
pub fn test_config(hosts: HostRegistry) -> Config {
    Config {
        hosts,
        node: NodeConfig {
            bind_address: "127.0.0.1:8080".to_string(),
        },
        probe: ProbeConfig::default(),
    }
}

/// Build a full `Arc<AppState>` around the given registry.
pub fn test_state(hosts: HostRegistry) -> Arc<AppState> {
    Arc::new(AppState {
        config: test_config(hosts),
        http_client: test_client(),
    })
}

/// Start a mock backend that answers the auth path with the given
/// status and body.
///
/// Returns both the `Host` and the `MockServer` guard — the caller
/// must keep the server alive for the duration of the test.
pub async fn mock_host(name: &str, status: u16, body: &str) -> (Host, MockServer) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_owned(), "application/json"))
        .mount(&server)
        .await;

    (Host::new(name, server.uri()), server)
}

/// Like [`mock_host`], but the response is held back for `delay`.
pub async fn delayed_mock_host(
    name: &str,
    status: u16,
    body: &str,
    delay: Duration,
) -> (Host, MockServer) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_raw(body.to_owned(), "application/json")
                .set_delay(delay),
        )
        .mount(&server)
        .await;

    (Host::new(name, server.uri()), server)
}

/// A host whose endpoint refuses connections immediately.
pub fn unreachable_host(name: &str) -> Host {
    Host::new(name, "http://127.0.0.1:9")
}

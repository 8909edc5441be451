//! Concurrent credential-check fan-out
//!
//! The coordinator launches one probe task per host and reduces their
//! outcomes to a single result: the first success wins, and all-failed
//! is declared only once every probe has reported.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::hosts::HostRegistry;
use crate::probe::{self, AuthOutcome};

/// Single aggregated result of a fan-out across all configured hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceResult {
    /// Every host rejected the credentials (or none are configured).
    AllFailed,
    /// Stamped response body of the first host that accepted the
    /// credentials.
    WinningResponse { payload: Vec<u8> },
}

/// Fan one credential check out to every host in the registry and
/// return the first success, or `AllFailed` once every probe has
/// reported failure.
///
/// Terminates for every registry size, including zero hosts. Probes
/// that finish after the winner is chosen are discarded without
/// blocking; they cannot affect the result.
pub async fn run_race(
    client: &reqwest::Client,
    registry: &HostRegistry,
    payload: Bytes,
) -> RaceResult {
    // Single-slot channel: the first success parks its payload here.
    // `try_send` keeps later successes from ever blocking their tasks.
    let (success_tx, mut success_rx) = mpsc::channel::<(String, Vec<u8>)>(1);

    // Countdown of probes still outstanding. Only failures decrement,
    // so reaching zero is exactly the all-failed condition.
    let (pending_tx, mut pending_rx) = watch::channel(registry.len());
    let pending_tx = Arc::new(pending_tx);

    for host in registry.iter() {
        let client = client.clone();
        let host = host.clone();
        let payload = payload.clone();
        let success_tx = success_tx.clone();
        let pending_tx = Arc::clone(&pending_tx);

        tokio::spawn(async move {
            match probe::probe_host(&client, &host, payload).await {
                AuthOutcome::Success { body, host_name } => {
                    if success_tx.try_send((host_name, body)).is_err() {
                        debug!(host = %host.name, "Dropping success that lost the race");
                    }
                }
                AuthOutcome::Failure => {
                    pending_tx.send_modify(|pending| *pending -= 1);
                }
            }
        });
    }
    drop(success_tx);

    tokio::select! {
        Some((host_name, payload)) = success_rx.recv() => {
            debug!(host = %host_name, "Host won the credential race");
            RaceResult::WinningResponse { payload }
        }
        _ = pending_rx.wait_for(|pending| *pending == 0) => {
            debug!(hosts = registry.len(), "Every host rejected the credentials");
            RaceResult::AllFailed
        }
    }
}

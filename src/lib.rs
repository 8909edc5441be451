//! auth-delegate - A concurrent multi-host credential-check delegate
//!
//! This crate accepts one authentication request, replays it against
//! every configured backend host in parallel, and answers with the
//! response of the first host that accepts the credentials:
//! - Ordered, immutable host registry from configuration
//! - One-shot fan-out race with first-success-wins semantics
//! - Uniform invalid-credentials response once every host has rejected
//! - REST entry point mirroring the upstream auth path

pub mod api;
pub mod config;
pub mod hosts;
pub mod probe;
pub mod race;
#[cfg(test)]
pub mod testutil;

use config::Config;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
}

//! Response shaping for credential-check results
//!
//! Auth failure is communicated in the body, never in the HTTP status:
//! both outcomes are served as 200 with the fixed cross-origin header
//! set attached.

use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::race::RaceResult;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";

/// Body returned when every host rejects the credentials.
/// Field order is part of the wire contract.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FailureBody {
    pub status: String,
    pub message: String,
}

impl FailureBody {
    pub fn invalid_credentials() -> Self {
        Self {
            status: "fail".to_string(),
            message: "Invalid username or password".to_string(),
        }
    }
}

/// Final response for one credential check. Built once from a race
/// result, then converted into the transport response exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub body: Vec<u8>,
    pub status: StatusCode,
}

impl ResponseEnvelope {
    pub fn from_result(result: RaceResult) -> Self {
        let body = match result {
            RaceResult::WinningResponse { payload } => payload,
            RaceResult::AllFailed => {
                serde_json::to_vec(&FailureBody::invalid_credentials()).unwrap_or_default()
            }
        };

        Self {
            body,
            status: StatusCode::OK,
        }
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> axum::response::Response {
        Response::builder()
            .status(self.status)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN)
            .header(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS)
            .body(Body::from(self.body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

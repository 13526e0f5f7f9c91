//! Admission checks for slash-command callbacks.
//!
//! Checks run in a fixed order and stop at the first failure:
//! method, header presence, signature, body, form fields. A request that
//! fails an early check never reports a later check's status.

use crate::slack::{SigningSecret, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::types::{Command, IncomingRequest};
use axum::http::{Method, StatusCode};
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Why a request was turned away.
///
/// Several reasons share a status code; the variant is kept for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("missing {} header", TIMESTAMP_HEADER)]
    MissingTimestamp,

    #[error("missing {} header", SIGNATURE_HEADER)]
    MissingSignature,

    #[error("signature mismatch")]
    SignatureMismatch,

    #[error("empty body")]
    EmptyBody,

    #[error("malformed form body: {0}")]
    MalformedBody(String),
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Rejection::MissingTimestamp
            | Rejection::MissingSignature
            | Rejection::SignatureMismatch => StatusCode::FORBIDDEN,
            Rejection::EmptyBody | Rejection::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

pub type ValidationOutcome = Result<Command, Rejection>;

pub fn validate(request: &IncomingRequest, secret: &SigningSecret) -> ValidationOutcome {
    if request.method != Method::POST {
        return Err(Rejection::MethodNotAllowed(request.method.clone()));
    }

    let timestamp = request
        .header(TIMESTAMP_HEADER)
        .ok_or(Rejection::MissingTimestamp)?;
    let signature = request
        .header(SIGNATURE_HEADER)
        .ok_or(Rejection::MissingSignature)?;

    if !secret.verify(timestamp, &request.body, signature) {
        return Err(Rejection::SignatureMismatch);
    }

    if request.body.is_empty() {
        return Err(Rejection::EmptyBody);
    }

    parse_command(&request.body)
}

/// Fails if the body, or any percent-decoded key or value, is not UTF-8.
///
/// The form decoder substitutes U+FFFD for bad sequences, so this has to run first.
fn check_utf8(body: &[u8]) -> Result<(), Rejection> {
    let body = std::str::from_utf8(body).map_err(|e| Rejection::MalformedBody(e.to_string()))?;
    for part in body.split('&').flat_map(|pair| pair.splitn(2, '=')) {
        percent_decode_str(part)
            .decode_utf8()
            .map_err(|e| Rejection::MalformedBody(e.to_string()))?;
    }
    Ok(())
}

/// Pulls `text` out of a form-encoded body. Repeated keys resolve to the last value.
pub fn parse_command(body: &[u8]) -> Result<Command, Rejection> {
    check_utf8(body)?;

    let fields: Vec<(String, String)> =
        serde_urlencoded::from_bytes(body).map_err(|e| Rejection::MalformedBody(e.to_string()))?;

    let query = fields
        .into_iter()
        .rev()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value)
        .unwrap_or_default();

    Ok(Command { query })
}

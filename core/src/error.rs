//! Error types for the post client and the submission flow.
//!
//! # Design
//! Three layers, one enum each. `ApiError` covers building and parsing
//! requests, `TransportError` covers the round-trip the host performs, and
//! `SubmitError` is what the form shows. The `Display` text of a
//! `SubmitError` is the message rendered to the user, so conversions into it
//! decide the wording.

use thiserror::Error;

/// Shown when the title or body is blank.
pub const VALIDATION_MESSAGE: &str = "제목과 내용을 모두 입력해주세요.";

/// Shown when a failure carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "알 수 없는 오류가 발생했습니다.";

/// Errors returned by `PostClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 2xx.
    #[error("HTTP error! status: {status}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into a `Post`.
    #[error("{0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("{0}")]
    SerializationError(String),
}

/// Failure to complete the HTTP round-trip at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("{0}")]
    Message(String),

    /// The transport failed without saying why.
    #[error("transport failed without a message")]
    Opaque,
}

impl TransportError {
    /// The failure text, if there is any worth showing.
    pub fn message(&self) -> Option<&str> {
        match self {
            TransportError::Message(msg) if !msg.trim().is_empty() => Some(msg),
            _ => None,
        }
    }
}

/// Outcome of a rejected or failed submission. `Display` is user-facing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    /// A submission is already outstanding.
    #[error("이미 전송 중입니다.")]
    InFlight,

    #[error("{0}")]
    RequestFailed(String),

    #[error("{}", FALLBACK_MESSAGE)]
    Unknown,

    /// A completion arrived for an attempt the form no longer waits on.
    #[error("stale completion ignored")]
    Stale,
}

impl SubmitError {
    fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            SubmitError::Unknown
        } else {
            SubmitError::RequestFailed(text)
        }
    }
}

impl From<ApiError> for SubmitError {
    fn from(err: ApiError) -> Self {
        match err {
            e @ ApiError::HttpError { .. } => SubmitError::RequestFailed(e.to_string()),
            ApiError::DeserializationError(msg) | ApiError::SerializationError(msg) => {
                SubmitError::from_text(msg)
            }
        }
    }
}

impl From<TransportError> for SubmitError {
    fn from(err: TransportError) -> Self {
        match err.message() {
            Some(msg) => SubmitError::RequestFailed(msg.to_string()),
            None => SubmitError::Unknown,
        }
    }
}

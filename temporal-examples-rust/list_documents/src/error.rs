//! Failures of a single call to the DocRouter API.

use temporal_sdk::ActivityError;
use thiserror::Error;

/// Everything that can go wrong while listing one page of documents.
///
/// The `Display` output starts with the kind name so that the failure the
/// workflow (and ultimately the client) sees still says what happened.
#[derive(Debug, Error)]
pub enum DocRouterError {
    /// The request never produced a complete response.
    #[error("TransportError: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("HttpStatusError: DocRouter returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// A 2xx response whose body is not valid JSON.
    #[error("DecodeError: {0}")]
    Decode(#[source] serde_json::Error),
}

impl DocRouterError {
    pub fn kind(&self) -> &'static str {
        match self {
            DocRouterError::Transport(_) => "TransportError",
            DocRouterError::HttpStatus { .. } => "HttpStatusError",
            DocRouterError::Decode(_) => "DecodeError",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            DocRouterError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Map onto the SDK's activity failure.
    ///
    /// Every kind is reported as retryable; whether another attempt happens
    /// is up to the retry policy the workflow attaches to the activity.
    pub fn into_activity_error(self) -> ActivityError {
        ActivityError::from(self)
    }
}

//! Error type definitions.
//!
//! One enum per layer: the codec, the EZID API client, the search page
//! helpers and the DataCite check. Initialization failures get their own.

use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::anvl::ResponseEnvelope;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while encoding an ANVL document.
///
/// Decoding has no error type: malformed lines end up in the body.
#[derive(Error, Debug)]
pub enum AnvlError {
    /// A file named by an `@` directive could not be read.
    #[error("Cannot read ANVL substitution file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A flat argument list ended with a key that has no value.
    #[error("Expected key/value pairs but got {0} arguments")]
    OddArgumentCount(usize),
}

/// Errors from [`EzidClient`](crate::api::EzidClient) calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP client could not be built.
    #[error(transparent)]
    Init(#[from] InitializationError),

    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The base URL and path did not form a valid URL.
    #[error("Invalid service URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request body could not be encoded.
    #[error(transparent)]
    Anvl(#[from] AnvlError),

    /// The service answered with a status outside 200/201.
    #[error("Unexpected HTTP status {status}: {}: {}", .envelope.status, .envelope.status_message)]
    UnexpectedStatus {
        status: StatusCode,
        envelope: Box<ResponseEnvelope>,
    },

    /// The service answered `error: ...`.
    #[error("Service rejected the request: {message}")]
    Rejected { message: String },

    /// A mint call succeeded but the status line carried no identifier.
    #[error("Mint response did not contain an identifier")]
    MissingIdentifier,
}

/// Errors from fetching or reading the search page.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport-level failure.
    #[error("Search request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The search URL could not be built.
    #[error("Invalid search URL: {0}")]
    Url(#[from] url::ParseError),

    /// The search page answered with an error status.
    #[error("Search page returned HTTP status {0}")]
    UnexpectedStatus(StatusCode),
}

/// Errors from checking a DOI against DataCite.
#[derive(Error, Debug)]
pub enum DataciteError {
    /// Transport-level failure that did not clear up within the wait window.
    #[error("DataCite request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The DataCite URL could not be built.
    #[error("Invalid DataCite URL: {0}")]
    Url(#[from] url::ParseError),

    /// The DOI never showed up within the wait window.
    #[error("DOI {doi} not found at DataCite")]
    NotFound { doi: String },

    /// DataCite answered with a body that is not the expected JSON.
    #[error("Malformed DataCite response: {0}")]
    Json(#[from] serde_json::Error),

    /// DataCite returned a record for a different DOI.
    #[error("DataCite returned {found:?} for DOI {expected}")]
    IdMismatch { expected: String, found: String },
}

/// Categories of HTTP transport failures, used for log messages and for
/// deciding whether a poll should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum RequestErrorKind {
    Builder,
    Redirect,
    Status,
    Timeout,
    Request,
    Connect,
    Body,
    Decode,
    Other,
}

impl std::fmt::Display for RequestErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl RequestErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestErrorKind::Builder => "HTTP request builder error",
            RequestErrorKind::Redirect => "HTTP request redirect error",
            RequestErrorKind::Status => "HTTP request status error",
            RequestErrorKind::Timeout => "HTTP request timeout error",
            RequestErrorKind::Request => "HTTP request error",
            RequestErrorKind::Connect => "HTTP request connect error",
            RequestErrorKind::Body => "HTTP request body error",
            RequestErrorKind::Decode => "HTTP request decode error",
            RequestErrorKind::Other => "HTTP request other error",
        }
    }

    /// Whether a later attempt might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RequestErrorKind::Timeout | RequestErrorKind::Connect | RequestErrorKind::Request
        )
    }
}

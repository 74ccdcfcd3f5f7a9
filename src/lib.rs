//! b2service is a client for the [BackBlaze B2 API](https://www.backblaze.com/b2/cloud-storage.html)
//!
//! It is made of two layers:
//! * The [api] module, raw API bindings that are mostly 1:1 with the official API
//! * The [service] module, a [B2Service] that keeps an authorized session around and sequences the raw calls \
//!   (authorize, get an upload url, upload, finish) so you don't have to
//!
//! It is highly recommended to familiarize yourself with the [official B2 documentation](https://www.backblaze.com/b2/docs/) before using this crate
//!
//! All calls are `async` and made with [reqwest](https://crates.io/crates/reqwest) \
//! A [B2Service] issues its calls one after another, never concurrently, and takes `&mut self` for anything that touches the session
//!
//! Disclaimer: This library is not associated with Backblaze - Be aware of the [B2 pricing](https://www.backblaze.com/b2/cloud-storage-pricing.html)
//!
//! ## Example:
//! ```rust,no_run
//! # use b2service::{B2Config, B2Service};
//! # async fn run() -> Result<(), b2service::Error> {
//! let config = B2Config::from_env()?;
//! let mut service = B2Service::new(config)?;
//!
//! // Authorization happens on the first call
//! let info = service.insert("bucket_id", "hello world", "hello.txt").await?;
//! println!("uploaded {:?}", info.file_id);
//!
//! let file = service.get("bucket-name", "hello.txt", true, false).await?;
//! assert_eq!(&file.content[..], b"hello world");
//!
//! service.delete("bucket-name", "hello.txt", true).await?;
//! # Ok(())
//! # }
//! ```

/// Raw API bindings, mostly 1:1 with official API
pub mod api;
/// Credentials and client settings
pub mod config;
/// The service facade, keeping a session and combining raw calls into operations
pub mod service;
/// Various helpers to assist with common tasks
pub mod utils;

pub use crate::config::B2Config;
pub use crate::service::B2Service;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, thiserror::Error)]
/// The various kinds of errors this crate may return
pub enum Error {
    /// HTTP related errors
    #[error("request failed: {0}")]
    ReqwestError(#[from] reqwest::Error),
    /// IO related errors
    #[error("io error: {0}")]
    IOError(#[from] std::io::Error),
    /// (De)Serialization related errors
    #[error("unexpected response: {0}")]
    SerdeError(#[from] serde_json::Error),
    /// API related errors, returned by the B2 backend
    #[error("{0}")]
    B2Error(B2ApiError),
    /// A download succeeded but did not carry the `x-bz-file-id` header
    #[error("file metadata is missing the x-bz-file-id header")]
    MissingFileId,
    /// Input was rejected before anything was sent
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Credentials or settings could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Constructs a B2Error from a json string
    ///
    /// When we get an API error, we get an error message as a string \
    /// This will create a B2Error containing that string
    ///
    /// In case the error message is invalid/unexpected JSON, this returns a SerdeError instead
    pub(crate) fn from_json(error: &str) -> Error {
        match serde_json::from_str::<B2ApiError>(error) {
            Ok(v) => Error::B2Error(v),
            Err(e) => Error::SerdeError(e),
        }
    }

    /// Same as from_json but works directly on a failed [reqwest::Response]
    ///
    /// HEAD requests come back without a body, so the status line is all we get
    pub(crate) async fn from_response(resp: reqwest::Response) -> Error {
        let status = resp.status();
        match resp.text().await {
            Ok(s) if s.trim().is_empty() => Error::B2Error(B2ApiError {
                status: status.as_u16(),
                code: status.canonical_reason().unwrap_or("unknown").to_owned(),
                message: String::new(),
            }),
            Ok(s) => Error::from_json(&s),
            Err(e) => Error::ReqwestError(e),
        }
    }

    /// The B2 error code, if this is an API error
    pub fn b2_code(&self) -> Option<&str> {
        match self {
            Error::B2Error(e) => Some(&e.code),
            _ => None,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Eq, PartialEq, Ord, PartialOrd)]
/// An API error, returned by the B2 backend
///
/// You typically run into this in 2 cases:
/// 1. The backend ran into some issue, e.g. timed out, your authorization expired etc. \
/// 2. Wrong use of the API, e.g. malformed args, insufficient permissions
///
/// Official documentation: [Error Handling](https://www.backblaze.com/b2/docs/calling.html#error_handling)
pub struct B2ApiError {
    /// Contains the HTTP response code
    pub status: u16,
    /// A short string name for the error, eg. "invalid_bucket_name"
    pub code: String,
    /// A human-readable error message describing what went wrong
    pub message: String,
}

impl fmt::Debug for B2ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "B2ApiError: error code {} - {}. Message: {}",
            self.status, self.code, self.message
        )
    }
}

impl fmt::Display for B2ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "A B2 API Error occurred. Error code {} - {}. Error message: {}",
            self.status, self.code, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_from_json() {
        let err = Error::from_json(
            r#"{"status": 401, "code": "expired_auth_token", "message": "Token expired"}"#,
        );
        assert_eq!(err.b2_code(), Some("expired_auth_token"));
        match err {
            Error::B2Error(e) => assert_eq!(e.status, 401),
            other => panic!("expected B2Error, got {:?}", other),
        }
    }

    #[test]
    fn garbage_is_a_serde_error() {
        let err = Error::from_json("<html>bad gateway</html>");
        assert!(matches!(err, Error::SerdeError(_)));
        assert_eq!(err.b2_code(), None);
    }
}

//! Client error types.
//!
//! Provides error types for HTTP client operations.

use reqwest::{Method, StatusCode, Url};

use super::http::Audience;
use super::response::{Response, ResponseError};
use crate::encoding::EncodeError;

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The base URL for the requested audience was never configured.
    #[error("{0} base URL is not configured")]
    MissingBaseUrl(Audience),

    /// The request path could not be resolved against the base URL.
    #[error("invalid request path {path:?}: {source}")]
    InvalidPath {
        /// Path as given by the caller.
        path: String,
        /// Parse failure.
        source: url::ParseError,
    },

    /// Option values could not be encoded.
    #[error("failed to encode parameters: {0}")]
    Encode(#[from] EncodeError),

    /// Request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Request timeout.
    #[error("request timeout")]
    Timeout(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body of {method} {url} ({status}): {source}")]
    BodyRead {
        /// Method of the request.
        method: Method,
        /// URL of the request.
        url: Url,
        /// HTTP status received before the body failed.
        status: StatusCode,
        /// Read failure.
        source: reqwest::Error,
    },

    /// The response claimed JSON but its envelope did not parse.
    #[error("failed to parse response envelope: {source}")]
    Envelope {
        /// Response as received.
        response: Box<Response>,
        /// Parse failure.
        source: serde_json::Error,
    },

    /// The API reported a failure.
    #[error("{error}")]
    Api {
        /// Classified failure.
        error: Box<ResponseError>,
        /// Response as received.
        response: Box<Response>,
    },

    /// The envelope reported success but the payload did not decode.
    #[error("failed to decode response payload: {source}")]
    Decode {
        /// Response as received.
        response: Box<Response>,
        /// Decode failure.
        source: serde_json::Error,
    },

    /// The response body could not be written to the caller's sink.
    #[error("failed to write response body: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Returns the response associated with this error, when one was received.
    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Envelope { response, .. }
            | Self::Api { response, .. }
            | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the API failure, if this is one.
    #[must_use]
    pub fn api_error(&self) -> Option<&ResponseError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns true for configuration errors detected before any I/O.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_) | Self::MissingBaseUrl(_) | Self::InvalidPath { .. }
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Request(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_invalid_config() {
        let err = ClientError::InvalidConfig("api_key cannot be empty".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: api_key cannot be empty"
        );
        assert!(err.is_config());
    }

    #[test]
    fn test_client_error_missing_base_url() {
        let err = ClientError::MissingBaseUrl(Audience::Admin);
        assert_eq!(err.to_string(), "admin base URL is not configured");
        assert!(err.is_config());
        assert!(err.response().is_none());
    }

    #[test]
    fn test_client_error_encode() {
        let err = ClientError::from(EncodeError::NilValue);
        assert_eq!(
            err.to_string(),
            "failed to encode parameters: encode err: value must not be nil"
        );
        assert!(!err.is_config());
    }

    #[test]
    fn test_client_error_api() {
        let url = Url::parse("https://api.example.com/3.0/offer/1").expect("url");
        let error = ResponseError {
            method: Method::GET,
            url: url.clone(),
            status: StatusCode::OK,
            meta_status: 2,
            meta_message: "Not found".to_string(),
        };
        let response = Response {
            method: Method::GET,
            url,
            status: StatusCode::OK,
            headers: reqwest::header::HeaderMap::new(),
            meta: None,
            body: bytes::Bytes::new(),
        };
        let err = ClientError::Api {
            error: Box::new(error),
            response: Box::new(response),
        };
        assert_eq!(
            err.to_string(),
            "GET https://api.example.com/3.0/offer/1 200 OK (status 2) err: Not found"
        );
        assert_eq!(err.api_error().map(|e| e.meta_status), Some(2));
        assert!(err.response().is_some());
    }
}

//! Response envelope parsing and classification.
//!
//! Every JSON response from the API carries a `{status, message,
//! pagination}` envelope next to its payload fields. The envelope is
//! parsed from the buffered body independently of the payload.

use std::fmt;

use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::value::MapAccessDeserializer;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope status value that marks a successful call.
pub const STATUS_OK: i64 = 1;

/// Pagination block of a listing response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total number of items.
    pub total_count: u64,
    /// Next page, absent on the last page.
    pub next_page: Option<u64>,
}

/// Response envelope metadata.
///
/// Only a JSON object is an envelope. Arrays and scalars are rejected
/// even when every envelope field has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    /// API status; `1` means success.
    pub status: i64,
    /// Human readable message. Empty when the API sent a structured object.
    pub message: String,
    /// Pagination block, when present.
    pub pagination: Option<Pagination>,
}

impl Meta {
    /// Returns true if the envelope reports success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// `message` is a string on most endpoints and an object on a few.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageField {
    Text(String),
    Structured(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    message: Option<MessageField>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

impl<'de> Deserialize<'de> for Meta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetaVisitor;

        impl<'de> Visitor<'de> for MetaVisitor {
            type Value = Meta;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object envelope")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Meta, A::Error> {
                RawMeta::deserialize(MapAccessDeserializer::new(map)).map(Meta::from)
            }
        }

        deserializer.deserialize_map(MetaVisitor)
    }
}

impl From<RawMeta> for Meta {
    fn from(raw: RawMeta) -> Self {
        let message = match raw.message {
            Some(MessageField::Text(text)) => text,
            Some(MessageField::Structured(_)) | None => String::new(),
        };
        Self {
            status: raw.status,
            message,
            pagination: raw.pagination,
        }
    }
}

/// A completed API response with its body fully buffered.
#[derive(Debug, Clone)]
pub struct Response {
    /// Method of the originating request.
    pub method: Method,
    /// URL of the originating request.
    pub url: Url,
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Envelope, present only for JSON responses.
    pub meta: Option<Meta>,
    /// Raw body. Cloning is cheap and the bytes can be read any number of times.
    pub body: Bytes,
}

impl Response {
    /// Returns true if the `Content-Type` header announces JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        is_json_content(&self.headers)
    }

    /// Returns the envelope status, if an envelope was parsed.
    #[must_use]
    pub fn meta_status(&self) -> Option<i64> {
        self.meta.as_ref().map(|meta| meta.status)
    }

    /// Returns the envelope message, or an empty string.
    #[must_use]
    pub fn meta_message(&self) -> &str {
        self.meta.as_ref().map_or("", |meta| meta.message.as_str())
    }

    /// Returns the pagination block, if any.
    #[must_use]
    pub fn pagination(&self) -> Option<&Pagination> {
        self.meta.as_ref().and_then(|meta| meta.pagination.as_ref())
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Uniform error for API level failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{method} {url} {status} (status {meta_status}) err: {meta_message}")]
pub struct ResponseError {
    /// Method of the failed request.
    pub method: Method,
    /// URL of the failed request.
    pub url: Url,
    /// HTTP status.
    pub status: StatusCode,
    /// Envelope status, `0` when there was no envelope.
    pub meta_status: i64,
    /// Envelope message.
    pub meta_message: String,
}

/// Returns true if `headers` carry a JSON content type.
pub(crate) fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

/// Parses the envelope of a JSON body; non-JSON bodies have none.
pub(crate) fn parse_meta(headers: &HeaderMap, body: &[u8]) -> Result<Option<Meta>, serde_json::Error> {
    if !is_json_content(headers) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some)
}

/// Classifies a response.
///
/// A response fails when its HTTP status is in `400..=599`, when it has
/// no envelope, or when its envelope status is not `1`. A missing
/// envelope is reported with `meta_status` `0`.
///
/// # Errors
///
/// Returns a [`ResponseError`] describing the failure.
pub fn check_response(response: &Response) -> Result<(), ResponseError> {
    let meta_ok = response.meta.as_ref().is_some_and(Meta::is_ok);
    if !http_failed(response) && meta_ok {
        return Ok(());
    }
    Err(response_error(response))
}

/// Classifies a raw download.
///
/// Unlike [`check_response`], a 2xx body without an envelope is accepted.
/// An envelope that is present must still report success.
pub(crate) fn check_download(response: &Response) -> Result<(), ResponseError> {
    let meta_failed = response.meta.as_ref().is_some_and(|meta| !meta.is_ok());
    if !http_failed(response) && !meta_failed {
        return Ok(());
    }
    Err(response_error(response))
}

fn http_failed(response: &Response) -> bool {
    response.status.is_client_error() || response.status.is_server_error()
}

fn response_error(response: &Response) -> ResponseError {
    ResponseError {
        method: response.method.clone(),
        url: response.url.clone(),
        status: response.status,
        meta_status: response.meta_status().unwrap_or_default(),
        meta_message: response.meta_message().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers
    }

    fn response(status: StatusCode, body: &'static str) -> Response {
        let headers = json_headers();
        let meta = parse_meta(&headers, body.as_bytes()).expect("envelope");
        Response {
            method: Method::GET,
            url: Url::parse("https://api.example.com/3.0/offers").expect("url"),
            status,
            headers,
            meta,
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn test_meta_with_string_message() {
        let meta: Meta = serde_json::from_str(
            r#"{"status":1,"message":"ok","pagination":{"page":1,"per_page":50,"total_count":120,"next_page":2}}"#,
        )
        .expect("meta");
        assert_eq!(meta.status, 1);
        assert_eq!(meta.message, "ok");
        assert_eq!(
            meta.pagination,
            Some(Pagination {
                page: 1,
                per_page: 50,
                total_count: 120,
                next_page: Some(2),
            })
        );
    }

    #[test]
    fn test_meta_with_object_message() {
        let meta: Meta =
            serde_json::from_str(r#"{"status":2,"message":{"title":["required"]}}"#).expect("meta");
        assert_eq!(meta.status, 2);
        assert!(meta.message.is_empty());
        assert!(meta.pagination.is_none());
    }

    #[test]
    fn test_meta_missing_status() {
        let meta: Meta = serde_json::from_str(r#"{"offers":[]}"#).expect("meta");
        assert_eq!(meta.status, 0);
        assert!(!meta.is_ok());
    }

    #[test]
    fn test_parse_meta_skips_non_json() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
        let meta = parse_meta(&headers, b"id,name\n1,x").expect("skip");
        assert!(meta.is_none());
    }

    #[test]
    fn test_parse_meta_invalid_json() {
        assert!(parse_meta(&json_headers(), b"<html>").is_err());
    }

    #[test]
    fn test_parse_meta_rejects_empty_array() {
        let err = parse_meta(&json_headers(), b"[]").expect_err("array");
        assert!(err.is_data());
    }

    #[test]
    fn test_parse_meta_rejects_array_with_status() {
        let err = parse_meta(&json_headers(), b"[1]").expect_err("array");
        assert!(err.is_data());
        assert!(err.to_string().contains("a JSON object envelope"));
    }

    #[test]
    fn test_parse_meta_rejects_scalars() {
        assert!(parse_meta(&json_headers(), b"1").is_err());
        assert!(parse_meta(&json_headers(), b"null").is_err());
    }

    #[test]
    fn test_check_response_success() {
        let resp = response(StatusCode::OK, r#"{"status":1}"#);
        assert!(check_response(&resp).is_ok());
    }

    #[test]
    fn test_check_response_business_error() {
        let resp = response(StatusCode::OK, r#"{"status":0,"message":"x"}"#);
        let err = check_response(&resp).expect_err("business error");
        assert_eq!(err.meta_status, 0);
        assert_eq!(err.meta_message, "x");
        assert_eq!(
            err.to_string(),
            "GET https://api.example.com/3.0/offers 200 OK (status 0) err: x"
        );
    }

    #[test]
    fn test_check_response_http_error() {
        let resp = response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"status":1}"#);
        let err = check_response(&resp).expect_err("http error");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.meta_status, 1);
    }

    #[test]
    fn test_check_response_without_envelope() {
        let mut resp = response(StatusCode::OK, r#"{"status":1}"#);
        resp.meta = None;
        let err = check_response(&resp).expect_err("no envelope");
        assert_eq!(err.status, StatusCode::OK);
        assert_eq!(err.meta_status, 0);
        assert!(err.meta_message.is_empty());

        resp.status = StatusCode::NOT_FOUND;
        let err = check_response(&resp).expect_err("404");
        assert_eq!(err.meta_status, 0);
        assert!(err.meta_message.is_empty());
    }

    #[test]
    fn test_check_download_without_envelope() {
        let mut resp = response(StatusCode::OK, r#"{"status":1}"#);
        resp.meta = None;
        assert!(check_download(&resp).is_ok());

        resp.status = StatusCode::BAD_GATEWAY;
        let err = check_download(&resp).expect_err("502");
        assert_eq!(err.meta_status, 0);

        let failed = response(StatusCode::OK, r#"{"status":2,"message":"denied"}"#);
        let err = check_download(&failed).expect_err("status 2");
        assert_eq!(err.meta_status, 2);
        assert_eq!(err.meta_message, "denied");
    }

    #[test]
    fn test_response_accessors() {
        let resp = response(
            StatusCode::OK,
            r#"{"status":1,"message":"done","pagination":{"page":2,"per_page":10,"total_count":11}}"#,
        );
        assert!(resp.is_json());
        assert_eq!(resp.meta_status(), Some(1));
        assert_eq!(resp.meta_message(), "done");
        assert_eq!(resp.pagination().map(|p| p.page), Some(2));
        assert_eq!(resp.pagination().and_then(|p| p.next_page), None);
        let value: serde_json::Value = resp.json().expect("json");
        assert_eq!(value["status"], 1);
    }
}

//! HTTP client implementation.
//!
//! Provides the main HTTP client for interacting with the Affise REST API:
//! request construction against the public or admin base URL, execution,
//! envelope parsing and classification.

use std::fmt;

use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

use super::config::{parse_base_url, ClientConfig, API_KEY_HEADER};
use super::error::ClientError;
use super::response::{check_download, check_response, parse_meta, Response, ResponseError};
use crate::encoding::{EncodedParams, ParamEncoder, ToParams};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Which base URL an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Public (affiliate) API.
    Public,
    /// Admin API.
    Admin,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Parameters or body attached to a request.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    /// Nothing attached.
    #[default]
    Empty,
    /// Parameters appended to the URL query.
    Query(EncodedParams),
    /// Parameters sent as a form-encoded body.
    Form(EncodedParams),
    /// Raw JSON body.
    Json(Bytes),
}

impl Payload {
    /// Serializes `body` into a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Serialization`] if `body` cannot be serialized.
    pub fn json<T: ?Sized + Serialize>(body: &T) -> Result<Self, ClientError> {
        serde_json::to_vec(body)
            .map(|bytes| Self::Json(Bytes::from(bytes)))
            .map_err(ClientError::Serialization)
    }

    /// Places `params` where `method` expects them: the query for
    /// GET, HEAD and DELETE, a form body otherwise.
    #[must_use]
    pub fn for_method(method: &Method, params: EncodedParams) -> Self {
        if *method == Method::GET || *method == Method::HEAD || *method == Method::DELETE {
            Self::Query(params)
        } else {
            Self::Form(params)
        }
    }
}

/// HTTP client for the Affise REST API.
///
/// Cheap to clone and safe to share between tasks; nothing in it changes
/// after construction.
#[derive(Debug, Clone)]
pub struct AffiseClient {
    http: reqwest::Client,
    base_url: Option<Url>,
    admin_url: Option<Url>,
    api_key: HeaderValue,
    user_agent: HeaderValue,
    encoder: ParamEncoder,
}

impl AffiseClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(ClientError::Request)?;

        Self::with_http_client(config, http)
    }

    /// Creates a new client that sends requests through `http`.
    ///
    /// Timeouts, proxies and connection limits of `http` are used as is;
    /// the timeout fields of `config` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self, ClientError> {
        config.validate()?;

        let base_url = config
            .base_url
            .as_deref()
            .map(|url| parse_base_url("base_url", url))
            .transpose()?;
        let admin_url = config
            .admin_url
            .as_deref()
            .map(|url| parse_base_url("admin_url", url))
            .transpose()?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ClientError::InvalidConfig(format!("api_key: {e}")))?;
        api_key.set_sensitive(true);
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ClientError::InvalidConfig(format!("user_agent: {e}")))?;

        Ok(Self {
            http,
            base_url,
            admin_url,
            api_key,
            user_agent,
            encoder: ParamEncoder::new(),
        })
    }

    /// Returns the parameter encoder used by this client.
    #[must_use]
    pub fn encoder(&self) -> &ParamEncoder {
        &self.encoder
    }

    /// Returns the base URL configured for `audience`.
    #[must_use]
    pub fn base_url(&self, audience: Audience) -> Option<&Url> {
        match audience {
            Audience::Public => self.base_url.as_ref(),
            Audience::Admin => self.admin_url.as_ref(),
        }
    }

    /// Encodes `opts` with this client's encoder.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] if encoding fails.
    pub fn encode<O: ?Sized + ToParams>(&self, opts: &O) -> Result<EncodedParams, ClientError> {
        Ok(opts.to_params(&self.encoder)?)
    }

    fn resolve(&self, path: &str, audience: Audience) -> Result<Url, ClientError> {
        let base = self
            .base_url(audience)
            .ok_or(ClientError::MissingBaseUrl(audience))?;

        base.join(path).map_err(|source| ClientError::InvalidPath {
            path: path.to_string(),
            source,
        })
    }

    /// Builds a request for `path` on the `audience` base URL.
    ///
    /// The `API-Key` and `User-Agent` headers are always attached; a body
    /// payload also sets `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the audience has no base URL or the
    /// path does not resolve, and [`ClientError::Request`] if the request
    /// cannot be built.
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        audience: Audience,
        payload: Payload,
    ) -> Result<reqwest::Request, ClientError> {
        let mut url = self.resolve(path, audience)?;

        if let Payload::Query(ref params) = payload {
            if !params.is_empty() {
                let encoded = params.to_query_string()?;
                let query = match url.query() {
                    Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
                    _ => encoded,
                };
                url.set_query(Some(&query));
            }
        }

        let builder = self
            .http
            .request(method, url)
            .header(USER_AGENT, self.user_agent.clone())
            .header(API_KEY_HEADER, self.api_key.clone());

        let builder = match payload {
            Payload::Empty | Payload::Query(_) => builder,
            Payload::Form(params) => builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(params.to_query_string()?),
            Payload::Json(body) => builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body),
        };

        builder.build().map_err(ClientError::Request)
    }

    /// Builds a request carrying `opts` as parameters.
    ///
    /// Parameters go to the query for GET, HEAD and DELETE and to a form
    /// body for every other method.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] if `opts` cannot be encoded, plus any
    /// error of [`new_request`](Self::new_request).
    pub fn new_request_opts<O: ?Sized + ToParams>(
        &self,
        method: Method,
        path: &str,
        audience: Audience,
        opts: &O,
    ) -> Result<reqwest::Request, ClientError> {
        let params = self.encode(opts)?;
        let payload = Payload::for_method(&method, params);
        self.new_request(method, path, audience, payload)
    }

    /// Sends a request and returns the checked response.
    ///
    /// The body is read completely before the envelope is parsed, so the
    /// connection is released whatever the outcome. A response without a
    /// JSON envelope is an API error with `meta_status` `0`. Dropping the
    /// returned future cancels the call.
    ///
    /// # Errors
    ///
    /// Returns a transport, body-read, envelope or API error.
    pub async fn execute(&self, request: reqwest::Request) -> Result<Response, ClientError> {
        let response = self.receive(request).await?;
        classify(response, check_response)
    }

    /// Sends a request, buffers the body and parses the envelope without
    /// classifying the outcome.
    async fn receive(&self, request: reqwest::Request) -> Result<Response, ClientError> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let resp = self.http.execute(request).await?;
        let status = resp.status();
        let headers = resp.headers().clone();

        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(source) => {
                return Err(ClientError::BodyRead {
                    method,
                    url,
                    status,
                    source,
                })
            }
        };
        trace!(status = status.as_u16(), bytes = body.len(), "response body buffered");

        let mut response = Response {
            method,
            url,
            status,
            headers,
            meta: None,
            body,
        };

        match parse_meta(&response.headers, &response.body) {
            Ok(meta) => response.meta = meta,
            Err(source) => {
                return Err(ClientError::Envelope {
                    response: Box::new(response),
                    source,
                })
            }
        }

        debug!(
            status = response.status.as_u16(),
            meta_status = ?response.meta_status(),
            "response received"
        );
        Ok(response)
    }

    /// Sends a request and decodes the payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns any error of [`execute`](Self::execute), or
    /// [`ClientError::Decode`] if the payload does not match `T`.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<(T, Response), ClientError> {
        let response = self.execute(request).await?;
        match serde_json::from_slice(&response.body) {
            Ok(value) => Ok((value, response)),
            Err(source) => Err(ClientError::Decode {
                response: Box::new(response),
                source,
            }),
        }
    }

    /// Sends a request and copies the raw body into `sink`.
    ///
    /// Exports answer with CSV or other raw bodies, so a 2xx response
    /// without an envelope is accepted here. Nothing is written to `sink`
    /// when the call fails.
    ///
    /// # Errors
    ///
    /// Returns any error of [`execute`](Self::execute) except the missing
    /// envelope one, or [`ClientError::Io`] if writing to `sink` fails.
    pub async fn execute_to_writer<W>(
        &self,
        request: reqwest::Request,
        sink: &mut W,
    ) -> Result<Response, ClientError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let response = self.receive(request).await?;
        let response = classify(response, check_download)?;
        sink.write_all(&response.body).await?;
        sink.flush().await?;
        Ok(response)
    }

    /// Builds, sends and decodes a request in one step.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        audience: Audience,
        payload: Payload,
    ) -> Result<(T, Response), ClientError> {
        let request = self.new_request(method, path, audience, payload)?;
        self.execute_json(request).await
    }

    /// Same as [`fetch`](Self::fetch) with parameters from `opts`.
    pub(crate) async fn fetch_opts<T, O>(
        &self,
        method: Method,
        path: &str,
        audience: Audience,
        opts: &O,
    ) -> Result<(T, Response), ClientError>
    where
        T: DeserializeOwned,
        O: ?Sized + ToParams,
    {
        let request = self.new_request_opts(method, path, audience, opts)?;
        self.execute_json(request).await
    }

    /// Builds and sends a request whose payload is not needed.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        audience: Audience,
        payload: Payload,
    ) -> Result<Response, ClientError> {
        let request = self.new_request(method, path, audience, payload)?;
        self.execute(request).await
    }
}

/// Turns a classification failure into [`ClientError::Api`].
fn classify(
    response: Response,
    check: fn(&Response) -> Result<(), ResponseError>,
) -> Result<Response, ClientError> {
    match check(&response) {
        Ok(()) => Ok(response),
        Err(error) => Err(ClientError::Api {
            error: Box::new(error),
            response: Box::new(response),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct ListOpts {
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        order: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
    }

    impl ToParams for ListOpts {}

    fn client() -> AffiseClient {
        let config = ClientConfig::new("test-key")
            .with_base_url("https://api.example.com")
            .with_admin_url("https://admin.example.com/");
        AffiseClient::new(config).expect("client creation")
    }

    #[test]
    fn test_client_new() {
        assert!(AffiseClient::new(ClientConfig::new("k").with_base_url("https://a.example.com")).is_ok());
    }

    #[test]
    fn test_client_invalid_config() {
        assert!(AffiseClient::new(ClientConfig::new("k")).is_err());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<AffiseClient>();
    }

    #[test]
    fn test_new_request_headers() {
        let request = client()
            .new_request(Method::GET, "/3.0/offers", Audience::Public, Payload::Empty)
            .expect("request");

        assert_eq!(request.url().as_str(), "https://api.example.com/3.0/offers");
        let headers = request.headers();
        assert_eq!(headers.get(API_KEY_HEADER).map(HeaderValue::as_bytes), Some(&b"test-key"[..]));
        assert!(headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("affise-sdk/")));
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert!(request.body().is_none());
    }

    #[test]
    fn test_new_request_admin_audience() {
        let request = client()
            .new_request(Method::GET, "/3.0/admin/advertisers", Audience::Admin, Payload::Empty)
            .expect("request");
        assert_eq!(
            request.url().as_str(),
            "https://admin.example.com/3.0/admin/advertisers"
        );
    }

    #[test]
    fn test_new_request_missing_audience() {
        let config = ClientConfig::new("k").with_base_url("https://api.example.com");
        let client = AffiseClient::new(config).expect("client creation");
        let err = client
            .new_request(Method::GET, "/3.0/admin/users", Audience::Admin, Payload::Empty)
            .expect_err("no admin url");
        assert!(matches!(err, ClientError::MissingBaseUrl(Audience::Admin)));
    }

    #[test]
    fn test_new_request_opts_query() {
        let opts = ListOpts {
            limit: Some(1),
            order: Some("title".to_string()),
            page: None,
        };
        let request = client()
            .new_request_opts(Method::GET, "/3.0/admin/advertisers", Audience::Admin, &opts)
            .expect("request");
        assert_eq!(request.url().query(), Some("limit=1&order=title"));
        assert!(request.body().is_none());
    }

    #[test]
    fn test_new_request_query_appends_to_existing() {
        let params: EncodedParams = [("limit", "5")].into_iter().collect();
        let request = client()
            .new_request(
                Method::GET,
                "/3.0/stats/conversionsbyid?id=abc",
                Audience::Public,
                Payload::Query(params),
            )
            .expect("request");
        assert_eq!(request.url().query(), Some("id=abc&limit=5"));
    }

    #[test]
    fn test_new_request_opts_form() {
        let opts = ListOpts {
            limit: None,
            order: None,
            page: Some(2),
        };
        let request = client()
            .new_request_opts(Method::POST, "/3.0/admin/advertiser", Audience::Admin, &opts)
            .expect("request");
        assert_eq!(request.url().query(), None);
        assert_eq!(
            request.headers().get(CONTENT_TYPE).map(HeaderValue::as_bytes),
            Some(FORM_CONTENT_TYPE.as_bytes())
        );
        assert_eq!(
            request.body().and_then(reqwest::Body::as_bytes),
            Some(&b"page=2"[..])
        );
    }

    #[test]
    fn test_new_request_json_body() {
        let payload = Payload::json(&serde_json::json!({"name": "preset"})).expect("json");
        let request = client()
            .new_request(Method::POST, "/3.1/presets", Audience::Admin, payload)
            .expect("request");
        assert_eq!(
            request.headers().get(CONTENT_TYPE).map(HeaderValue::as_bytes),
            Some(JSON_CONTENT_TYPE.as_bytes())
        );
        assert_eq!(
            request.body().and_then(reqwest::Body::as_bytes),
            Some(&br#"{"name":"preset"}"#[..])
        );
    }

    #[test]
    fn test_payload_for_method() {
        let params = EncodedParams::new();
        assert!(matches!(Payload::for_method(&Method::GET, params.clone()), Payload::Query(_)));
        assert!(matches!(Payload::for_method(&Method::DELETE, params.clone()), Payload::Query(_)));
        assert!(matches!(Payload::for_method(&Method::POST, params), Payload::Form(_)));
    }

    #[test]
    fn test_audience_display() {
        assert_eq!(Audience::Public.to_string(), "public");
        assert_eq!(Audience::Admin.to_string(), "admin");
    }
}

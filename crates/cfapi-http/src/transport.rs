//! Transport seam and the blocking reqwest backend.

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;

use crate::config::AdapterConfig;
use crate::request::{Method, WireRequest};

/// What came back from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs one blocking request/response round trip.
///
/// Implementations must follow redirects and must not retry.
pub trait Transport {
    fn execute(&self, request: &WireRequest) -> Result<TransportResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &WireRequest) -> Result<TransportResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Wire-level failures.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("response body is not valid UTF-8: {0}")]
    NonUtf8Body(#[source] std::string::FromUtf8Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e)
        } else {
            TransportError::Request(e)
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Build the blocking client described by `config`.
pub fn build_client(config: &AdapterConfig) -> Result<Client, TransportError> {
    let mut builder = ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .redirect(Policy::limited(config.max_redirects));

    if config.no_proxy {
        builder = builder.no_proxy();
    }

    builder.build().map_err(TransportError::ClientBuild)
}

/// [`Transport`] backed by a blocking [`reqwest`] client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Create a transport with default settings.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(&AdapterConfig::default())
    }

    /// Create a transport using the timeouts, user agent and redirect limit
    /// from `config`.
    pub fn with_config(config: &AdapterConfig) -> Result<Self, TransportError> {
        Ok(Self {
            inner: build_client(config)?,
        })
    }
}

fn header_map(request: &WireRequest) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(request.headers.len());
    for (name, value) in request.headers.iter() {
        let invalid = || TransportError::InvalidHeader {
            name: name.to_string(),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(name, value);
    }
    Ok(map)
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &WireRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .inner
            .request(request.method.into(), &request.url)
            .headers(header_map(request)?);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let bytes = response.bytes().map_err(TransportError::Body)?;
        let body = String::from_utf8(bytes.to_vec()).map_err(TransportError::NonUtf8Body)?;

        Ok(TransportResponse { status, body })
    }
}

//! The REST adapter.

use cfapi_auth::{Auth, Headers};

use crate::config::{AdapterConfig, HeaderMergeMode};
use crate::error::{AdapterError, Result};
use crate::payload::Payload;
use crate::request::{Method, WireRequest};
use crate::response::{classify, skips_classification};
use crate::transport::{ReqwestTransport, Transport};

/// The verb-level operations resource clients are written against.
///
/// Each call performs one request through [`RestAdapter::request`] with the
/// verb fixed. GET sends the payload as the query string; the other verbs
/// send it as a JSON body.
pub trait Adapter {
    fn get(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String>;
    fn post(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String>;
    fn put(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String>;
    fn patch(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String>;
    fn delete(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String>;
}

/// Authenticated, synchronous REST adapter.
///
/// Every call performs exactly one blocking round trip through the
/// [`Transport`] and returns the raw response body on success.
///
/// Dispatch takes `&mut self` because extra headers may be folded into the
/// stored header set (see [`HeaderMergeMode`]). Sharing one adapter across
/// threads therefore needs external locking, e.g. a `Mutex<RestAdapter>`.
#[derive(Debug)]
pub struct RestAdapter<T = ReqwestTransport> {
    base_uri: String,
    headers: Headers,
    merge_mode: HeaderMergeMode,
    transport: T,
}

impl RestAdapter<ReqwestTransport> {
    /// Create an adapter for `auth`, using `base_uri` or the default API root.
    pub fn new<A: Auth + ?Sized>(auth: &A, base_uri: Option<&str>) -> Result<Self> {
        let mut config = AdapterConfig::default();
        if let Some(base_uri) = base_uri {
            config.base_uri = base_uri.to_string();
        }
        Self::with_config(auth, config)
    }

    /// Create an adapter with explicit configuration.
    pub fn with_config<A: Auth + ?Sized>(auth: &A, config: AdapterConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(&config)?;
        Ok(Self::with_transport(auth, config, transport))
    }
}

impl<T: Transport> RestAdapter<T> {
    /// Create an adapter that sends through `transport`.
    ///
    /// The transport is expected to honour the timeouts and redirect limit
    /// itself; only `base_uri` and `header_merge` are read here.
    pub fn with_transport<A: Auth + ?Sized>(
        auth: &A,
        config: AdapterConfig,
        transport: T,
    ) -> Self {
        let headers = auth.headers();
        tracing::debug!(
            base_uri = %config.base_uri,
            auth_headers = headers.len(),
            "created REST adapter"
        );
        Self {
            base_uri: config.base_uri,
            headers,
            merge_mode: config.header_merge,
            transport,
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// The stored header set sent with every request.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn merge_mode(&self) -> HeaderMergeMode {
        self.merge_mode
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Dispatch with the verb given as a string (`"get"`, `"POST"`, ...).
    ///
    /// Unknown verbs fail with [`AdapterError::InvalidArgument`] before any
    /// I/O.
    pub fn request_verb(
        &mut self,
        verb: &str,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String> {
        let method: Method = verb.parse()?;
        self.request(method, path, payload, headers)
    }

    /// Dispatch one request and classify the response.
    ///
    /// Returns the raw body on success. Bodies for paths containing
    /// `/dns_records/export` are returned without JSON inspection.
    pub fn request(
        &mut self,
        method: Method,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String> {
        if path.is_empty() {
            return Err(AdapterError::invalid_argument(
                "Request uri must be set, empty given",
            ));
        }

        let headers = self.resolve_headers(headers);
        let request = WireRequest::build(method, &self.base_uri, path, payload, headers)?;

        let header_names: Vec<&str> = request.headers.iter().map(|(name, _)| name).collect();
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            headers = ?header_names,
            has_body = request.body.is_some(),
            "Making request"
        );
        let response = self.transport.execute(&request).map_err(|e| {
            tracing::warn!(method = %request.method, url = %request.url, error = %e, "transport failed");
            AdapterError::from(e)
        })?;
        tracing::debug!("{} response: {} {}", request.method, response.status, request.url);

        if !skips_classification(path) {
            classify(&response.body)?;
        }

        Ok(response.body)
    }

    fn resolve_headers(&mut self, extra: Option<&Headers>) -> Headers {
        let extra = match extra {
            Some(extra) if !extra.is_empty() => extra,
            _ => return self.headers.clone(),
        };
        match self.merge_mode {
            HeaderMergeMode::Persistent => {
                self.headers.merge(extra);
                self.headers.clone()
            }
            HeaderMergeMode::PerRequest => self.headers.merged(extra),
        }
    }
}

impl<T: Transport> Adapter for RestAdapter<T> {
    fn get(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String> {
        self.request(Method::Get, path, payload, headers)
    }

    fn post(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String> {
        self.request(Method::Post, path, payload, headers)
    }

    fn put(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String> {
        self.request(Method::Put, path, payload, headers)
    }

    fn patch(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String> {
        self.request(Method::Patch, path, payload, headers)
    }

    fn delete(
        &mut self,
        path: &str,
        payload: Option<&Payload>,
        headers: Option<&Headers>,
    ) -> Result<String> {
        self.request(Method::Delete, path, payload, headers)
    }
}

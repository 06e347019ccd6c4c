//! Synchronous REST adapter for the Cloudflare v4 API.
//!
//! [`RestAdapter`] turns "verb + path + payload" calls into authenticated
//! wire requests and normalizes every response into either the raw body or
//! an [`AdapterError`].
//!
//! ```no_run
//! use cfapi_http::{Adapter, ApiToken, Payload, RestAdapter};
//!
//! let mut adapter = RestAdapter::new(&ApiToken::new("token"), None)?;
//! let zones = adapter.get("zones", Some(&Payload::from([("name", "example.com")])), None)?;
//! println!("{zones}");
//! # Ok::<(), cfapi_http::AdapterError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod request;
pub mod response;
pub mod transport;

pub use cfapi_auth::{ApiKey, ApiToken, Auth, Headers, NoAuth, UserServiceKey};
pub use client::{Adapter, RestAdapter};
pub use config::{AdapterConfig, HeaderMergeMode, DEFAULT_BASE_URI};
pub use error::{AdapterError, ConfigError, Result};
pub use payload::{Payload, PayloadValue};
pub use request::{headers, Method, WireRequest};
pub use response::{classify, ApiMessage, ResponseEnvelope};
pub use transport::{build_client, ReqwestTransport, Transport, TransportError, TransportResponse};

//! Adapter error types.

use crate::transport::TransportError;

/// Everything a dispatch can fail with.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Bad caller input, rejected before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request could not be carried out on the wire.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// The body could not be parsed as JSON.
    #[error("malformed response: {source}")]
    MalformedResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with a well-formed failure report.
    #[error("remote API error{}: {message}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    RemoteApi { message: String, code: Option<i64> },
}

impl AdapterError {
    /// Create an [`AdapterError::InvalidArgument`].
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// The remote error code, for [`AdapterError::RemoteApi`] errors that carry one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::RemoteApi { code, .. } => *code,
            _ => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteApi { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Result alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_display_with_code() {
        let err = AdapterError::RemoteApi {
            message: "bad zone".into(),
            code: Some(1003),
        };
        assert_eq!(err.to_string(), "remote API error 1003: bad zone");
        assert_eq!(err.code(), Some(1003));
        assert!(err.is_remote());
    }

    #[test]
    fn test_remote_display_without_code() {
        let err = AdapterError::RemoteApi {
            message: "Request was unsuccessful.".into(),
            code: None,
        };
        assert_eq!(err.to_string(), "remote API error: Request was unsuccessful.");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_transport_conversion() {
        let err: AdapterError = TransportError::Timeout.into();
        assert!(err.is_transport());
        assert!(err.to_string().contains("timed out"));
    }
}

//! Response classification.
//!
//! Every response body is expected to be a JSON envelope of the form
//! `{"success": bool, "errors": [{"code": n, "message": "..."}], ...}`.
//! Missing or oddly typed envelope fields are tolerated; only an unparseable
//! body or an explicit failure report turns into an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::AdapterError;

/// Paths containing this segment return an opaque zone file export.
pub const RAW_EXPORT_SEGMENT: &str = "/dns_records/export";

/// Message used when the API reports `success: false` without any errors.
pub const UNSUCCESSFUL_MESSAGE: &str = "Request was unsuccessful.";

/// Whether the body for `path` is returned without JSON inspection.
pub fn skips_classification(path: &str) -> bool {
    path.contains(RAW_EXPORT_SEGMENT)
}

/// One entry of the envelope's `errors` list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default, deserialize_with = "lenient_code")]
    pub code: Option<i64>,
    #[serde(default, deserialize_with = "lenient_message")]
    pub message: String,
}

/// The parts of the response envelope the adapter looks at.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, deserialize_with = "lenient_success")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient_errors")]
    pub errors: Vec<ApiMessage>,
}

impl ResponseEnvelope {
    /// Read the envelope out of an already parsed document.
    ///
    /// Documents that are not JSON objects carry no envelope.
    pub fn from_value(value: &Value) -> Self {
        if value.is_object() {
            Self::deserialize(value).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// The failure this envelope reports, if any.
    pub fn failure(&self) -> Option<AdapterError> {
        if let Some(first) = self.errors.first() {
            return Some(AdapterError::RemoteApi {
                message: first.message.clone(),
                code: first.code,
            });
        }
        if self.success == Some(false) {
            return Some(AdapterError::RemoteApi {
                message: UNSUCCESSFUL_MESSAGE.to_string(),
                code: None,
            });
        }
        None
    }
}

/// Decide whether `body` is a successful response.
pub fn classify(body: &str) -> Result<(), AdapterError> {
    let value: Value = serde_json::from_str(body).map_err(|source| {
        tracing::warn!(error = %source, len = body.len(), "response body is not valid JSON");
        AdapterError::MalformedResponse {
            body: body.to_string(),
            source,
        }
    })?;

    match ResponseEnvelope::from_value(&value).failure() {
        Some(err) => {
            tracing::warn!(error = %err, "remote API reported failure");
            Err(err)
        }
        None => Ok(()),
    }
}

fn lenient_code<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_message<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

fn lenient_success<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Bool(b)) => Some(b),
        _ => None,
    })
}

fn lenient_errors<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ApiMessage>, D::Error> {
    let items = match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => ApiMessage::deserialize(&item).unwrap_or_default(),
            Value::String(message) => ApiMessage { code: None, message },
            other => ApiMessage {
                code: None,
                message: other.to_string(),
            },
        })
        .collect())
}

//! Request construction: verbs, URL resolution and wire encoding.

use std::fmt;
use std::str::FromStr;

use cfapi_auth::Headers;

use crate::error::AdapterError;
use crate::payload::Payload;

use self::headers::{CONTENT_TYPE, CONTENT_TYPE_JSON};

/// Common HTTP header names and values.
pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// The HTTP verbs the adapter dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Every supported verb.
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether a non-empty payload travels as a JSON body.
    ///
    /// `GET` puts the payload in the query string instead.
    pub fn sends_body(self) -> bool {
        !matches!(self, Method::Get)
    }

    /// Whether the wire method has to be set explicitly rather than
    /// implied by the presence of a body.
    pub fn overrides_method(self) -> bool {
        matches!(self, Method::Put | Method::Patch | Method::Delete)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AdapterError::invalid_argument(
                    "Request method must be get, post, put, patch, or delete",
                )
            })
    }
}

/// A fully resolved request, ready for a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    /// Wire method.
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    /// Every header to send.
    pub headers: Headers,
    /// JSON body, present only for body-carrying verbs with a payload.
    pub body: Option<String>,
}

impl WireRequest {
    /// Build the wire form of `method` on `base_uri` + `path`.
    ///
    /// The URL is a plain concatenation, so `base_uri` is expected to end
    /// with `/` and `path` to be relative.
    pub fn build(
        method: Method,
        base_uri: &str,
        path: &str,
        payload: Option<&Payload>,
        mut headers: Headers,
    ) -> Result<Self, AdapterError> {
        if path.is_empty() {
            return Err(AdapterError::invalid_argument(
                "Request uri must be set, empty given",
            ));
        }

        let mut url = format!("{base_uri}{path}");
        let payload = payload.filter(|p| !p.is_empty());

        let body = match payload {
            Some(payload) if method.sends_body() => {
                let json = payload.to_json().map_err(|e| {
                    AdapterError::invalid_argument(format!("payload is not JSON encodable: {e}"))
                })?;
                if headers.get_ignore_case(CONTENT_TYPE).is_none() {
                    headers.insert(CONTENT_TYPE, CONTENT_TYPE_JSON);
                }
                Some(json)
            }
            Some(payload) => {
                let query = payload.to_query();
                if !query.is_empty() {
                    url.push(if url.contains('?') { '&' } else { '?' });
                    url.push_str(&query);
                }
                None
            }
            None => None,
        };

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }

    /// Headers rendered as `Name: Value` lines.
    pub fn header_lines(&self) -> Vec<String> {
        self.headers.lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.example.com/client/v4/";

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("PATCH".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!("Delete".parse::<Method>().unwrap(), Method::Delete);
    }

    #[test]
    fn test_method_parse_rejects_unknown() {
        for verb in ["head", "OPTIONS", "", "gett", "connect"] {
            let err = verb.parse::<Method>().unwrap_err();
            assert!(matches!(err, AdapterError::InvalidArgument(_)), "{verb}");
        }
    }

    #[test]
    fn test_method_policies() {
        assert!(!Method::Get.sends_body());
        assert!(Method::Post.sends_body());
        assert!(!Method::Post.overrides_method());
        for m in [Method::Put, Method::Patch, Method::Delete] {
            assert!(m.sends_body());
            assert!(m.overrides_method());
        }
    }

    #[test]
    fn test_url_is_concatenated() {
        let req = WireRequest::build(Method::Get, BASE, "zones", None, Headers::new()).unwrap();
        assert_eq!(req.url, "https://api.example.com/client/v4/zones");
        assert!(req.body.is_none());
    }

    #[test]
    fn test_get_payload_goes_to_query() {
        let payload = Payload::from([("a", "1"), ("b", "2")]);
        let req =
            WireRequest::build(Method::Get, BASE, "zones", Some(&payload), Headers::new()).unwrap();
        assert!(req.url.ends_with("zones?a=1&b=2"));
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_get_appends_to_existing_query() {
        let payload = Payload::from([("page", "2")]);
        let req = WireRequest::build(
            Method::Get,
            BASE,
            "zones?per_page=5",
            Some(&payload),
            Headers::new(),
        )
        .unwrap();
        assert!(req.url.ends_with("zones?per_page=5&page=2"));
    }

    #[test]
    fn test_body_verbs_encode_json() {
        let payload = Payload::from([("name", "example.com")]);
        for method in [Method::Post, Method::Put, Method::Patch, Method::Delete] {
            let req =
                WireRequest::build(method, BASE, "zones", Some(&payload), Headers::new()).unwrap();
            assert_eq!(req.method, method);
            assert_eq!(req.body.as_deref(), Some(r#"{"name":"example.com"}"#));
            assert_eq!(req.url, format!("{BASE}zones"));
            assert_eq!(req.headers.get("Content-Type"), Some("application/json"));
        }
    }

    #[test]
    fn test_empty_payload_sends_no_body() {
        let empty = Payload::new();
        let req =
            WireRequest::build(Method::Post, BASE, "zones", Some(&empty), Headers::new()).unwrap();
        assert!(req.body.is_none());
        assert!(req.headers.get("Content-Type").is_none());
    }

    #[test]
    fn test_caller_content_type_is_kept() {
        let payload = Payload::from([("a", "1")]);
        let headers = Headers::from([("content-type", "application/merge-patch+json")]);
        let req = WireRequest::build(Method::Patch, BASE, "x", Some(&payload), headers).unwrap();
        assert_eq!(req.headers.len(), 1);
        assert_eq!(
            req.headers.get("content-type"),
            Some("application/merge-patch+json")
        );
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = WireRequest::build(Method::Get, BASE, "", None, Headers::new()).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidArgument(_)));
    }

    #[test]
    fn test_header_lines() {
        let headers = Headers::from([("X-Auth-Email", "a@b.c")]);
        let req = WireRequest::build(Method::Get, BASE, "user", None, headers).unwrap();
        assert_eq!(req.header_lines(), vec!["X-Auth-Email: a@b.c"]);
    }
}

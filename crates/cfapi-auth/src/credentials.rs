//! Stock credential kinds accepted by the remote API.

use std::env;

use serde::Deserialize;

use crate::{Auth, AuthError, Headers, SecretString};

/// Environment variable names read by the `from_env` constructors.
pub mod vars {
    pub const EMAIL: &str = "CLOUDFLARE_EMAIL";
    pub const API_KEY: &str = "CLOUDFLARE_API_KEY";
    pub const API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
    pub const USER_SERVICE_KEY: &str = "CLOUDFLARE_USER_SERVICE_KEY";
}

fn require(var: &str) -> Result<SecretString, AuthError> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(SecretString::new(value)),
        _ => Err(AuthError::NotSet { var: var.to_string() }),
    }
}

/// Global API key paired with the account email.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    email: String,
    key: SecretString,
}

impl ApiKey {
    /// Create from an account email and global API key.
    pub fn new(email: impl Into<String>, key: impl Into<SecretString>) -> Self {
        Self {
            email: email.into(),
            key: key.into(),
        }
    }

    /// Read `CLOUDFLARE_EMAIL` and `CLOUDFLARE_API_KEY`.
    pub fn from_env() -> Result<Self, AuthError> {
        let email = require(vars::EMAIL)?.into_inner();
        Ok(Self::new(email, require(vars::API_KEY)?))
    }

    /// The account email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Auth for ApiKey {
    fn headers(&self) -> Headers {
        Headers::new()
            .with("X-Auth-Email", self.email.as_str())
            .with("X-Auth-Key", self.key.expose().as_str())
    }
}

/// Scoped API token sent as a bearer credential.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiToken {
    token: SecretString,
}

impl ApiToken {
    /// Create from a token string.
    pub fn new(token: impl Into<SecretString>) -> Self {
        Self { token: token.into() }
    }

    /// Read `CLOUDFLARE_API_TOKEN`.
    pub fn from_env() -> Result<Self, AuthError> {
        Ok(Self::new(require(vars::API_TOKEN)?))
    }
}

impl Auth for ApiToken {
    fn headers(&self) -> Headers {
        Headers::new().with("Authorization", format!("Bearer {}", self.token.expose()))
    }
}

/// Origin CA user service key.
#[derive(Debug, Clone, Deserialize)]
pub struct UserServiceKey {
    key: SecretString,
}

impl UserServiceKey {
    /// Create from a service key string.
    pub fn new(key: impl Into<SecretString>) -> Self {
        Self { key: key.into() }
    }

    /// Read `CLOUDFLARE_USER_SERVICE_KEY`.
    pub fn from_env() -> Result<Self, AuthError> {
        Ok(Self::new(require(vars::USER_SERVICE_KEY)?))
    }
}

impl Auth for UserServiceKey {
    fn headers(&self) -> Headers {
        Headers::new().with("X-Auth-User-Service-Key", self.key.expose().as_str())
    }
}

/// No credentials at all. Useful for public endpoints and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl Auth for NoAuth {
    fn headers(&self) -> Headers {
        Headers::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_headers() {
        let auth = ApiKey::new("user@example.com", "global-key");
        let headers = auth.headers();

        assert_eq!(headers.get("X-Auth-Email"), Some("user@example.com"));
        assert_eq!(headers.get("X-Auth-Key"), Some("global-key"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_api_key_debug_hides_key() {
        let auth = ApiKey::new("user@example.com", "global-key");
        let debug = format!("{:?}", auth);
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("global-key"));
    }

    #[test]
    fn test_api_token_is_bearer() {
        let headers = ApiToken::new("abc123").headers();
        assert_eq!(headers.get("Authorization"), Some("Bearer abc123"));
    }

    #[test]
    fn test_user_service_key_header() {
        let headers = UserServiceKey::new("v1.0-service").headers();
        assert_eq!(headers.get("X-Auth-User-Service-Key"), Some("v1.0-service"));
    }

    #[test]
    fn test_no_auth_is_empty() {
        assert!(NoAuth.headers().is_empty());
    }

    #[test]
    fn test_deserialize_api_key() {
        let auth: ApiKey =
            serde_json::from_str(r#"{"email":"a@b.c","key":"k"}"#).unwrap();
        assert_eq!(auth.email(), "a@b.c");
        assert_eq!(auth.headers().get("X-Auth-Key"), Some("k"));
    }
}

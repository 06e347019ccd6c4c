//! Redacting wrapper for credential material.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

const REDACTED: &str = "[REDACTED]";

/// A credential that never shows up in logs or serialized output.
///
/// The wrapped value is wiped from memory when the secret is dropped.
///
/// ```rust
/// use cfapi_auth::SecretString;
///
/// let key = SecretString::from("c2547eb745079dac9320b638f5e225cf483cc5cfdda41");
/// assert_eq!(key.to_string(), "[REDACTED]");
/// assert_eq!(format!("{key:?}"), "Secret([REDACTED])");
/// assert!(key.expose().starts_with("c2547"));
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret<T: Zeroize>(T);

impl<T: Zeroize> Secret<T> {
    /// Wrap a value.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the underlying value.
    ///
    /// Only header construction should need this.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T: Zeroize + Default> Secret<T> {
    /// Take the value out, leaving a zeroized default behind.
    pub fn into_inner(mut self) -> T {
        std::mem::take(&mut self.0)
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({REDACTED})")
    }
}

impl<T: Zeroize + PartialEq> PartialEq for Secret<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl From<String> for Secret<String> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Secret<String> {
    fn from(value: &str) -> Self {
        Self::new(value.to_owned())
    }
}

impl<'de, T: Zeroize + Deserialize<'de>> Deserialize<'de> for Secret<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Secret::new)
    }
}

// Serializing always emits the placeholder, so config dumps stay clean.
impl<T: Zeroize> Serialize for Secret<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        REDACTED.serialize(serializer)
    }
}

/// A secret string, the shape every stock credential uses.
pub type SecretString = Secret<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_redacted() {
        let secret = SecretString::from("token-value");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretString::from("token-value");
        assert_eq!(format!("{:?}", secret), "Secret([REDACTED])");
    }

    #[test]
    fn test_serialize_is_redacted() {
        let secret = SecretString::from("token-value");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"[REDACTED]\"");
    }

    #[test]
    fn test_deserialize_keeps_value() {
        let secret: SecretString = serde_json::from_str("\"token-value\"").unwrap();
        assert_eq!(secret.expose(), "token-value");
    }

    #[test]
    fn test_into_inner() {
        let secret = SecretString::from("token-value");
        assert_eq!(secret.into_inner(), "token-value");
    }

    #[test]
    fn test_equality_compares_values() {
        assert_eq!(SecretString::from("a"), SecretString::from("a"));
        assert_ne!(SecretString::from("a"), SecretString::from("b"));
    }
}

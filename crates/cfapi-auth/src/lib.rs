//! Authentication header providers for the cfapi REST adapter.
//!
//! An [`Auth`] implementation produces the headers that identify the caller.
//! The adapter captures them once at construction time.

mod credentials;
mod headers;
mod secret;

pub use credentials::{vars, ApiKey, ApiToken, NoAuth, UserServiceKey};
pub use headers::Headers;
pub use secret::{Secret, SecretString};

/// Produces the authentication headers for outgoing requests.
pub trait Auth {
    /// Header name to header value mapping identifying the caller.
    fn headers(&self) -> Headers;
}

impl<A: Auth + ?Sized> Auth for &A {
    fn headers(&self) -> Headers {
        (**self).headers()
    }
}

impl<A: Auth + ?Sized> Auth for Box<A> {
    fn headers(&self) -> Headers {
        (**self).headers()
    }
}

/// Credential loading errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("required environment variable not set: {var}")]
    NotSet { var: String },
}

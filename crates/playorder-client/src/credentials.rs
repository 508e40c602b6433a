//! Request credentials.
//!
//! The edit endpoint authenticates with a signed-in session. The engine
//! never sees credentials; the client asks a [`CredentialSource`] for them
//! right before each request.

use crate::constants::{AUTHORIZATION_ENV, COOKIE_ENV};
use crate::error::ClientError;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Value of the `Authorization` header.
    pub authorization: String,
    /// Value of the `Cookie` header, if the session needs one.
    pub cookie: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("authorization", &"<redacted>")
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Result<Credentials, ClientError>;
}

/// Fixed credentials, mostly for tests.
#[derive(Clone, Debug)]
pub struct StaticCredentials(pub Credentials);

impl StaticCredentials {
    pub fn new(authorization: impl Into<String>) -> Self {
        Self(Credentials { authorization: authorization.into(), cookie: None })
    }
}

impl CredentialSource for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, ClientError> {
        Ok(self.0.clone())
    }
}

/// Reads credentials from the environment on every call.
#[derive(Clone, Debug)]
pub struct EnvCredentials {
    authorization_var: String,
    cookie_var: String,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self {
            authorization_var: AUTHORIZATION_ENV.into(),
            cookie_var: COOKIE_ENV.into(),
        }
    }
}

impl EnvCredentials {
    pub fn new(authorization_var: impl Into<String>, cookie_var: impl Into<String>) -> Self {
        Self {
            authorization_var: authorization_var.into(),
            cookie_var: cookie_var.into(),
        }
    }
}

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Result<Credentials, ClientError> {
        let authorization = std::env::var(&self.authorization_var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ClientError::MissingCredentials(format!("{} is not set", self.authorization_var)))?;
        let cookie = std::env::var(&self.cookie_var).ok().filter(|v| !v.trim().is_empty());
        Ok(Credentials { authorization, cookie })
    }
}

//! Remote endpoint configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    DEFAULT_AUTH_USER, DEFAULT_BASE_URL, DEFAULT_CLIENT_NAME, DEFAULT_CLIENT_VERSION,
    DEFAULT_ORIGIN,
};
use crate::error::ClientError;

/// Where and how edit requests are sent.
///
/// `context` is the client context object echoed back in every request
/// body. It can be given inline or loaded from a JSON file; inline wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub context: Option<Value>,
    pub context_file: Option<PathBuf>,
    pub auth_user: String,
    pub client_name: String,
    pub client_version: String,
    pub origin: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            context: None,
            context_file: None,
            auth_user: DEFAULT_AUTH_USER.into(),
            client_name: DEFAULT_CLIENT_NAME.into(),
            client_version: DEFAULT_CLIENT_VERSION.into(),
            origin: DEFAULT_ORIGIN.into(),
        }
    }
}

impl RemoteConfig {
    /// The request context, reading `context_file` if no inline value is set.
    pub fn resolve_context(&self) -> Result<Option<Value>, ClientError> {
        if let Some(ctx) = &self.context {
            return Ok(Some(ctx.clone()));
        }
        let Some(path) = &self.context_file else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ClientError::ContextFile {
            path: path.clone(),
            source,
        })?;
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

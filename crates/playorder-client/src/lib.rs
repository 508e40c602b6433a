//! HTTP client for the playlist edit endpoint.
//!
//! [`EditPlaylistClient`] implements [`RemoteMutation`](playorder_core::RemoteMutation)
//! by posting an instruction batch to the web player's edit endpoint with
//! the same headers the web client sends.
//!
//! ```no_run
//! use playorder_client::{EditPlaylistClient, EnvCredentials, RemoteConfig};
//!
//! let config = RemoteConfig { api_key: Some("...".into()), ..Default::default() };
//! let client = EditPlaylistClient::new(config, EnvCredentials::default())?;
//! # Ok::<(), playorder_client::ClientError>(())
//! ```

mod config;
pub mod constants;
mod credentials;
mod edit;
mod error;

pub use config::RemoteConfig;
pub use credentials::{CredentialSource, Credentials, EnvCredentials, StaticCredentials};
pub use edit::{EditPlaylistClient, EditRequest};
pub use error::ClientError;

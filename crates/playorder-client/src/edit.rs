//! Batch edit requests.
//!
//! One POST carries every move of a run. The endpoint answers 2xx even for
//! some rejected edits, reporting them as an `error` member in the body, so
//! both the status and the body are checked.

use async_trait::async_trait;
use playorder_core::{RemoteMutation, SubmitOutcome};
use playorder_types::{Instruction, MoveAction, PlaylistId};
use reqwest::header::{AUTHORIZATION, COOKIE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::RemoteConfig;
use crate::constants::{
    EDIT_PLAYLIST_PATH, HEADER_AUTH_USER, HEADER_CLIENT_NAME, HEADER_CLIENT_VERSION,
    HEADER_LOGGED_IN, HEADER_ORIGIN, HEADER_VISITOR_ID,
};
use crate::credentials::CredentialSource;
use crate::error::ClientError;

/// Request body of the edit endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest<'a> {
    pub context: &'a Value,
    pub playlist_id: &'a str,
    pub actions: Vec<MoveAction>,
}

impl<'a> EditRequest<'a> {
    pub fn new(context: &'a Value, playlist: &'a PlaylistId, instructions: &[Instruction]) -> Self {
        Self {
            context,
            playlist_id: playlist.as_str(),
            actions: instructions.iter().map(Instruction::to_action).collect(),
        }
    }
}

/// [`RemoteMutation`] over the web player's playlist edit endpoint.
pub struct EditPlaylistClient<C> {
    http: reqwest::Client,
    config: RemoteConfig,
    context: Option<Value>,
    credentials: C,
}

impl<C: CredentialSource> EditPlaylistClient<C> {
    /// Build a client. The context is resolved once, here.
    pub fn new(config: RemoteConfig, credentials: C) -> Result<Self, ClientError> {
        let context = config.resolve_context()?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config, context, credentials })
    }

    fn api_key(&self) -> Result<&str, ClientError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ClientError::MissingApiKey)
    }

    fn context(&self) -> Result<&Value, ClientError> {
        self.context.as_ref().ok_or(ClientError::MissingContext)
    }

    /// Full endpoint URL including the key and `prettyPrint=false`.
    pub fn endpoint(&self) -> Result<Url, ClientError> {
        let base = format!("{}/", self.config.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&base)?.join(EDIT_PLAYLIST_PATH)?;
        url.query_pairs_mut()
            .append_pair("key", self.api_key()?)
            .append_pair("prettyPrint", "false");
        Ok(url)
    }

    async fn send(&self, playlist: &PlaylistId, instructions: &[Instruction]) -> Result<SubmitOutcome, ClientError> {
        let context = self.context()?;
        let url = self.endpoint()?;
        let creds = self.credentials.credentials()?;
        let visitor = context
            .pointer("/client/visitorData")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let body = EditRequest::new(context, playlist, instructions);
        let mut request = self
            .http
            .post(url)
            .header(AUTHORIZATION, creds.authorization)
            .header(HEADER_AUTH_USER, &self.config.auth_user)
            .header(HEADER_VISITOR_ID, visitor)
            .header(HEADER_ORIGIN, &self.config.origin)
            .header(HEADER_LOGGED_IN, "true")
            .header(HEADER_CLIENT_NAME, &self.config.client_name)
            .header(HEADER_CLIENT_VERSION, &self.config.client_version)
            .json(&body);
        if let Some(cookie) = creds.cookie {
            request = request.header(COOKIE, cookie);
        }

        debug!(playlist = %playlist, actions = body.actions.len(), "sending edit request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(%status, body = %text, "edit request rejected");
            return Ok(SubmitOutcome::failure(format!("status {status}: {text}")));
        }

        Ok(interpret_body(&text))
    }
}

/// A 2xx body is a success unless it fails to parse or carries `error`.
fn interpret_body(text: &str) -> SubmitOutcome {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => match value.get("error") {
            Some(err) if !err.is_null() => {
                warn!(error = %err, "edit response reported an error");
                SubmitOutcome::failure(err.to_string())
            }
            _ => SubmitOutcome::success(),
        },
        Err(e) => SubmitOutcome::failure(format!("unreadable response body: {e}")),
    }
}

#[async_trait]
impl<C: CredentialSource> RemoteMutation for EditPlaylistClient<C> {
    fn ensure_ready(&self) -> Result<(), String> {
        self.api_key().map_err(|e| e.to_string())?;
        self.context().map_err(|e| e.to_string())?;
        self.credentials.credentials().map(|_| ()).map_err(|e| e.to_string())
    }

    async fn submit(&self, playlist: &PlaylistId, instructions: &[Instruction]) -> SubmitOutcome {
        match self.send(playlist, instructions).await {
            Ok(outcome) => outcome,
            Err(e) => SubmitOutcome::failure(e.to_string()),
        }
    }
}

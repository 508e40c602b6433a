use std::path::PathBuf;

/// Failures building or sending an edit request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("api key not configured")]
    MissingApiKey,

    #[error("client context not configured")]
    MissingContext,

    #[error("credentials unavailable: {0}")]
    MissingCredentials(String),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("failed to read context file {path}: {source}")]
    ContextFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("context is not valid json: {0}")]
    ContextParse(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

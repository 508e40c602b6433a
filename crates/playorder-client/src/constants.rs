//! Client configuration constants.
//!
//! Values the web client sends with every edit request. The defaults track
//! the web player at the time of writing and can be overridden in config.

/// Host the web player is served from.
pub const DEFAULT_BASE_URL: &str = "https://music.youtube.com";

/// Sent as `X-Origin`.
pub const DEFAULT_ORIGIN: &str = "https://music.youtube.com";

/// Path of the batch edit endpoint, relative to the base URL.
pub const EDIT_PLAYLIST_PATH: &str = "youtubei/v1/browse/edit_playlist";

/// Web music client id (`X-Youtube-Client-Name`).
pub const DEFAULT_CLIENT_NAME: &str = "67";

pub const DEFAULT_CLIENT_VERSION: &str = "1.20251215.03.00";

/// Signed-in session index (`X-Goog-AuthUser`).
pub const DEFAULT_AUTH_USER: &str = "0";

/// Environment variable holding the `Authorization` header value.
pub const AUTHORIZATION_ENV: &str = "PLAYORDER_AUTHORIZATION";

/// Environment variable holding an optional `Cookie` header value.
pub const COOKIE_ENV: &str = "PLAYORDER_COOKIE";

pub(crate) const HEADER_AUTH_USER: &str = "x-goog-authuser";
pub(crate) const HEADER_VISITOR_ID: &str = "x-goog-visitor-id";
pub(crate) const HEADER_ORIGIN: &str = "x-origin";
pub(crate) const HEADER_LOGGED_IN: &str = "x-youtube-bootstrap-logged-in";
pub(crate) const HEADER_CLIENT_NAME: &str = "x-youtube-client-name";
pub(crate) const HEADER_CLIENT_VERSION: &str = "x-youtube-client-version";

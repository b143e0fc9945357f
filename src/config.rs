//! Configuration for the resolution library.
//!
//! Two independent authorization domains are configured here: the Spotify Web
//! API (reached through URLs that can be overridden via environment variables
//! for testing) and the Lavalink node (described by an explicit
//! [`NodeConfig`] passed in at construction). The two never share
//! credentials.

use std::env;

use serde::{Deserialize, Serialize};

/// Describes the Lavalink node the resolver searches against.
///
/// Immutable for the lifetime of the engine. The `password` is the node's
/// shared secret, sent verbatim in the `Authorization` header of every
/// search request.
///
/// # Example
///
/// ```
/// use spotilink::config::NodeConfig;
///
/// let node = NodeConfig {
///     host: "localhost".to_string(),
///     port: 2333,
///     password: "youshallnotpass".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl NodeConfig {
    /// Base URL of the node's REST interface.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Returns the Spotify Web API base URL.
///
/// Reads the `SPOTIFY_API_URL` environment variable, falling back to the
/// public endpoint. The override exists so tests can point the catalog
/// client at a local mock server.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Spotify token exchange URL.
///
/// Reads the `SPOTIFY_API_TOKEN_URL` environment variable, falling back to
/// the public accounts endpoint used for the client-credentials grant.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

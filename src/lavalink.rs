//! Search client for the Lavalink node.
//!
//! The node is the second authorization domain: requests carry its shared
//! secret verbatim in the `Authorization` header, never the Spotify
//! credential. The [`SearchSource`] trait is the seam between the resolver
//! and the wire so matching logic can be exercised against a stub backend.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    Res,
    config::NodeConfig,
    types::{LavalinkTrack, LoadTracksResponse},
};

/// Anything that can turn a search identifier into an ordered candidate
/// list.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Runs one search and returns the candidates in the backend's own
    /// order. An empty vec is a normal outcome, not an error.
    async fn load_tracks(&self, identifier: &str) -> Res<Vec<LavalinkTrack>>;
}

/// REST client for one Lavalink node.
pub struct LavalinkClient {
    client: Client,
    node: NodeConfig,
}

impl LavalinkClient {
    pub fn new(node: NodeConfig) -> Self {
        LavalinkClient {
            client: Client::new(),
            node,
        }
    }
}

#[async_trait]
impl SearchSource for LavalinkClient {
    /// `GET /loadtracks?identifier=<query>` against the configured node.
    ///
    /// Transport and decode failures propagate; a response with no `tracks`
    /// array decodes as an empty candidate list.
    async fn load_tracks(&self, identifier: &str) -> Res<Vec<LavalinkTrack>> {
        let url = format!("{}/loadtracks", self.node.base_url());
        debug!(%identifier, "searching lavalink node");

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.node.password)
            .query(&[("identifier", identifier)])
            .send()
            .await?
            .json::<LoadTracksResponse>()
            .await?;

        Ok(response.tracks)
    }
}

use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{
    Res, config,
    token::TokenStore,
    types::{PagedItems, SpotifyTrack},
};

/// Read-only client for Spotify catalog metadata.
///
/// Pure request-and-decode against the Web API, bearer-authenticated with
/// whatever token the shared store currently holds. If no token is present
/// (renewal chain dead or not yet started) the request is still sent and
/// fails authorization at the service; the client never detects that
/// locally.
pub struct CatalogClient {
    client: Client,
    tokens: Arc<TokenStore>,
}

impl CatalogClient {
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        CatalogClient {
            client: Client::new(),
            tokens,
        }
    }

    /// Fetches the ordered track listing of an album.
    ///
    /// `GET /albums/{id}/tracks`; each item decodes through the defensive
    /// track boundary, so one malformed entry fails the whole fetch with a
    /// shape error.
    pub async fn album_tracks(&self, album_id: &str) -> Res<Vec<SpotifyTrack>> {
        let url = format!(
            "{api_url}/albums/{album_id}/tracks",
            api_url = config::spotify_api_url()
        );
        let page = self.get_items(&url).await?;

        page.items
            .iter()
            .map(SpotifyTrack::from_value)
            .collect::<Res<Vec<_>>>()
    }

    /// Fetches the ordered track listing of a playlist.
    ///
    /// `GET /playlists/{id}/tracks`; playlist items nest the track object
    /// under a `track` key, with null entries for tracks that have been
    /// removed from the catalog. A null entry fails with missing-input like
    /// any other absent track.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<SpotifyTrack>> {
        let url = format!(
            "{api_url}/playlists/{playlist_id}/tracks",
            api_url = config::spotify_api_url()
        );
        let page = self.get_items(&url).await?;

        page.items
            .iter()
            .map(|item| SpotifyTrack::from_value(item.get("track").unwrap_or(&Value::Null)))
            .collect::<Res<Vec<_>>>()
    }

    /// Fetches a single track's metadata via `GET /tracks/{id}`.
    pub async fn track(&self, track_id: &str) -> Res<SpotifyTrack> {
        let url = format!(
            "{api_url}/tracks/{track_id}",
            api_url = config::spotify_api_url()
        );
        debug!(%url, "fetching catalog track");

        let token = self.tokens.access_token().await.unwrap_or_default();
        let json: Value = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?
            .json()
            .await?;

        SpotifyTrack::from_value(&json)
    }

    async fn get_items(&self, url: &str) -> Res<PagedItems> {
        debug!(%url, "fetching catalog collection");

        let token = self.tokens.access_token().await.unwrap_or_default();
        let json: Value = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .json()
            .await?;

        let page = serde_json::from_value(json)?;
        Ok(page)
    }
}

//! Spotify → Lavalink Track Resolution Library
//!
//! This library resolves track metadata from the Spotify catalog (albums,
//! playlists, individual tracks) into playable Lavalink tracks for
//! downstream audio players that only understand the node's opaque playable
//! references. It maintains a self-renewing client-credentials token for the
//! catalog and converts each catalog track into zero-or-one best-matching
//! candidate via a search-then-rank heuristic with caller-supplied override
//! hooks.
//!
//! # Modules
//!
//! - `config` - Endpoint configuration and the Lavalink node descriptor
//! - `error` - Typed error taxonomy
//! - `lavalink` - Search client for the Lavalink node
//! - `resolver` - The matching heuristic and strategy hooks
//! - `spotify` - Spotify Web API client (token exchange, catalog metadata)
//! - `token` - Credential manager with a self-perpetuating renewal task
//! - `types` - Data structures and defensive decoding
//!
//! # Example
//!
//! ```
//! use spotilink::{Spotilink, config::NodeConfig, resolver::MatchOptions};
//!
//! #[tokio::main]
//! async fn main() -> spotilink::Res<()> {
//!     let node = NodeConfig {
//!         host: "localhost".to_string(),
//!         port: 2333,
//!         password: "youshallnotpass".to_string(),
//!     };
//!     let mut spotilink = Spotilink::new(node, "client-id", "client-secret");
//!
//!     let options = MatchOptions::same_duration();
//!     if let Some(playable) = spotilink.get_track("6rqhFgbbKwnb9MLmUQDhG6", &options).await? {
//!         println!("resolved to {}", playable.info.title);
//!     }
//!
//!     spotilink.shutdown();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod lavalink;
pub mod resolver;
pub mod spotify;
pub mod token;
pub mod types;

use std::sync::Arc;

pub use error::Error;

use config::NodeConfig;
use lavalink::LavalinkClient;
use resolver::{MatchOptions, Resolver};
use spotify::catalog::CatalogClient;
use token::TokenManager;
use types::{LavalinkTrack, SpotifyTrack};

/// A convenient Result type alias for operations that may fail.
///
/// Carries the crate's typed [`Error`] so callers can match on the distinct
/// failure signals (missing input, wrong shape, credential exchange,
/// transport) without downcasting.
pub type Res<T> = std::result::Result<T, Error>;

/// Facade composing the credential manager, catalog client and resolution
/// engine.
///
/// Construction synchronously kicks off the asynchronous credential renewal
/// chain, so it must happen inside a tokio runtime. All methods take `&self`
/// read access only; concurrent calls are independent.
pub struct Spotilink {
    tokens: TokenManager,
    catalog: CatalogClient,
    resolver: Resolver,
}

impl Spotilink {
    /// Builds the engine against one Lavalink node and one Spotify
    /// application, and starts the token renewal task.
    pub fn new(node: NodeConfig, client_id: &str, client_secret: &str) -> Self {
        let mut tokens = TokenManager::new(client_id, client_secret);
        tokens.start();

        let catalog = CatalogClient::new(tokens.store());
        let resolver = Resolver::new(Arc::new(LavalinkClient::new(node)));

        Spotilink {
            tokens,
            catalog,
            resolver,
        }
    }

    /// Fetches an album's track listing and resolves every track
    /// independently, preserving album order. Per-track failures land in
    /// the corresponding output slot without aborting siblings.
    pub async fn get_album(
        &self,
        album_id: &str,
        options: &MatchOptions,
    ) -> Res<Vec<Res<Option<LavalinkTrack>>>> {
        let tracks = self.catalog.album_tracks(album_id).await?;
        Ok(self.resolver.resolve_all(&tracks, options).await)
    }

    /// Fetches a playlist's track listing and resolves every track
    /// independently, preserving playlist order.
    pub async fn get_playlist(
        &self,
        playlist_id: &str,
        options: &MatchOptions,
    ) -> Res<Vec<Res<Option<LavalinkTrack>>>> {
        let tracks = self.catalog.playlist_tracks(playlist_id).await?;
        Ok(self.resolver.resolve_all(&tracks, options).await)
    }

    /// Fetches one catalog track and resolves it.
    pub async fn get_track(
        &self,
        track_id: &str,
        options: &MatchOptions,
    ) -> Res<Option<LavalinkTrack>> {
        let track = self.catalog.track(track_id).await?;
        self.resolver.resolve(&track, options).await
    }

    /// Resolves an already-known catalog track, the bulk-conversion entry
    /// point for callers that fetched metadata themselves.
    pub async fn resolve(
        &self,
        track: &SpotifyTrack,
        options: &MatchOptions,
    ) -> Res<Option<LavalinkTrack>> {
        self.resolver.resolve(track, options).await
    }

    /// True iff the catalog credential is currently valid.
    pub async fn is_authorized(&self) -> bool {
        self.tokens.is_valid().await
    }

    /// Stops the credential renewal task.
    pub fn shutdown(&mut self) {
        self.tokens.stop();
    }
}

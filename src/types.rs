//! Data shapes exchanged with the Spotify Web API and the Lavalink node.
//!
//! Spotify responses are decoded defensively through [`SpotifyTrack::from_value`]
//! rather than trusted implicitly: a field that is absent fails with
//! [`Error::MissingInput`], a field of the wrong type with
//! [`Error::WrongShape`]. Lavalink responses use plain serde structs matching
//! the node's camelCase wire format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Res, error::Error};

/// Access token obtained from the client-credentials exchange.
///
/// Exactly one instance exists at a time, behind the token store; it is
/// replaced wholesale on renewal, never partially mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Whether the token has outlived `obtained_at + expires_in` as of the
    /// given epoch second.
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.obtained_at.saturating_add(self.expires_in)
    }
}

/// One artist entry on a Spotify track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

/// A track as known to the Spotify catalog.
///
/// Source-of-truth identity for a playable song: a non-empty artist list
/// (the first entry is the primary artist used for query construction), a
/// title and a duration in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub artists: Vec<SpotifyArtist>,
    pub name: String,
    pub duration_ms: u64,
}

impl SpotifyTrack {
    /// Decodes a raw catalog JSON object into a track, validating shape.
    ///
    /// The two-tier failure split lets callers distinguish "forgot to pass
    /// it" from "malformed source data":
    ///
    /// - a null or absent value fails with [`Error::MissingInput`]
    /// - `artists` absent fails with `MissingInput`, present but not an
    ///   array with [`Error::WrongShape`]
    /// - `name` absent fails with `MissingInput`, present but not a string
    ///   with `WrongShape`
    /// - `duration_ms` defaults to 0 when absent but fails with `WrongShape`
    ///   when present and non-numeric
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use spotilink::types::SpotifyTrack;
    ///
    /// let raw = json!({
    ///     "artists": [{"name": "Artist A"}],
    ///     "name": "Song",
    ///     "duration_ms": 200000,
    /// });
    /// let track = SpotifyTrack::from_value(&raw)?;
    /// assert_eq!(track.name, "Song");
    /// # Ok::<(), spotilink::Error>(())
    /// ```
    pub fn from_value(value: &Value) -> Res<Self> {
        if value.is_null() {
            return Err(Error::MissingInput("track"));
        }

        let artists = match value.get("artists") {
            None | Some(Value::Null) => return Err(Error::MissingInput("artists")),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item.get("name").and_then(Value::as_str) {
                    Some(name) => Ok(SpotifyArtist {
                        name: name.to_string(),
                    }),
                    None => Err(Error::WrongShape("artists", "objects with a string `name`")),
                })
                .collect::<Res<Vec<_>>>()?,
            Some(_) => return Err(Error::WrongShape("artists", "an array")),
        };

        let name = match value.get("name") {
            None | Some(Value::Null) => return Err(Error::MissingInput("name")),
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(Error::WrongShape("name", "a string")),
        };

        let duration_ms = match value.get("duration_ms") {
            None | Some(Value::Null) => 0,
            Some(v) => v
                .as_u64()
                .ok_or(Error::WrongShape("duration_ms", "an unsigned integer"))?,
        };

        Ok(SpotifyTrack {
            artists,
            name,
            duration_ms,
        })
    }
}

/// Response shape of `GET /albums/{id}/tracks` and `GET /playlists/{id}/tracks`.
#[derive(Debug, Clone, Deserialize)]
pub struct PagedItems {
    pub items: Vec<Value>,
}

/// Metadata Lavalink reports for one playable track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub identifier: String,
    pub is_seekable: bool,
    pub author: String,
    /// Duration in milliseconds.
    pub length: u64,
    pub is_stream: bool,
    pub position: u64,
    pub title: String,
    pub uri: Option<String>,
}

/// One candidate returned by a Lavalink search.
///
/// `track` is the opaque playable reference downstream players consume;
/// `info` carries the metadata the matching heuristic ranks on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LavalinkTrack {
    pub track: String,
    pub info: TrackInfo,
}

/// Response shape of the node's `/loadtracks` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadTracksResponse {
    #[serde(default)]
    pub tracks: Vec<LavalinkTrack>,
}

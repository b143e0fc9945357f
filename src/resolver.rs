//! The track resolution engine.
//!
//! Converts one catalog track into zero-or-one best-matching playable track
//! via a query-then-rank heuristic: duration-proximity shortcut first, then
//! a filter+sort pipeline open to caller-supplied strategies. Stateless per
//! call, so batch paths can apply it independently per track.

use std::{cmp::Ordering, sync::Arc};

use crate::{
    Res,
    error::Error,
    lavalink::SearchSource,
    types::{LavalinkTrack, SpotifyTrack},
};

/// Half-width of the duration-proximity window, inclusive.
///
/// A candidate whose runtime is within this distance of the source track's
/// strongly implies the identical recording.
pub const DURATION_WINDOW_MS: u64 = 1500;

/// Caller-supplied matching policy.
///
/// Both methods have provided defaults, so a strategy only overrides the
/// capability it cares about: `accept` prunes candidates before ranking
/// (default accepts everything), `compare` orders the survivors (default
/// treats all pairs as equal, preserving backend order under the stable
/// sort).
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use spotilink::resolver::MatchStrategy;
/// use spotilink::types::{LavalinkTrack, SpotifyTrack};
///
/// /// Prefers non-stream uploads and refuses live cuts.
/// struct StudioOnly;
///
/// impl MatchStrategy for StudioOnly {
///     fn accept(&self, candidate: &LavalinkTrack, _source: &SpotifyTrack) -> bool {
///         !candidate.info.title.to_lowercase().contains("live")
///     }
///
///     fn compare(&self, a: &LavalinkTrack, b: &LavalinkTrack, _source: &SpotifyTrack) -> Ordering {
///         a.info.is_stream.cmp(&b.info.is_stream)
///     }
/// }
/// ```
pub trait MatchStrategy: Send + Sync {
    /// Whether `candidate` may enter the ranking pool at all.
    fn accept(&self, _candidate: &LavalinkTrack, _source: &SpotifyTrack) -> bool {
        true
    }

    /// Relative preference between two accepted candidates; `Less` sorts
    /// `a` ahead of `b`.
    fn compare(&self, _a: &LavalinkTrack, _b: &LavalinkTrack, _source: &SpotifyTrack) -> Ordering {
        Ordering::Equal
    }
}

/// The concrete accept-all / stable default policy.
pub struct DefaultStrategy;

impl MatchStrategy for DefaultStrategy {}

/// Per-call matching options.
///
/// `Default` supplies the documented behavior for omitted options: the
/// duration shortcut disabled and the accept-all / always-equal strategy.
pub struct MatchOptions {
    /// When set, the first candidate (in backend order) whose duration lies
    /// within ±[`DURATION_WINDOW_MS`] of the source track short-circuits
    /// the filter+sort pipeline.
    pub prioritize_same_duration: bool,
    pub strategy: Box<dyn MatchStrategy>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            prioritize_same_duration: false,
            strategy: Box::new(DefaultStrategy),
        }
    }
}

impl MatchOptions {
    /// Options with the duration shortcut enabled and the default strategy.
    pub fn same_duration() -> Self {
        MatchOptions {
            prioritize_same_duration: true,
            ..MatchOptions::default()
        }
    }

    /// Options carrying a custom strategy, duration shortcut disabled.
    pub fn with_strategy(strategy: impl MatchStrategy + 'static) -> Self {
        MatchOptions {
            prioritize_same_duration: false,
            strategy: Box::new(strategy),
        }
    }
}

/// Builds the free-text search directive for a catalog track.
///
/// `"ytsearch:<primary artist> - <title>"`, where the primary artist is the
/// first entry of the track's artist list.
pub fn search_query(track: &SpotifyTrack) -> String {
    let artist = track.artists.first().map(|a| a.name.as_str()).unwrap_or("");
    format!("ytsearch:{artist} - {title}", title = track.name)
}

/// Resolves catalog tracks against one search backend.
pub struct Resolver {
    source: Arc<dyn SearchSource>,
}

impl Resolver {
    pub fn new(source: Arc<dyn SearchSource>) -> Self {
        Resolver { source }
    }

    /// Resolves one catalog track to its best-matching playable candidate.
    ///
    /// Validation happens before any I/O: an empty artist list or an empty
    /// title fails with [`Error::MissingInput`] (shape errors were already
    /// raised at the catalog decode boundary). The backend is then searched
    /// with the track's display title and the candidates ranked:
    ///
    /// 1. No candidates at all → `Ok(None)`.
    /// 2. With `prioritize_same_duration` set, the first candidate in
    ///    backend order within the duration window wins outright, ignoring
    ///    the custom filter and sort. If none qualifies the generic stage
    ///    still runs; the shortcut never replaces it.
    /// 3. Otherwise candidates are filtered by the strategy's `accept`,
    ///    stable-sorted by its `compare`, and the first survivor returned.
    ///
    /// "No match" is a first-class `Ok(None)`, never an error.
    pub async fn resolve(
        &self,
        track: &SpotifyTrack,
        options: &MatchOptions,
    ) -> Res<Option<LavalinkTrack>> {
        validate(track)?;

        let query = search_query(track);
        let candidates = self.source.load_tracks(&query).await?;

        Ok(pick_candidate(candidates, track, options))
    }

    /// Applies [`resolve`](Resolver::resolve) independently to every track,
    /// preserving input order. One track's failure never aborts its
    /// siblings; aggregation semantics stay with the caller.
    pub async fn resolve_all(
        &self,
        tracks: &[SpotifyTrack],
        options: &MatchOptions,
    ) -> Vec<Res<Option<LavalinkTrack>>> {
        let mut resolved = Vec::with_capacity(tracks.len());
        for track in tracks {
            resolved.push(self.resolve(track, options).await);
        }
        resolved
    }
}

fn validate(track: &SpotifyTrack) -> Res<()> {
    if track.artists.is_empty() {
        return Err(Error::MissingInput("artists"));
    }
    if track.name.is_empty() {
        return Err(Error::MissingInput("name"));
    }
    Ok(())
}

/// Selects the best candidate from one search result.
///
/// The duration shortcut deliberately takes the FIRST in-window candidate in
/// backend order rather than the closest one; downstream behavior depends on
/// this tie-break.
fn pick_candidate(
    candidates: Vec<LavalinkTrack>,
    source: &SpotifyTrack,
    options: &MatchOptions,
) -> Option<LavalinkTrack> {
    if candidates.is_empty() {
        return None;
    }

    if options.prioritize_same_duration {
        let hit = candidates
            .iter()
            .find(|c| c.info.length.abs_diff(source.duration_ms) <= DURATION_WINDOW_MS);
        if let Some(hit) = hit {
            return Some(hit.clone());
        }
    }

    let mut pool: Vec<LavalinkTrack> = candidates
        .into_iter()
        .filter(|c| options.strategy.accept(c, source))
        .collect();
    pool.sort_by(|a, b| options.strategy.compare(a, b, source));

    pool.into_iter().next()
}

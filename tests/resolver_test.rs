use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use spotilink::Error;
use spotilink::lavalink::SearchSource;
use spotilink::resolver::{MatchOptions, MatchStrategy, Resolver, search_query};
use spotilink::types::{LavalinkTrack, SpotifyArtist, SpotifyTrack, TrackInfo};

// Helper function to create a test catalog track
fn create_test_track(artist: &str, name: &str, duration_ms: u64) -> SpotifyTrack {
    SpotifyTrack {
        artists: vec![SpotifyArtist {
            name: artist.to_string(),
        }],
        name: name.to_string(),
        duration_ms,
    }
}

// Helper function to create a test search candidate
fn create_test_candidate(id: &str, title: &str, length: u64) -> LavalinkTrack {
    LavalinkTrack {
        track: format!("encoded_{}", id),
        info: TrackInfo {
            identifier: id.to_string(),
            is_seekable: true,
            author: "Uploader".to_string(),
            length,
            is_stream: false,
            position: 0,
            title: title.to_string(),
            uri: Some(format!("https://example.com/watch?v={}", id)),
        },
    }
}

// Search source returning a fixed candidate list, recording the last query
struct StaticSource {
    tracks: Vec<LavalinkTrack>,
    last_query: Mutex<Option<String>>,
}

impl StaticSource {
    fn new(tracks: Vec<LavalinkTrack>) -> Arc<Self> {
        Arc::new(StaticSource {
            tracks,
            last_query: Mutex::new(None),
        })
    }
}

#[async_trait]
impl SearchSource for StaticSource {
    async fn load_tracks(&self, identifier: &str) -> spotilink::Res<Vec<LavalinkTrack>> {
        *self.last_query.lock().unwrap() = Some(identifier.to_string());
        Ok(self.tracks.clone())
    }
}

struct RejectAll;

impl MatchStrategy for RejectAll {
    fn accept(&self, _candidate: &LavalinkTrack, _source: &SpotifyTrack) -> bool {
        false
    }
}

// Prefers longer candidates, regardless of the source track
struct LongestFirst;

impl MatchStrategy for LongestFirst {
    fn compare(&self, a: &LavalinkTrack, b: &LavalinkTrack, _source: &SpotifyTrack) -> Ordering {
        b.info.length.cmp(&a.info.length)
    }
}

#[test]
fn test_search_query_format() {
    let track = create_test_track("Artist A", "Song", 200000);
    assert_eq!(search_query(&track), "ytsearch:Artist A - Song");
}

#[test]
fn test_search_query_uses_primary_artist() {
    let mut track = create_test_track("First", "Song", 1);
    track.artists.push(SpotifyArtist {
        name: "Second".to_string(),
    });

    // Only the first artist enters the query
    assert_eq!(search_query(&track), "ytsearch:First - Song");
}

#[tokio::test]
async fn test_empty_results_return_no_match() {
    let resolver = Resolver::new(StaticSource::new(vec![]));
    let track = create_test_track("Artist A", "Song", 200000);

    let result = resolver
        .resolve(&track, &MatchOptions::default())
        .await
        .unwrap();
    assert!(result.is_none());

    // No-match holds for any option configuration
    let result = resolver
        .resolve(&track, &MatchOptions::same_duration())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_duration_priority_picks_first_within_window() {
    let source = StaticSource::new(vec![
        create_test_candidate("a", "Song", 198000),
        create_test_candidate("b", "Song (Extended)", 250000),
    ]);
    let resolver = Resolver::new(source);
    let track = create_test_track("Artist A", "Song", 200000);

    let result = resolver
        .resolve(&track, &MatchOptions::same_duration())
        .await
        .unwrap()
        .expect("should match");
    assert_eq!(result.info.identifier, "a");
}

#[tokio::test]
async fn test_duration_window_is_inclusive() {
    // Exactly 1500 ms away still qualifies
    let source = StaticSource::new(vec![create_test_candidate("edge", "Song", 201500)]);
    let resolver = Resolver::new(source);
    let track = create_test_track("Artist A", "Song", 200000);

    let result = resolver
        .resolve(&track, &MatchOptions::same_duration())
        .await
        .unwrap();
    assert!(result.is_some());

    // 1501 ms away does not
    let source = StaticSource::new(vec![create_test_candidate("out", "Song", 201501)]);
    let resolver = Resolver::new(source);

    let result = resolver
        .resolve(&track, &MatchOptions::same_duration())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_duration_priority_overrides_custom_strategy() {
    let source = StaticSource::new(vec![create_test_candidate("a", "Song", 200000)]);
    let resolver = Resolver::new(source);
    let track = create_test_track("Artist A", "Song", 200000);

    let options = MatchOptions {
        prioritize_same_duration: true,
        strategy: Box::new(RejectAll),
    };

    // The in-window candidate wins even though the filter rejects everything
    let result = resolver.resolve(&track, &options).await.unwrap();
    assert_eq!(result.unwrap().info.identifier, "a");
}

#[tokio::test]
async fn test_duration_miss_falls_through_to_strategy() {
    let source = StaticSource::new(vec![
        create_test_candidate("short", "Song", 100000),
        create_test_candidate("long", "Song (Full Album)", 3600000),
    ]);
    let resolver = Resolver::new(source);
    let track = create_test_track("Artist A", "Song", 200000);

    let options = MatchOptions {
        prioritize_same_duration: true,
        strategy: Box::new(LongestFirst),
    };

    // Nothing within the window, so the generic stage still runs
    let result = resolver.resolve(&track, &options).await.unwrap();
    assert_eq!(result.unwrap().info.identifier, "long");
}

#[tokio::test]
async fn test_shortcut_inert_when_disabled() {
    let source = StaticSource::new(vec![
        create_test_candidate("near", "Song", 198000),
        create_test_candidate("far", "Song (Extended)", 250000),
    ]);
    let resolver = Resolver::new(source);
    let track = create_test_track("Artist A", "Song", 200000);

    let options = MatchOptions {
        prioritize_same_duration: false,
        strategy: Box::new(LongestFirst),
    };

    // With the shortcut off the in-window candidate gets no special
    // treatment; the custom sort alone decides
    let result = resolver.resolve(&track, &options).await.unwrap();
    assert_eq!(result.unwrap().info.identifier, "far");
}

#[tokio::test]
async fn test_default_options_return_first_in_backend_order() {
    let source = StaticSource::new(vec![
        create_test_candidate("first", "Song", 198000),
        create_test_candidate("second", "Song", 250000),
    ]);
    let resolver = Resolver::new(source);
    let track = create_test_track("Artist A", "Song", 200000);

    let result = resolver
        .resolve(&track, &MatchOptions::default())
        .await
        .unwrap();
    assert_eq!(result.unwrap().info.identifier, "first");
}

#[tokio::test]
async fn test_filter_applies_before_sort() {
    struct SkipExtendedLongestFirst;

    impl MatchStrategy for SkipExtendedLongestFirst {
        fn accept(&self, candidate: &LavalinkTrack, _source: &SpotifyTrack) -> bool {
            !candidate.info.title.contains("Extended")
        }

        fn compare(&self, a: &LavalinkTrack, b: &LavalinkTrack, _: &SpotifyTrack) -> Ordering {
            b.info.length.cmp(&a.info.length)
        }
    }

    let source = StaticSource::new(vec![
        create_test_candidate("keep", "Song", 198000),
        create_test_candidate("drop", "Song (Extended)", 250000),
    ]);
    let resolver = Resolver::new(source);
    let track = create_test_track("Artist A", "Song", 200000);

    let options = MatchOptions::with_strategy(SkipExtendedLongestFirst);

    // The sort would rank "drop" first, but the filter removed it
    let result = resolver.resolve(&track, &options).await.unwrap();
    assert_eq!(result.unwrap().info.identifier, "keep");
}

#[tokio::test]
async fn test_filter_rejecting_everything_yields_no_match() {
    let source = StaticSource::new(vec![create_test_candidate("a", "Song", 198000)]);
    let resolver = Resolver::new(source);
    let track = create_test_track("Artist A", "Song", 200000);

    let result = resolver
        .resolve(&track, &MatchOptions::with_strategy(RejectAll))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_returned_candidate_comes_from_backend_results() {
    let candidates = vec![
        create_test_candidate("a", "Song", 198000),
        create_test_candidate("b", "Song", 250000),
    ];
    let source = StaticSource::new(candidates.clone());
    let resolver = Resolver::new(source);
    let track = create_test_track("Artist A", "Song", 200000);

    let result = resolver
        .resolve(&track, &MatchOptions::same_duration())
        .await
        .unwrap()
        .unwrap();
    assert!(candidates.contains(&result));
}

#[tokio::test]
async fn test_validation_happens_before_search() {
    let source = StaticSource::new(vec![create_test_candidate("a", "Song", 198000)]);
    let resolver = Resolver::new(Arc::clone(&source) as Arc<dyn SearchSource>);

    let mut track = create_test_track("Artist A", "Song", 200000);
    track.artists.clear();

    let err = resolver
        .resolve(&track, &MatchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingInput("artists")));

    // The search source was never consulted
    assert!(source.last_query.lock().unwrap().is_none());

    let track = create_test_track("Artist A", "", 200000);
    let err = resolver
        .resolve(&track, &MatchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingInput("name")));
}

#[tokio::test]
async fn test_resolver_sends_expected_query() {
    let source = StaticSource::new(vec![]);
    let resolver = Resolver::new(Arc::clone(&source) as Arc<dyn SearchSource>);
    let track = create_test_track("Artist A", "Song", 200000);

    resolver
        .resolve(&track, &MatchOptions::default())
        .await
        .unwrap();

    let query = source.last_query.lock().unwrap().clone();
    assert_eq!(query.as_deref(), Some("ytsearch:Artist A - Song"));
}

#[tokio::test]
async fn test_resolve_all_preserves_order_and_isolates_failures() {
    let source = StaticSource::new(vec![create_test_candidate("a", "Song", 198000)]);
    let resolver = Resolver::new(source);

    let tracks = vec![
        create_test_track("Artist A", "Song", 200000),
        create_test_track("Artist B", "", 1),
        create_test_track("Artist C", "Other Song", 198500),
    ];

    let results = resolver
        .resolve_all(&tracks, &MatchOptions::same_duration())
        .await;
    assert_eq!(results.len(), 3);

    assert_eq!(
        results[0].as_ref().unwrap().as_ref().unwrap().info.identifier,
        "a"
    );
    assert!(matches!(
        results[1].as_ref().unwrap_err(),
        Error::MissingInput("name")
    ));
    assert!(results[2].as_ref().unwrap().is_some());
}

use chrono::NaiveDate;
use weeklify::discovery::*;
use weeklify::types::{Album, AlbumArtist, Artist, Track, TrackRecord};

// Helper function to create a test artist
fn create_test_artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        genres: Vec::new(),
    }
}

// Helper function to create a test album
fn create_test_album(id: &str, name: &str, release_date: &str, artist_name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        release_date: release_date.to_string(),
        release_date_precision: "day".to_string(),
        album_type: "album".to_string(),
        artists: vec![AlbumArtist {
            id: format!("{}_artist_id", id),
            name: artist_name.to_string(),
        }],
    }
}

// Helper function to create a test track record
fn create_test_track(name: &str, artist: &str, release_date: &str) -> TrackRecord {
    TrackRecord {
        id: format!("{}_{}_id", name, artist),
        name: name.to_string(),
        artist: artist.to_string(),
        album: format!("{} Album", name),
        release_date: release_date.to_string(),
        released: normalize_release_date(release_date).unwrap(),
        uri: format!("spotify:track:{}_{}", name, artist),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_normalize_release_date_full() {
    assert_eq!(
        normalize_release_date("2024-03-15"),
        Some(date(2024, 3, 15))
    );
}

#[test]
fn test_normalize_release_date_year_month() {
    // Missing day defaults to the first of the month
    assert_eq!(normalize_release_date("2024-03"), Some(date(2024, 3, 1)));
}

#[test]
fn test_normalize_release_date_year_only() {
    // Missing month and day default to January 1st
    assert_eq!(normalize_release_date("2024"), Some(date(2024, 1, 1)));
}

#[test]
fn test_normalize_release_date_rejects_other_lengths() {
    assert_eq!(normalize_release_date(""), None);
    assert_eq!(normalize_release_date("20240"), None);
    assert_eq!(normalize_release_date("2024-03-15T00"), None);
    assert_eq!(normalize_release_date("next friday"), None);
}

#[test]
fn test_normalize_release_date_rejects_unparseable() {
    // Right length, not a date
    assert_eq!(normalize_release_date("2024-13-99"), None);
    assert_eq!(normalize_release_date("abcd"), None);
    assert_eq!(normalize_release_date("abcd-ef"), None);
}

#[test]
fn test_release_cutoff() {
    let today = date(2024, 3, 15);
    assert_eq!(release_cutoff(today, 7), date(2024, 3, 8));
    assert_eq!(release_cutoff(today, 0), today);

    // Crosses a month boundary
    assert_eq!(release_cutoff(date(2024, 3, 3), 7), date(2024, 2, 25));
}

#[test]
fn test_recent_albums_filters_by_cutoff() {
    let albums = vec![
        create_test_album("a1", "Fresh", "2024-03-15", "Artist A"),
        create_test_album("a2", "Stale", "2024-01-01", "Artist A"),
        create_test_album("a3", "On The Edge", "2024-03-08", "Artist A"),
    ];

    let recent = recent_albums(albums, date(2024, 3, 8));

    let names: Vec<&str> = recent.iter().map(|(a, _)| a.name.as_str()).collect();
    assert_eq!(names, vec!["Fresh", "On The Edge"]);
}

#[test]
fn test_recent_albums_normalizes_partial_dates() {
    // A year-month release counts from the first of the month
    let albums = vec![
        create_test_album("a1", "Month Only", "2024-03", "Artist A"),
        create_test_album("a2", "Year Only", "2024", "Artist A"),
    ];

    let recent = recent_albums(albums.clone(), date(2024, 3, 1));
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].0.name, "Month Only");
    assert_eq!(recent[0].1, date(2024, 3, 1));

    // With a cutoff at January 1st both qualify
    let recent = recent_albums(albums, date(2024, 1, 1));
    assert_eq!(recent.len(), 2);
}

#[test]
fn test_recent_albums_skips_malformed_dates() {
    let albums = vec![
        create_test_album("a1", "Good", "2024-03-15", "Artist A"),
        create_test_album("a2", "Bad", "someday soon", "Artist A"),
    ];

    let recent = recent_albums(albums, date(2024, 1, 1));
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].0.name, "Good");
}

#[test]
fn test_flatten_album_tracks_carries_metadata() {
    let artist = create_test_artist("ar1", "Artist A");
    let album = create_test_album("al1", "The Album", "2024-03-15", "Artist A");
    let tracks = vec![
        Track {
            id: "t1".to_string(),
            name: "Track One".to_string(),
            uri: "spotify:track:t1".to_string(),
        },
        Track {
            id: "t2".to_string(),
            name: "Track Two".to_string(),
            uri: "spotify:track:t2".to_string(),
        },
    ];

    let records = flatten_album_tracks(&artist, &album, date(2024, 3, 15), tracks);

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.artist, "Artist A");
        assert_eq!(record.album, "The Album");
        assert_eq!(record.release_date, "2024-03-15");
        assert_eq!(record.released, date(2024, 3, 15));
    }
    assert_eq!(records[0].name, "Track One");
    assert_eq!(records[1].uri, "spotify:track:t2");
}

#[test]
fn test_collect_scan_isolates_failures() {
    // Artist B's lookup failed; A and C still contribute their tracks
    let results = vec![
        (
            create_test_artist("a", "Artist A"),
            Ok(vec![create_test_track("Song A", "Artist A", "2024-03-15")]),
        ),
        (
            create_test_artist("b", "Artist B"),
            Err("502 Bad Gateway".to_string()),
        ),
        (
            create_test_artist("c", "Artist C"),
            Ok(vec![create_test_track("Song C", "Artist C", "2024-03-14")]),
        ),
    ];

    let report = collect_scan(results);

    assert_eq!(report.scanned, 3);
    assert_eq!(report.tracks.len(), 2);
    let names: Vec<&str> = report.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Song A", "Song C"]);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "Artist B");
    assert_eq!(report.skipped[0].reason, "502 Bad Gateway");
}

#[test]
fn test_collect_scan_empty() {
    let report = collect_scan(Vec::new());
    assert_eq!(report.scanned, 0);
    assert!(report.tracks.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_candidate_artists_dedupes_by_id() {
    let followed = vec![
        create_test_artist("id1", "Artist A"),
        create_test_artist("id2", "Artist B"),
    ];
    let related = vec![
        create_test_artist("id2", "Artist B"), // already followed
        create_test_artist("id3", "Artist C"),
    ];

    let candidates = candidate_artists(followed, related);

    let ids: Vec<&str> = candidates.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["id1", "id2", "id3"]);
}

#[test]
fn test_dedupe_tracks_case_insensitive_first_wins() {
    let tracks = vec![
        create_test_track("Midnight", "Artist A", "2024-03-15"),
        create_test_track("MIDNIGHT", "artist a", "2024-03-10"), // duplicate key
        create_test_track("Midnight", "Artist B", "2024-03-12"), // different artist
    ];

    let deduped = dedupe_tracks(tracks);

    assert_eq!(deduped.len(), 2);
    // First occurrence kept
    assert_eq!(deduped[0].artist, "Artist A");
    assert_eq!(deduped[0].release_date, "2024-03-15");
    assert_eq!(deduped[1].artist, "Artist B");
}

#[test]
fn test_dedupe_tracks_no_shared_keys() {
    let tracks = vec![
        create_test_track("One", "Artist A", "2024-03-15"),
        create_test_track("Two", "Artist A", "2024-03-15"),
        create_test_track("one", "artist A", "2024-03-15"),
    ];

    let deduped = dedupe_tracks(tracks);

    let mut keys: Vec<(String, String)> = deduped
        .iter()
        .map(|t| (t.name.to_lowercase(), t.artist.to_lowercase()))
        .collect();
    let before = keys.len();
    keys.dedup();
    assert_eq!(before, keys.len());
}

#[test]
fn test_rank_tracks_newest_first() {
    let tracks = vec![
        create_test_track("Older", "Artist A", "2024-02-01"),
        create_test_track("Newer", "Artist A", "2024-03-15"),
    ];

    let ranked = rank_tracks(tracks, 50);

    assert_eq!(ranked[0].name, "Newer");
    assert_eq!(ranked[1].name, "Older");
}

#[test]
fn test_rank_tracks_orders_partial_dates_chronologically() {
    // A year-month string sorts by its normalized date, not lexicographically
    let tracks = vec![
        create_test_track("Month Precision", "Artist A", "2024-03"),
        create_test_track("Day Precision", "Artist B", "2024-02-20"),
    ];

    let ranked = rank_tracks(tracks, 50);

    assert_eq!(ranked[0].name, "Month Precision"); // 2024-03-01 > 2024-02-20
    assert_eq!(ranked[1].name, "Day Precision");
}

#[test]
fn test_rank_tracks_tie_break_by_artist() {
    let tracks = vec![
        create_test_track("Song Z", "Zeta", "2024-03-15"),
        create_test_track("Song A", "Alpha", "2024-03-15"),
    ];

    let ranked = rank_tracks(tracks, 50);

    assert_eq!(ranked[0].artist, "Alpha");
    assert_eq!(ranked[1].artist, "Zeta");
}

#[test]
fn test_rank_tracks_truncates_to_max() {
    let tracks: Vec<TrackRecord> = (0..120)
        .map(|i| create_test_track(&format!("Song {}", i), "Artist A", "2024-03-15"))
        .collect();

    let ranked = rank_tracks(tracks, 50);
    assert_eq!(ranked.len(), 50);

    let ranked = rank_tracks(Vec::new(), 50);
    assert!(ranked.is_empty());
}

#[test]
fn test_playlist_add_batching() {
    // 150 track URIs split into exactly two append calls: 100 + 50
    let uris: Vec<String> = (0..150).map(|i| format!("spotify:track:{}", i)).collect();

    let chunks: Vec<usize> = uris.chunks(100).map(|c| c.len()).collect();
    assert_eq!(chunks, vec![100, 50]);
}

#[test]
fn test_playlist_name() {
    assert_eq!(
        playlist_name("Weekly Discoveries", date(2024, 3, 15)),
        "Weekly Discoveries - March 15, 2024"
    );
    assert_eq!(
        playlist_name("Fresh Finds", date(2023, 12, 1)),
        "Fresh Finds - December 01, 2023"
    );
}

#[test]
fn test_playlist_description() {
    let description = playlist_description(7, date(2024, 3, 15));
    assert!(description.contains("past 7 days"));
    assert!(description.contains("Generated on 2024-03-15"));
}

//! Pure pipeline logic for the discovery run.
//!
//! Everything in this module is a synchronous transform over already-fetched
//! API data: release-date normalization, the release-window filter, flattening
//! albums into track records, deduplication and ranking. Keeping these free
//! of I/O lets the whole pipeline be exercised in tests without a network.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::types::{Album, Artist, ScanReport, SkippedArtist, Track, TrackRecord};

/// Normalizes a release-date string to a full date.
///
/// The API reports dates at day, month or year precision. Missing components
/// default to the first of the month / January 1st:
///
/// - `"2024-03-15"` → 2024-03-15
/// - `"2024-03"` → 2024-03-01
/// - `"2024"` → 2024-01-01
///
/// Any other length, or a string that does not parse, yields `None` and the
/// album is dropped from the scan.
pub fn normalize_release_date(raw: &str) -> Option<NaiveDate> {
    let full = match raw.len() {
        10 => raw.to_string(),
        7 => format!("{raw}-01"),
        4 => format!("{raw}-01-01"),
        _ => return None,
    };
    NaiveDate::parse_from_str(&full, "%Y-%m-%d").ok()
}

/// Computes the earliest release date that still counts as "recent".
pub fn release_cutoff(today: NaiveDate, days_lookback: u32) -> NaiveDate {
    today - Duration::days(days_lookback as i64)
}

/// Filters an artist's albums down to those released on or after the cutoff,
/// pairing each with its normalized release date. Albums with malformed
/// dates are skipped silently.
pub fn recent_albums(albums: Vec<Album>, cutoff: NaiveDate) -> Vec<(Album, NaiveDate)> {
    albums
        .into_iter()
        .filter_map(|album| {
            let released = normalize_release_date(&album.release_date)?;
            (released >= cutoff).then_some((album, released))
        })
        .collect()
}

/// Flattens one qualifying album into track records carrying the parent
/// artist and album metadata.
pub fn flatten_album_tracks(
    artist: &Artist,
    album: &Album,
    released: NaiveDate,
    tracks: Vec<Track>,
) -> Vec<TrackRecord> {
    tracks
        .into_iter()
        .map(|track| TrackRecord {
            id: track.id,
            name: track.name,
            artist: artist.name.clone(),
            album: album.name.clone(),
            release_date: album.release_date.clone(),
            released,
            uri: track.uri,
        })
        .collect()
}

/// Folds per-artist scan outcomes into a single report. Successful scans
/// contribute their tracks in iteration order; failed ones are recorded with
/// the artist name and reason so the run can report what was skipped.
pub fn collect_scan(results: Vec<(Artist, Result<Vec<TrackRecord>, String>)>) -> ScanReport {
    let mut report = ScanReport::default();
    for (artist, result) in results {
        report.scanned += 1;
        match result {
            Ok(tracks) => report.tracks.extend(tracks),
            Err(reason) => report.skipped.push(SkippedArtist {
                name: artist.name,
                reason,
            }),
        }
    }
    report
}

/// Merges followed and related artists into the candidate set, dropping
/// duplicate identifiers while preserving order.
pub fn candidate_artists(followed: Vec<Artist>, related: Vec<Artist>) -> Vec<Artist> {
    let mut seen: HashSet<String> = HashSet::new();
    followed
        .into_iter()
        .chain(related)
        .filter(|artist| seen.insert(artist.id.clone()))
        .collect()
}

/// Removes duplicate tracks by case-insensitive (track name, artist name)
/// key, keeping the first occurrence in scan order.
pub fn dedupe_tracks(tracks: Vec<TrackRecord>) -> Vec<TrackRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    tracks
        .into_iter()
        .filter(|track| seen.insert((track.name.to_lowercase(), track.artist.to_lowercase())))
        .collect()
}

/// Sorts tracks by normalized release date descending, artist name ascending
/// as tie-break, and truncates to `max_tracks`.
///
/// Ordering on the normalized date keeps year-only and year-month releases
/// in correct chronological position relative to full dates.
pub fn rank_tracks(mut tracks: Vec<TrackRecord>, max_tracks: usize) -> Vec<TrackRecord> {
    tracks.sort_by(|a, b| {
        b.released
            .cmp(&a.released)
            .then_with(|| a.artist.cmp(&b.artist))
    });
    tracks.truncate(max_tracks);
    tracks
}

/// Builds the playlist name from the configured prefix and a human-readable
/// date, e.g. "Weekly Discoveries - March 15, 2024".
pub fn playlist_name(prefix: &str, today: NaiveDate) -> String {
    format!("{} - {}", prefix, today.format("%B %d, %Y"))
}

/// Builds the playlist description mentioning the lookback window and the
/// generation date.
pub fn playlist_description(days_lookback: u32, today: NaiveDate) -> String {
    format!(
        "New releases from your followed artists and similar artists from the past {} days. Generated on {}",
        days_lookback,
        today.format("%Y-%m-%d")
    )
}

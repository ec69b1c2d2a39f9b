use std::{collections::HashSet, time::Duration};

use chrono::{NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, discovery, error, info,
    management::Session,
    spotify, success,
    types::{Artist, ScanReport, TrackRecord, TrackTableRow},
    warning,
};

/// Resolved knobs for one discovery run: env config overridden by CLI flags.
struct RunOptions {
    days_lookback: u32,
    max_tracks: usize,
    max_related: usize,
    prefix: String,
}

pub async fn generate(
    days: Option<u32>,
    max_tracks: Option<usize>,
    max_related: Option<usize>,
    prefix: Option<String>,
) {
    config::ensure_credentials();

    let options = RunOptions {
        days_lookback: days.unwrap_or_else(config::days_lookback),
        max_tracks: max_tracks.unwrap_or_else(config::max_tracks_per_playlist),
        max_related: max_related.unwrap_or_else(config::max_related_artists),
        prefix: prefix.unwrap_or_else(config::playlist_name_prefix),
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            warning!("Interrupted by user.");
        }
        _ = run(options) => {}
    }
}

async fn run(options: RunOptions) {
    let mut session = match Session::open().await {
        Ok(session) => session,
        Err(e) => error!("Authentication failed: {}", e),
    };

    let user = session.user();
    success!(
        "Authenticated as {}",
        user.display_name.clone().unwrap_or_else(|| user.id.clone())
    );

    let followed = fetch_followed_artists(&mut session).await;
    if followed.is_empty() {
        info!("No followed artists found. Follow some artists on Spotify first.");
        return;
    }
    info!("Found {} followed artists", followed.len());

    let related = expand_related_artists(&mut session, &followed, options.max_related).await;
    info!("Found {} similar artists for discovery", related.len());

    let candidates = discovery::candidate_artists(followed, related);

    let today = Utc::now().date_naive();
    let cutoff = discovery::release_cutoff(today, options.days_lookback);
    info!(
        "Checking {} artists for releases in the last {} days...",
        candidates.len(),
        options.days_lookback
    );

    let report = scan_releases(&mut session, &candidates, cutoff).await;
    for skipped in &report.skipped {
        warning!("Skipped {}: {}", skipped.name, skipped.reason);
    }

    let tracks = discovery::rank_tracks(discovery::dedupe_tracks(report.tracks), options.max_tracks);

    if tracks.is_empty() {
        info!(
            "No new releases in the past {} days. Check back later!",
            options.days_lookback
        );
        return;
    }

    print_track_summary(&tracks);

    publish_playlist(&mut session, &tracks, &options, today).await;
}

/// Fetches the complete followed-artist set, page by page. Any page failure
/// aborts the run.
async fn fetch_followed_artists(session: &mut Session) -> Vec<Artist> {
    let pb = spinner("Fetching followed artists...");

    let mut all_artists: Vec<Artist> = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let token = session.bearer().await;
        let result = spotify::artists::get_followed_page(
            session.client(),
            &token,
            config::FOLLOWED_PAGE_LIMIT,
            after.clone(),
        )
        .await;

        match result {
            Ok((artists, next_after)) => {
                if artists.is_empty() {
                    break;
                }

                all_artists.extend(artists);
                pb.set_message(format!("Fetched {} followed artists...", all_artists.len()));
                after = next_after;

                if after.is_none() {
                    break;
                }
            }
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to fetch followed artists: {}", e);
            }
        }
    }

    pb.finish_and_clear();
    all_artists
}

/// Queries related artists for a bounded sample of the followed set and
/// accumulates artists not already known, up to `max_related`. Per-source
/// failures are logged and skipped.
async fn expand_related_artists(
    session: &mut Session,
    followed: &[Artist],
    max_related: usize,
) -> Vec<Artist> {
    let mut seen: HashSet<String> = followed.iter().map(|a| a.id.clone()).collect();
    let mut related: Vec<Artist> = Vec::new();

    let pb = spinner("Finding similar artists for discovery...");

    for source in followed.iter().take(config::RELATED_SOURCE_SAMPLE) {
        if related.len() >= max_related {
            break;
        }

        let token = session.bearer().await;
        match spotify::artists::get_related_artists(session.client(), &token, &source.id).await {
            Ok(artists) => {
                for artist in artists {
                    if related.len() >= max_related {
                        break;
                    }
                    if seen.insert(artist.id.clone()) {
                        related.push(artist);
                    }
                }
                pb.set_message(format!("Found {} similar artists...", related.len()));
            }
            Err(e) => {
                pb.suspend(|| {
                    warning!("Failed to fetch similar artists for {}: {}", source.name, e)
                });
            }
        }
    }

    pb.finish_and_clear();
    related
}

/// Scans every candidate artist for recent releases. A failing artist is
/// recorded in the report and the scan moves on to the next one.
async fn scan_releases(
    session: &mut Session,
    candidates: &[Artist],
    cutoff: NaiveDate,
) -> ScanReport {
    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results: Vec<(Artist, Result<Vec<TrackRecord>, String>)> =
        Vec::with_capacity(candidates.len());

    for artist in candidates {
        pb.set_message(artist.name.clone());
        let result = scan_artist(session, artist, cutoff).await;
        results.push((artist.clone(), result));
        pb.inc(1);
    }

    pb.finish_and_clear();
    discovery::collect_scan(results)
}

async fn scan_artist(
    session: &mut Session,
    artist: &Artist,
    cutoff: NaiveDate,
) -> Result<Vec<TrackRecord>, String> {
    let token = session.bearer().await;
    let albums = spotify::releases::get_artist_albums(
        session.client(),
        &token,
        &artist.id,
        config::ALBUM_FETCH_LIMIT,
    )
    .await
    .map_err(|e| e.to_string())?;

    let mut tracks: Vec<TrackRecord> = Vec::new();
    for (album, released) in discovery::recent_albums(albums, cutoff) {
        let token = session.bearer().await;
        let album_tracks = spotify::releases::get_album_tracks(session.client(), &token, &album.id)
            .await
            .map_err(|e| e.to_string())?;
        tracks.extend(discovery::flatten_album_tracks(
            artist,
            &album,
            released,
            album_tracks,
        ));
    }

    Ok(tracks)
}

/// Prints the first ten ranked tracks as a table, with a count of the rest.
fn print_track_summary(tracks: &[TrackRecord]) {
    info!("Found {} recent tracks", tracks.len());

    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .take(10)
        .map(|t| TrackTableRow {
            track: t.name.clone(),
            artist: t.artist.clone(),
            album: t.album.clone(),
            released: t.release_date.clone(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);

    if tracks.len() > 10 {
        println!("... and {} more tracks", tracks.len() - 10);
    }
}

/// Creates the playlist and appends the ranked tracks in API-sized batches.
/// Any failure here ends the run with an error status; the already-created
/// playlist is left as is.
async fn publish_playlist(
    session: &mut Session,
    tracks: &[TrackRecord],
    options: &RunOptions,
    today: NaiveDate,
) {
    let name = discovery::playlist_name(&options.prefix, today);
    let description = discovery::playlist_description(options.days_lookback, today);

    let token = session.bearer().await;
    let user_id = session.user().id.clone();
    let playlist = match spotify::playlist::create(
        session.client(),
        &token,
        &user_id,
        &name,
        &description,
    )
    .await
    {
        Ok(playlist) => playlist,
        Err(e) => error!("Failed to create playlist: {}", e),
    };

    let uris: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();
    for chunk in uris.chunks(config::PLAYLIST_ADD_BATCH) {
        let token = session.bearer().await;
        if let Err(e) =
            spotify::playlist::add_tracks(session.client(), &token, &playlist.id, chunk).await
        {
            error!("Failed to add tracks to playlist '{}': {}", playlist.name, e);
        }
    }

    success!(
        "Created playlist '{}' with {} tracks",
        playlist.name,
        tracks.len()
    );
    info!("Playlist URL: {}", playlist.external_urls.spotify);
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

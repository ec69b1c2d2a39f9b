//! Configuration management for weeklify.
//!
//! Configuration comes from environment variables, optionally loaded from a
//! `.env` file. The loader looks in the platform-specific local data
//! directory first (`~/.local/share/weeklify/.env` on Linux) and falls back
//! to a `.env` in the working directory, so both installed and development
//! runs pick up credentials without extra flags.
//!
//! Required values are the Spotify credential triple; everything else has a
//! default. Pipeline limits that are policy rather than user configuration
//! (page sizes, sampling caps, batch sizes) live here as named constants.

use std::{env, path::PathBuf};

use dotenv;

/// Number of followed artists requested per page (API maximum).
pub const FOLLOWED_PAGE_LIMIT: u64 = 50;

/// How many followed artists are queried for related artists. Bounds the
/// API call volume of the expansion step.
pub const RELATED_SOURCE_SAMPLE: usize = 10;

/// Maximum albums/singles inspected per candidate artist.
pub const ALBUM_FETCH_LIMIT: u32 = 10;

/// Catalog locale used when listing an artist's releases.
pub const RELEASE_MARKET: &str = "US";

/// Maximum track URIs per playlist-append request (API limit).
pub const PLAYLIST_ADD_BATCH: usize = 100;

/// Permissions requested during authorization: read followed artists and
/// library, create/modify public and private playlists.
pub const SPOTIFY_SCOPE: &str =
    "user-follow-read user-library-read playlist-modify-public playlist-modify-private";

const SPOTIFY_API_URL_DEFAULT: &str = "https://api.spotify.com/v1";
const SPOTIFY_API_AUTH_URL_DEFAULT: &str = "https://accounts.spotify.com/authorize";
const SPOTIFY_API_TOKEN_URL_DEFAULT: &str = "https://accounts.spotify.com/api/token";

/// Loads environment variables from a `.env` file.
///
/// Prefers `weeklify/.env` in the local data directory, creating the
/// directory if necessary; a `.env` in the current working directory is
/// loaded as a fallback. Missing files are not an error, missing variables
/// are reported by the individual accessors.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("weeklify/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    dotenv::dotenv().ok();
    Ok(())
}

fn required(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        crate::error!(
            "Missing Spotify API credentials: {} is not set. See .env.example.",
            name
        );
    })
}

/// Returns the Spotify application client ID.
///
/// Aborts the process with a diagnostic if `SPOTIFY_CLIENT_ID` is not set.
pub fn spotify_client_id() -> String {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify application client secret.
///
/// Aborts the process with a diagnostic if `SPOTIFY_CLIENT_SECRET` is not set.
pub fn spotify_client_secret() -> String {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Returns the OAuth redirect URI registered for the application.
///
/// The callback server binds to the host/port of this URI during `auth`.
/// Aborts the process with a diagnostic if `SPOTIFY_REDIRECT_URI` is not set.
pub fn spotify_redirect_uri() -> String {
    required("SPOTIFY_REDIRECT_URI")
}

/// Aborts with a diagnostic unless the full credential triple is set.
/// Called before any pipeline work so a misconfigured run fails up front.
pub fn ensure_credentials() {
    let _ = spotify_client_id();
    let _ = spotify_client_secret();
    let _ = spotify_redirect_uri();
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL` override or the
/// production endpoint).
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| SPOTIFY_API_URL_DEFAULT.to_string())
}

/// Returns the OAuth authorization URL (`SPOTIFY_API_AUTH_URL` override or
/// the production endpoint).
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|_| SPOTIFY_API_AUTH_URL_DEFAULT.to_string())
}

/// Returns the OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL` override or
/// the production endpoint).
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| SPOTIFY_API_TOKEN_URL_DEFAULT.to_string())
}

/// Release-window length in days (`DAYS_LOOKBACK`, default 7).
pub fn days_lookback() -> u32 {
    env_parsed("DAYS_LOOKBACK", 7)
}

/// Upper bound on tracks in the generated playlist
/// (`MAX_TRACKS_PER_PLAYLIST`, default 50).
pub fn max_tracks_per_playlist() -> usize {
    env_parsed("MAX_TRACKS_PER_PLAYLIST", 50)
}

/// Upper bound on related artists added to the candidate set
/// (`DISCOVERY_MAX_RELATED`, default 20).
pub fn max_related_artists() -> usize {
    env_parsed("DISCOVERY_MAX_RELATED", 20)
}

/// Name prefix for generated playlists (`PLAYLIST_NAME_PREFIX`, default
/// "Weekly Discoveries").
pub fn playlist_name_prefix() -> String {
    env::var("PLAYLIST_NAME_PREFIX").unwrap_or_else(|_| "Weekly Discoveries".to_string())
}

fn env_parsed<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

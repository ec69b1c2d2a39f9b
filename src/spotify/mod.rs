//! # Spotify Integration Module
//!
//! Thin typed client functions over the Spotify Web API endpoints the
//! discovery pipeline consumes. Each submodule covers one API domain:
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow with PKCE, token exchange
//! - [`user`] - Current-user identity lookup
//! - [`artists`] - Followed artists (cursor pagination) and related artists
//! - [`releases`] - Albums/singles per artist and per-album track listings
//! - [`playlist`] - Playlist creation and batched track appends
//!
//! All request functions take the session's HTTP client and a bearer token
//! as parameters; none hold global state. Failed HTTP statuses are turned
//! into errors via `error_for_status` and propagated unretried; callers
//! decide between skip-and-continue and aborting the run.

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod releases;
pub mod user;

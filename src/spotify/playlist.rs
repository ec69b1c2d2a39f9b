use reqwest::Client;

use crate::{
    config,
    types::{
        AddTracksToPlaylistRequest, AddTracksToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse,
    },
};

/// Creates a new private playlist owned by the given user.
///
/// # Returns
///
/// The created playlist, including its ID and sharable external URL.
pub async fn create(
    client: &Client,
    token: &str,
    user_id: &str,
    name: &str,
    description: &str,
) -> Result<CreatePlaylistResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config::spotify_apiurl(),
        user_id = user_id
    );

    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public: false,
        collaborative: false,
    };

    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    response.json::<CreatePlaylistResponse>().await
}

/// Appends track URIs to a playlist. Callers must keep each call within the
/// API limit of 100 URIs; the pipeline chunks with
/// `config::PLAYLIST_ADD_BATCH`.
pub async fn add_tracks(
    client: &Client,
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<AddTracksToPlaylistResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = &config::spotify_apiurl(),
        playlist_id = playlist_id
    );

    let body = AddTracksToPlaylistRequest {
        uris: uris.to_vec(),
    };

    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    response.json::<AddTracksToPlaylistResponse>().await
}

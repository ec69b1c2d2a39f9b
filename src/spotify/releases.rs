use reqwest::Client;

use crate::{
    config,
    types::{Album, AlbumResponse, AlbumTracksResponse, Track},
};

/// Retrieves the most recent albums and singles for an artist.
///
/// Results are restricted to the configured catalog market so release dates
/// match what the user can actually play. The release-window filter happens
/// afterwards in `discovery::recent_albums`.
///
/// # Arguments
///
/// * `client` - The session's HTTP client
/// * `token` - Valid access token
/// * `artist_id` - Spotify ID of the artist
/// * `limit` - Maximum number of albums to return (1-50)
pub async fn get_artist_albums(
    client: &Client,
    token: &str,
    artist_id: &str,
    limit: u32,
) -> Result<Vec<Album>, reqwest::Error> {
    let api_url = format!(
        "{uri}/artists/{id}/albums?include_groups=album,single&market={market}&limit={limit}",
        uri = &config::spotify_apiurl(),
        id = artist_id,
        market = config::RELEASE_MARKET,
        limit = limit
    );

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<AlbumResponse>().await?;

    Ok(json.items)
}

/// Retrieves the track listing of one album.
pub async fn get_album_tracks(
    client: &Client,
    token: &str,
    album_id: &str,
) -> Result<Vec<Track>, reqwest::Error> {
    let api_url = format!(
        "{uri}/albums/{id}/tracks?limit=50",
        uri = &config::spotify_apiurl(),
        id = album_id
    );

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<AlbumTracksResponse>().await?;

    Ok(json.items)
}

use reqwest::Client;

use crate::{
    config,
    types::{Artist, FollowedArtistsResponse, RelatedArtistsResponse},
};

/// Retrieves one page of the user's followed artists.
///
/// Spotify paginates this endpoint with an opaque cursor: pass the cursor
/// from the previous page as `after`, or `None` for the first page.
///
/// # Arguments
///
/// * `client` - The session's HTTP client
/// * `token` - Valid access token
/// * `limit` - Page size (1-50)
/// * `after` - Optional cursor for the next page
///
/// # Returns
///
/// The page of artists and the cursor for the following page, or `None`
/// when this was the last page.
pub async fn get_followed_page(
    client: &Client,
    token: &str,
    limit: u64,
    after: Option<String>,
) -> Result<(Vec<Artist>, Option<String>), reqwest::Error> {
    let mut api_url = format!(
        "{uri}/me/following?type=artist&limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = limit
    );
    if let Some(after_val) = &after {
        api_url.push_str(&format!("&after={}", after_val));
    }

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let res = response.json::<FollowedArtistsResponse>().await?;
    let next_after = res.artists.cursors.and_then(|c| c.after);

    Ok((res.artists.items, next_after))
}

/// Retrieves the artists Spotify's recommendation system associates with
/// the given artist.
pub async fn get_related_artists(
    client: &Client,
    token: &str,
    artist_id: &str,
) -> Result<Vec<Artist>, reqwest::Error> {
    let api_url = format!(
        "{uri}/artists/{id}/related-artists",
        uri = &config::spotify_apiurl(),
        id = artist_id
    );

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let res = response.json::<RelatedArtistsResponse>().await?;

    Ok(res.artists)
}

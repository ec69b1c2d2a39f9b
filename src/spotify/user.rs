use reqwest::Client;

use crate::{config, types::CurrentUser};

/// Resolves the identity of the authenticated user.
///
/// The returned user ID owns every playlist the run creates.
pub async fn get_current_user(client: &Client, token: &str) -> Result<CurrentUser, reqwest::Error> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    response.json::<CurrentUser>().await
}

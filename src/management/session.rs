use reqwest::Client;

use crate::{management::TokenManager, spotify, types::CurrentUser};

/// An authenticated API session: HTTP client, token cache and the resolved
/// user identity. Passed explicitly into every pipeline step instead of
/// living in process-global state.
pub struct Session {
    client: Client,
    tokens: TokenManager,
    user: CurrentUser,
}

impl Session {
    /// Opens a session from the cached authorization token and binds it to
    /// the current user. Fails when no token has been cached yet or the
    /// identity lookup is rejected.
    pub async fn open() -> Result<Self, String> {
        let mut tokens = TokenManager::load()
            .await
            .map_err(|e| format!("no cached authorization ({e}); run `weeklify auth` first"))?;

        let client = Client::new();
        let token = tokens.get_valid_token().await;
        let user = spotify::user::get_current_user(&client, &token)
            .await
            .map_err(|e| e.to_string())?;

        Ok(Self {
            client,
            tokens,
            user,
        })
    }

    /// Returns a currently valid access token, refreshing it when close to
    /// expiry.
    pub async fn bearer(&mut self) -> String {
        self.tokens.get_valid_token().await
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }
}

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config, error,
    management::{Session, TokenManager},
    server::start_api_server,
    success,
    types::{AuthFlowState, Token},
    utils, warning,
};

/// Runs the complete OAuth 2.0 authorization-code flow with PKCE.
///
/// Generates a PKCE verifier/challenge pair, starts the local callback
/// server, opens the authorization URL in the user's browser and waits for
/// the callback handler to exchange the authorization code for a token.
/// On success the token is persisted to the local cache and the resolved
/// user identity is printed.
///
/// # Arguments
///
/// * `shared_state` - Thread-safe state shared with the callback handler,
///   carrying the code verifier out and the exchanged token back
pub async fn auth(shared_state: Arc<Mutex<Option<AuthFlowState>>>) {
    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // start the callback server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let auth_url = match reqwest::Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id()),
            ("response_type", "code".to_string()),
            ("redirect_uri", config::spotify_redirect_uri()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256".to_string()),
            ("scope", config::SPOTIFY_SCOPE.to_string()),
        ],
    ) {
        Ok(url) => url,
        Err(e) => error!("Failed to build authorization URL: {}", e),
    };

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(AuthFlowState {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let token = wait_for_token(shared_state).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(t.clone());
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            match Session::open().await {
                Ok(session) => {
                    let user = session.user();
                    success!(
                        "Authenticated as {}",
                        user.display_name.clone().unwrap_or_else(|| user.id.clone())
                    );
                }
                Err(e) => warning!("Token saved, but identity lookup failed: {}", e),
            }
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the shared state for a completed token, up to 60 seconds.
async fn wait_for_token(shared_state: Arc<Mutex<Option<AuthFlowState>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(flow_state) = lock.as_ref() {
            if let Some(token) = &flow_state.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for an access token.
///
/// Sends the client credentials together with the PKCE code verifier, which
/// must match the challenge from the initial authorization request.
pub async fn exchange_code(code: &str, verifier: &str) -> Result<Token, reqwest::Error> {
    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", &config::spotify_client_id()),
            ("client_secret", &config::spotify_client_secret()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", &config::spotify_redirect_uri()),
        ])
        .send()
        .await?;

    let json: Value = res.json().await?;

    Ok(Token {
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

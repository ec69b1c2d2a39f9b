use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{api, config, error, types::AuthFlowState, utils};

/// Starts the local HTTP server that receives the OAuth callback. The bind
/// address is derived from the configured redirect URI.
pub async fn start_api_server(state: Arc<Mutex<Option<AuthFlowState>>>) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let bind_addr = match utils::callback_bind_addr(&config::spotify_redirect_uri()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to derive callback address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind callback server on {}: {}", bind_addr, e),
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Callback server error: {}", e);
    }
}

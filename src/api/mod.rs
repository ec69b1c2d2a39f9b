//! HTTP endpoints for the local OAuth callback server.
//!
//! Two routes exist: `/callback` receives the authorization code from the
//! browser redirect and completes the token exchange, `/health` answers a
//! minimal status probe while the server is up.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;

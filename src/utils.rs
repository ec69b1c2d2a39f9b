use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts the `host:port` the callback server should bind to from the
/// configured redirect URI, e.g. `http://127.0.0.1:8888/callback` →
/// `127.0.0.1:8888`. A redirect URI without an explicit port falls back to
/// the scheme default.
pub fn callback_bind_addr(redirect_uri: &str) -> Result<String, String> {
    let url = reqwest::Url::parse(redirect_uri).map_err(|e| e.to_string())?;
    let host = url
        .host_str()
        .ok_or_else(|| format!("redirect URI has no host: {redirect_uri}"))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| format!("redirect URI has no port: {redirect_uri}"))?;
    Ok(format!("{host}:{port}"))
}

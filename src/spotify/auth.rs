use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::{Res, config, error::Error, types::Token};

/// Derives the Basic authorization header used for the token exchange.
///
/// Stable, deterministic combination of the two application secrets:
/// `"Basic " + base64(client_id + ":" + client_secret)`, per RFC 6749's
/// client-password scheme. Computed once at construction and reused for
/// every renewal.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

/// Performs one client-credentials token exchange against Spotify.
///
/// Posts `grant_type=client_credentials` to the accounts token endpoint with
/// the stored Basic authorization header and decodes the response into a
/// [`Token`] stamped with the current epoch second.
///
/// # Errors
///
/// - [`Error::Http`] on transport failure
/// - [`Error::CredentialExchange`] when the exchange succeeds at the
///   transport level but yields no usable `access_token`
pub async fn request_token(client: &Client, auth_header: &str) -> Res<Token> {
    let response = client
        .post(config::spotify_token_url())
        .header("Authorization", auth_header)
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let json: Value = response.json().await?;
    parse_token_response(&json)
}

/// Decodes a token-exchange response body.
///
/// A missing or empty `access_token` fails with
/// [`Error::CredentialExchange`]; a missing `expires_in` falls back to
/// Spotify's documented one-hour validity.
pub fn parse_token_response(json: &Value) -> Res<Token> {
    let access_token = match json.get("access_token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => return Err(Error::CredentialExchange),
    };

    Ok(Token {
        access_token,
        expires_in: json
            .get("expires_in")
            .and_then(Value::as_u64)
            .unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

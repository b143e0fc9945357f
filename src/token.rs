//! Credential lifecycle for the Spotify catalog service.
//!
//! Exactly one access token exists at a time, owned by the [`TokenManager`]
//! and readable by the catalog client through a shared [`TokenStore`]. The
//! manager runs a self-perpetuating renewal task: each successful exchange
//! arms exactly one future renewal after the returned validity period, so at
//! most one renewal is ever in flight. A failed exchange is fatal to the
//! chain; the task exits and every later catalog request fails authorization
//! at the service until the process restarts.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::{sync::RwLock, task::JoinHandle, time::sleep};
use tracing::{error, info};

use crate::{spotify::auth, types::Token};

/// Lifecycle state of the shared credential.
///
/// `Failed` is terminal: it has no outgoing transition and requires a
/// process restart to leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Uninitialized,
    Renewing,
    Valid,
    Failed,
}

/// Shared, read-mostly view of the current credential.
///
/// Only the manager's renewal task writes here; replacement is a single
/// whole-value assignment, so concurrent readers observe either the old or
/// the new token, never a partial update.
#[derive(Debug)]
pub struct TokenStore {
    token: RwLock<Option<Token>>,
    state: RwLock<TokenState>,
}

impl TokenStore {
    fn new() -> Self {
        TokenStore {
            token: RwLock::new(None),
            state: RwLock::new(TokenState::Uninitialized),
        }
    }

    /// Current bearer token, if the renewal chain has produced one.
    pub async fn access_token(&self) -> Option<String> {
        let token = self.token.read().await;
        token.as_ref().map(|t| t.access_token.clone())
    }

    pub async fn state(&self) -> TokenState {
        *self.state.read().await
    }

    async fn replace(&self, token: Token) {
        *self.token.write().await = Some(token);
        *self.state.write().await = TokenState::Valid;
    }

    async fn set_state(&self, state: TokenState) {
        *self.state.write().await = state;
    }
}

/// Owns the catalog credential and its renewal schedule.
///
/// Construction derives the reusable Basic authorization header from the
/// client id and secret; [`start`](TokenManager::start) kicks off the first
/// renewal. The explicit `start`/`stop`/`is_valid` lifecycle replaces a
/// callback chain so a supervisor can observe or restart the task.
pub struct TokenManager {
    auth_header: String,
    store: Arc<TokenStore>,
    task: Option<JoinHandle<()>>,
}

impl TokenManager {
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        TokenManager {
            auth_header: auth::basic_auth_header(client_id, client_secret),
            store: Arc::new(TokenStore::new()),
            task: None,
        }
    }

    /// Shared handle for components that read the credential.
    pub fn store(&self) -> Arc<TokenStore> {
        Arc::clone(&self.store)
    }

    /// Spawns the renewal task; a no-op if it is already running.
    ///
    /// The task loops: exchange, publish the fresh token, sleep the
    /// returned validity period converted to milliseconds, exchange again.
    /// On an exchange failure it marks the store `Failed`, logs the error
    /// and exits without scheduling another renewal.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }

        let store = Arc::clone(&self.store);
        let auth_header = self.auth_header.clone();

        self.task = Some(tokio::spawn(async move {
            let client = Client::new();
            loop {
                store.set_state(TokenState::Renewing).await;
                match auth::request_token(&client, &auth_header).await {
                    Ok(token) => {
                        let delay = renewal_delay(token.expires_in);
                        info!(expires_in = token.expires_in, "access token renewed");
                        store.replace(token).await;
                        sleep(delay).await;
                    }
                    Err(e) => {
                        store.set_state(TokenState::Failed).await;
                        error!("token renewal failed, renewal chain stopped: {e}");
                        break;
                    }
                }
            }
        }));
    }

    /// Aborts the renewal task if one is running. The current token stays
    /// in the store but will expire without replacement.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// True iff the credential is in the `Valid` state and has not outlived
    /// its validity period.
    pub async fn is_valid(&self) -> bool {
        if self.store.state().await != TokenState::Valid {
            return false;
        }

        let token = self.store.token.read().await;
        match token.as_ref() {
            Some(t) => !t.is_expired(Utc::now().timestamp() as u64),
            None => false,
        }
    }
}

/// Delay until the next renewal: the returned validity period converted to
/// milliseconds, saturating on a malformed huge `expires_in` instead of
/// wrapping into an immediate re-arm.
fn renewal_delay(expires_in: u64) -> Duration {
    Duration::from_millis(expires_in.saturating_mul(1000))
}

impl Drop for TokenManager {
    fn drop(&mut self) {
        self.stop();
    }
}

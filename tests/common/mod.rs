//! Shared helpers for tests that stand up a local HTTP stub and point the
//! clients at it through the environment-variable URL overrides.

use std::sync::{Mutex, MutexGuard};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that override process-global environment variables.
///
/// Every test touching `SPOTIFY_API_URL` / `SPOTIFY_API_TOKEN_URL` must hold
/// the returned guard for its whole body and set the variable itself; tests
/// in the same binary otherwise race on the shared process environment.
pub fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Binds a listener on an ephemeral local port that answers every request
/// with `200 OK` and the given JSON body. Returns the base URL to point a
/// client at.
pub async fn spawn_http_stub(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;

                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {len}\r\nconnection: close\r\n\r\n{body}",
                    len = body.len(),
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

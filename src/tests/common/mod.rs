// tests/common/mod.rs
pub use axum::{body::Body, Router};
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;

use crate::client::ApiClient;
use crate::config::settings::ClientConfig;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn test_config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(format!("http://{addr}"))
}

pub async fn test_client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(test_config(addr)).await.expect("api client")
}

/// A page envelope body the way the backend emits one.
pub fn page_body() -> String {
    json!({
        "status": "ok",
        "message": null,
        "data": { "items": [], "page": 1, "page_size": 10, "total": 0 }
    })
    .to_string()
}

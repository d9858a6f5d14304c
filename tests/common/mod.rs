//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axle::HttpServer;
use tokio::net::TcpListener;

/// Bind an ephemeral port, spawn the server on it, and return the address.
pub async fn spawn_server(server: HttpServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// A client that talks straight to the test server.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}

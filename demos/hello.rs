//! Minimal embedding: two modules behind a global `/api/v1` prefix.
//!
//! Run with `cargo run --example hello`, then:
//!
//! ```text
//! curl http://127.0.0.1:3000/api/v1/ping
//! curl http://127.0.0.1:3000/api/v1/users
//! curl -X POST -d 'hi' http://127.0.0.1:3000/api/v1/echo
//! ```

use axle::{AppConfig, Endpoint, HandlerResponse, HttpServer, ListenConfig, Module};
use axum::http::{Method, StatusCode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    axle::observability::logging::init();

    let mut server = HttpServer::new(AppConfig {
        global_prefix: Some("api".into()),
        global_version: Some("v1".into()),
        ..Default::default()
    });

    let health = Module::new("health").endpoint(Endpoint::new(
        "ping",
        Method::GET,
        "ping",
        |_req| async {
            Ok(HandlerResponse::new()
                .header("Content-Type", "text/plain")
                .text("pong"))
        },
    ));

    let users = Module::new("users")
        .endpoint(Endpoint::new("list", Method::GET, "users", |_req| async {
            let body = serde_json::json!([
                { "id": 1, "name": "ada" },
                { "id": 2, "name": "grace" },
            ]);
            Ok(HandlerResponse::new()
                .header("Content-Type", "application/json")
                .text(body.to_string()))
        }))
        .endpoint(Endpoint::new("echo", Method::POST, "echo", |req| async {
            let bytes = axum::body::to_bytes(req.into_body(), 64 * 1024).await?;
            let text = String::from_utf8(bytes.to_vec())?;
            Ok(HandlerResponse::new()
                .status(StatusCode::OK)
                .header("Content-Type", "text/plain")
                .text_with(async move { text }))
        }));

    server.register_all([health, users])?;

    server
        .listen(&ListenConfig {
            hostname: "127.0.0.1".into(),
            port: 3000,
        })
        .await?;

    Ok(())
}

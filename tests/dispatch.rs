//! End-to-end dispatch tests: real sockets, real HTTP.

use axle::{AppConfig, BoxError, Endpoint, HandlerResponse, HttpServer, ListenConfig, Module};
use axum::http::header::{HeaderMap, HeaderValue};
use axum::http::{Method, StatusCode};
use std::collections::HashMap;

mod common;

fn ping_module() -> Module {
    Module::new("health").endpoint(Endpoint::new("ping", Method::GET, "ping", |_req| async {
        Ok(HandlerResponse::new()
            .status(StatusCode::OK)
            .header("Content-Type", "text/plain")
            .text("pong"))
    }))
}

#[tokio::test]
async fn test_ping_round_trip() {
    let mut server = HttpServer::new(AppConfig::default());
    server.register(ping_module()).unwrap();
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .get(format!("http://{addr}/ping"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "text/plain");
    assert_eq!(res.text().await.unwrap(), "pong");
}

#[tokio::test]
async fn test_unregistered_path_is_404() {
    let mut server = HttpServer::new(AppConfig::default());
    server.register(ping_module()).unwrap();
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .get(format!("http://{addr}/missing"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.headers()["content-type"], "text/plain");
    assert_eq!(res.text().await.unwrap(), "Route not found");
}

#[tokio::test]
async fn test_method_must_match() {
    let mut server = HttpServer::new(AppConfig::default());
    server.register(ping_module()).unwrap();
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .post(format!("http://{addr}/ping"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_query_string_ignored_for_matching() {
    let mut server = HttpServer::new(AppConfig::default());
    server.register(ping_module()).unwrap();
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .get(format!("http://{addr}/ping?verbose=1"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "pong");
}

#[tokio::test]
async fn test_global_prefix_and_version_on_the_wire() {
    let mut server = HttpServer::new(AppConfig {
        global_prefix: Some("api".into()),
        global_version: Some("v1".into()),
        ..Default::default()
    });
    server.register(ping_module()).unwrap();
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .get(format!("http://{addr}/api/v1/ping"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    // The bare route is not reachable when a prefix is configured.
    let bare = common::client()
        .get(format!("http://{addr}/ping"))
        .send()
        .await
        .unwrap();
    assert_eq!(bare.status(), 404);
}

#[tokio::test]
async fn test_duplicate_registration_last_write_wins() {
    let mut server = HttpServer::new(AppConfig::default());
    server
        .register_all([
            Module::new("old").endpoint(Endpoint::new("v1", Method::GET, "thing", |_req| async {
                Ok(HandlerResponse::new().text("first"))
            })),
            Module::new("new").endpoint(Endpoint::new("v2", Method::GET, "thing", |_req| async {
                Ok(HandlerResponse::new().text("second"))
            })),
        ])
        .unwrap();
    assert_eq!(server.registry().len(), 1);
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .get(format!("http://{addr}/thing"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "second");
}

#[tokio::test]
async fn test_handler_failure_yields_500_with_diagnostics() {
    let mut server = HttpServer::new(AppConfig::default());
    server
        .register(Module::new("broken").endpoint(Endpoint::new(
            "boom",
            Method::GET,
            "boom",
            |_req| async { Err::<HandlerResponse, BoxError>("boom".into()) },
        )))
        .unwrap();
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .get(format!("http://{addr}/boom"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert_eq!(res.headers()["content-type"], "text/html");
    let body = res.text().await.unwrap();
    assert!(body.contains("boom"));
    assert!(body.contains("<pre>"));
}

#[tokio::test]
async fn test_handler_failure_redacted_when_configured() {
    let mut server = HttpServer::new(AppConfig {
        expose_errors: false,
        ..Default::default()
    });
    server
        .register(Module::new("broken").endpoint(Endpoint::new(
            "boom",
            Method::GET,
            "boom",
            |_req| async { Err::<HandlerResponse, BoxError>("super secret".into()) },
        )))
        .unwrap();
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .get(format!("http://{addr}/boom"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body = res.text().await.unwrap();
    assert!(!body.contains("super secret"));
}

#[tokio::test]
async fn test_failure_does_not_poison_the_server() {
    let mut server = HttpServer::new(AppConfig::default());
    server
        .register(
            ping_module().endpoint(Endpoint::new("boom", Method::GET, "boom", |_req| async {
                Err::<HandlerResponse, BoxError>("boom".into())
            })),
        )
        .unwrap();
    let addr = common::spawn_server(server).await;
    let client = common::client();

    let failed = client
        .get(format!("http://{addr}/boom"))
        .send()
        .await
        .unwrap();
    assert_eq!(failed.status(), 500);

    let ok = client
        .get(format!("http://{addr}/ping"))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), 200);
}

#[tokio::test]
async fn test_deferred_body_resolves() {
    let mut server = HttpServer::new(AppConfig::default());
    server
        .register(Module::new("slow").endpoint(Endpoint::new(
            "later",
            Method::GET,
            "later",
            |_req| async {
                Ok(HandlerResponse::new().text_with(async {
                    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                    "eventually".to_string()
                }))
            },
        )))
        .unwrap();
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .get(format!("http://{addr}/later"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "eventually");
}

#[tokio::test]
async fn test_header_flavors_reach_the_wire_identically() {
    let mut server = HttpServer::new(AppConfig::default());
    server
        .register(
            Module::new("headers")
                .endpoint(Endpoint::new("typed", Method::GET, "typed", |_req| async {
                    let mut map = HeaderMap::new();
                    map.insert("content-type", HeaderValue::from_static("text/plain"));
                    map.insert("x-flavor", HeaderValue::from_static("typed"));
                    Ok(HandlerResponse::new().headers(map).text("ok"))
                }))
                .endpoint(Endpoint::new("plain", Method::GET, "plain", |_req| async {
                    let mut map = HashMap::new();
                    map.insert("content-type".to_string(), "text/plain".to_string());
                    map.insert("x-flavor".to_string(), "typed".to_string());
                    Ok(HandlerResponse::new().headers(map).text("ok"))
                })),
        )
        .unwrap();
    let addr = common::spawn_server(server).await;
    let client = common::client();

    let typed = client
        .get(format!("http://{addr}/typed"))
        .send()
        .await
        .unwrap();
    let plain = client
        .get(format!("http://{addr}/plain"))
        .send()
        .await
        .unwrap();

    assert_eq!(typed.headers()["content-type"], "text/plain");
    assert_eq!(plain.headers()["content-type"], "text/plain");
    assert_eq!(typed.headers()["x-flavor"], plain.headers()["x-flavor"]);
}

#[tokio::test]
async fn test_root_route_dispatches() {
    let mut server = HttpServer::new(AppConfig::default());
    server
        .register(Module::new("root").endpoint(Endpoint::new("home", Method::GET, "/", |_req| async {
            Ok(HandlerResponse::new().text("home"))
        })))
        .unwrap();
    let addr = common::spawn_server(server).await;

    let res = common::client()
        .get(format!("http://{addr}//"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "home");
}

#[tokio::test]
async fn test_listen_logs_and_serves() {
    // listen() binds from hostname/port itself; use a throwaway port and
    // race it against a short client retry loop.
    let mut server = HttpServer::new(AppConfig::default());
    server.register(ping_module()).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    tokio::spawn(async move {
        let _ = server
            .listen(&ListenConfig {
                hostname: "127.0.0.1".into(),
                port,
            })
            .await;
    });

    let client = common::client();
    let mut last = None;
    for _ in 0..50 {
        match client
            .get(format!("http://127.0.0.1:{port}/ping"))
            .send()
            .await
        {
            Ok(res) => {
                last = Some(res);
                break;
            }
            Err(_) => tokio::time::sleep(std::time::Duration::from_millis(20)).await,
        }
    }

    let res = last.expect("server never came up");
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "pong");
}

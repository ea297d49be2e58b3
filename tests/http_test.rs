//! HTTP adapter tests driving the Axum app directly.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use route_resolver::config::{build_router, parse_config};
use route_resolver::constraints::ConstraintSet;
use route_resolver::http::HttpServer;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn send(server: &HttpServer, method: &str, uri: &str) -> Response {
    server
        .app()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_match_is_returned_as_json() {
    let server = HttpServer::new(common::blog_router());

    let response = send(&server, "GET", "/users/42?tab=posts").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "pattern": "/users/{id}",
            "method": "GET",
            "action": "users.show",
            "params": { "id": 42 }
        })
    );
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let server = HttpServer::new(common::blog_router());

    let response = send(&server, "GET", "/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "no route matches the requested path");
}

#[tokio::test]
async fn test_wrong_method_is_405_with_allow() {
    let server = HttpServer::new(common::blog_router());

    let response = send(&server, "POST", "/users/1").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ALLOW], "GET, PUT");
}

#[tokio::test]
async fn test_replace_swaps_routes() {
    let constraints = ConstraintSet::builtin();
    let server = HttpServer::new(common::blog_router());
    assert_eq!(send(&server, "GET", "/ping").await.status(), StatusCode::NOT_FOUND);

    let table = parse_config(
        "[[routes]]\nmethods = \"GET\"\npattern = \"/ping\"\naction = \"ping\"\n",
        &constraints,
    )
    .unwrap();
    server.replace(build_router(&table, &constraints).unwrap());

    let response = send(&server, "GET", "/ping").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["action"], "ping");
}

#[tokio::test]
async fn test_run_serves_and_applies_updates() {
    let constraints = ConstraintSet::builtin();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(common::blog_router());
    let routes = server.routes();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(server.run(listener, Some(rx), async {
        let _ = stop_rx.await;
    }));

    let table = parse_config(
        "[[routes]]\nmethods = \"ANY\"\npattern = \"/live\"\naction = \"live\"\n",
        &constraints,
    )
    .unwrap();
    tx.send(build_router(&table, &constraints).unwrap()).unwrap();

    // The update task swaps asynchronously.
    for _ in 0..50 {
        if routes.load().match_route("GET", "/live").is_ok() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(routes.load().match_route("GET", "/live").is_ok());
    assert!(addr.port() > 0);

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

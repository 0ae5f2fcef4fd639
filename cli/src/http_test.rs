use std::net::SocketAddr;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use serde_json::json;

use super::*;

async fn fake_backend() -> SocketAddr {
    let router = Router::new()
        .route("/api/health", get(|| async { axum::Json(json!({ "status": "healthy" })) }))
        .route("/api/sources/{id}", delete(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/api/factcheck/{id}",
            get(|| async { (StatusCode::NOT_FOUND, "Fact-check result not found\ntrace...") }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    addr
}

#[tokio::test]
async fn decodes_json_answers() {
    let addr = fake_backend().await;
    let value = send(&reqwest::Client::new(), &format!("http://{addr}/api"), &wire::endpoints::health())
        .await
        .unwrap();
    assert_eq!(value, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn empty_body_is_null() {
    let addr = fake_backend().await;
    let value = send(&reqwest::Client::new(), &format!("http://{addr}/api/"), &wire::endpoints::sources::delete("s1"))
        .await
        .unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn error_status_keeps_first_body_line() {
    let addr = fake_backend().await;
    let err = send(&reqwest::Client::new(), &format!("http://{addr}/api"), &wire::endpoints::factcheck::result("p1"))
        .await
        .unwrap_err();
    match err {
        CliError::Api(api) => {
            assert!(api.is_not_found());
            assert_eq!(api.to_string(), "backend returned 404: Fact-check result not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_http_error() {
    let closed = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let err = send(&reqwest::Client::new(), &format!("http://{closed}/api"), &wire::endpoints::health())
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Http(_)));
}

//! CORS middleware tests against a live server.

use movies_service::http::ALLOWED_METHODS;
use movies_service::InMemoryMovieStore;

use crate::support::{start_server, ALLOWED_ORIGIN};

#[tokio::test]
async fn allowed_origin_is_echoed() {
    let base = start_server(InMemoryMovieStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/movies"))
        .header("origin", ALLOWED_ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
    assert_eq!(resp.headers()["vary"], "Origin");
}

#[tokio::test]
async fn unknown_origin_gets_no_cors_headers() {
    let base = start_server(InMemoryMovieStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/movies"))
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
    assert_eq!(resp.headers()["vary"], "Origin");
}

#[tokio::test]
async fn no_origin_is_served_without_cors_headers() {
    let base = start_server(InMemoryMovieStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/movies")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
    assert!(resp.headers().get("vary").is_none());
}

#[tokio::test]
async fn error_responses_carry_cors_headers_too() {
    let base = start_server(InMemoryMovieStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/movies/missing"))
        .header("origin", ALLOWED_ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn preflight_for_allowed_origin() {
    let base = start_server(InMemoryMovieStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/movies/abc"))
        .header("origin", ALLOWED_ORIGIN)
        .header("access-control-request-method", "PATCH")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], ALLOWED_ORIGIN);
    assert_eq!(headers["access-control-allow-methods"], ALLOWED_METHODS);
    assert_eq!(headers["access-control-allow-headers"], "content-type");
}

#[tokio::test]
async fn preflight_for_unknown_origin_has_no_grant() {
    let base = start_server(InMemoryMovieStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/movies/abc"))
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
    assert!(resp.headers().get("access-control-allow-methods").is_none());
    assert_eq!(resp.headers()["vary"], "Origin");
}

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::StatusCode;
use axum_test::TestServer;
use http::Request;
use reality_api::db::store::MemoryStore;
use tower::ServiceExt;

#[tokio::test]
async fn data_routes_return_503_before_database_is_connected() {
    let (app, _state) = common::disconnected_app();
    let server = TestServer::new(app).unwrap();

    for path in ["/premios", "/idade/X", "/maior/1", "/total", "/audiencia", "/votos/X"] {
        let resp = server.get(path).await;
        resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = resp.json();
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    server
        .post("/votar")
        .json(&serde_json::json!({ "reality": "X", "participante": "Ana" }))
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn health_is_served_while_connecting() {
    let (app, _state) = common::disconnected_app();
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/health").await;
    resp.assert_status_ok();
    let body: serde_json::Value = resp.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connecting");
}

#[tokio::test]
async fn requests_succeed_once_store_is_installed() {
    let (app, state) = common::disconnected_app();

    let req = Request::builder().uri("/total").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    assert!(state
        .store
        .install(Arc::new(MemoryStore::with_shows(common::seed_shows()))));

    let req = Request::builder().uri("/total").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn unmatched_paths_fall_back_to_static_files() {
    let (app, _state) = common::disconnected_app();
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/index.html").await;
    resp.assert_status_ok();
    assert!(resp.text().contains("Votação"));

    server
        .get("/nao-existe.html")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let (app, _state, _store) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/api-docs/openapi.json").await;
    resp.assert_status_ok();
    let doc: serde_json::Value = resp.json();
    for path in [
        "/health",
        "/premios",
        "/idade/{nome_reality}",
        "/maior/{valor}",
        "/total",
        "/audiencia",
        "/votar",
        "/votos/{reality}",
    ] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
}

mod helpers;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use helpers::{body_json, make_test_app};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok_json() {
    let app = make_test_app();

    let req = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
    assert_eq!(json["message"], "Health check passed");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = make_test_app();

    let req = Request::builder()
        .uri("/api/nope")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use clinic_api::app;
use clinic_core::models::availability::DoctorId;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::test_utils::TestContext;

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_route() {
    let app = app(TestContext::new().build_state());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "status": "ok", "service": "clinic-api" })
    );
}

#[tokio::test]
async fn test_version_route() {
    let app = app(TestContext::new().build_state());

    let response = app
        .oneshot(Request::get("/version").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["service"], "clinic-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_create_slot_route_without_doctor_header() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_create_slot().never();
    let app = app(ctx.build_state());

    let request = Request::post("/api/availability")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "slot_date": "2024-05-01",
                "start_time": "09:00:00",
                "duration_minutes": 30
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid argument"));
}

#[tokio::test]
async fn test_create_slot_route_with_unparseable_body() {
    let app = app(TestContext::new().build_state());

    let request = Request::post("/api/availability")
        .header("content-type", "application/json")
        .header("x-doctor-id", "7")
        .body(Body::from(r#"{"slot_date": "yesterday"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid request body"));
}

#[tokio::test]
async fn test_list_slots_route_with_date_filter() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_get_slots_by_doctor()
        .withf(|doctor, date| *doctor == DoctorId(7) && date.is_some())
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    let app = app(ctx.build_state());

    let response = app
        .oneshot(
            Request::get("/api/doctors/7/availability?date=2024-05-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

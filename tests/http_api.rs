use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Datelike;
use http_body_util::BodyExt;
use payments_gateway::gateways::mock::{MockBank, MockBehavior};
use payments_gateway::http::router::build_router;
use payments_gateway::repo::payments_repo::PaymentsRepo;
use payments_gateway::service::payment_service::PaymentService;
use payments_gateway::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(behavior: MockBehavior) -> Router {
    let state = AppState {
        payment_service: PaymentService::new(
            PaymentsRepo::spawn(64),
            Arc::new(MockBank::new(behavior)),
        ),
    };
    build_router(state)
}

fn payment_body() -> Value {
    json!({
        "card_number": "1234567890123456",
        "expiry_month": 12,
        "expiry_year": chrono::Utc::now().year() + 1,
        "currency": "USD",
        "amount": 1000,
        "cvv": "123"
    })
}

fn post(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/payments")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_then_get_round_trip() {
    let app = app(MockBehavior::AlwaysAuthorize);

    let resp = app.clone().oneshot(post(payment_body().to_string())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = read_json(resp).await;
    assert_eq!(created["payment_status"], "Authorized");
    assert_eq!(created["card_number_last_four"], "3456");
    assert_eq!(created["amount"], 1000);
    assert_eq!(created["currency"], "USD");
    assert!(created.get("cvv").is_none());
    assert!(created.get("card_number").is_none());

    let id = created["id"].as_str().unwrap().to_string();
    let resp = app.oneshot(get(&format!("/api/payments/{id}"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, created);
}

#[tokio::test]
async fn validation_failure_is_rejected() {
    let app = app(MockBehavior::AlwaysAuthorize);
    let mut body = payment_body();
    body["currency"] = json!("GBP");

    let resp = app.oneshot(post(body.to_string())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = read_json(resp).await;
    assert_eq!(v["payment_status"], "Rejected");
    assert_eq!(v["error_message"], "currency not supported");
}

#[tokio::test]
async fn unparseable_body_is_rejected() {
    let app = app(MockBehavior::AlwaysAuthorize);
    let resp = app.oneshot(post("{\"amount\": \"lots\"".to_string())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = read_json(resp).await;
    assert_eq!(v["payment_status"], "Rejected");
    assert_eq!(v["error_message"], "Invalid request body format");
}

#[tokio::test]
async fn bank_outage_is_bad_gateway() {
    let app = app(MockBehavior::Unavailable);
    let resp = app.oneshot(post(payment_body().to_string())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let v = read_json(resp).await;
    assert_eq!(v["payment_status"], "Failed");
    assert_eq!(v["error_message"], "Financial institution unavailable");
}

#[tokio::test]
async fn unknown_payment_is_not_found() {
    let app = app(MockBehavior::AlwaysAuthorize);

    let resp = app
        .clone()
        .oneshot(get(&format!("/api/payments/{}", uuid::Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.oneshot(get("/api/payments/not-a-uuid")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ping_answers_pong() {
    let app = app(MockBehavior::AlwaysAuthorize);
    let resp = app.oneshot(get("/ping")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, json!({"message": "pong"}));
}

#[tokio::test]
async fn null_card_number_gets_field_message() {
    let app = app(MockBehavior::AlwaysAuthorize);
    let mut body = payment_body();
    body["card_number"] = Value::Null;

    let resp = app.oneshot(post(body.to_string())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = read_json(resp).await;
    assert_eq!(v["payment_status"], "Rejected");
    assert_eq!(v["error_message"], "card_number is required");
}

use crate::http::handlers::payments;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(payments::ping))
        .route("/health", get(payments::health))
        .route("/api/payments", post(payments::create_payment))
        .route("/api/payments/:payment_id", get(payments::get_payment))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

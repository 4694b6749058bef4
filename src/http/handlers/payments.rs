use crate::domain::payment::{ErrorEnvelope, PaymentRequest, PaymentStatus};
use crate::service::payment_service::SubmitError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

pub async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(e) => {
            tracing::info!(error = %e, "unreadable payment body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorEnvelope::new(
                    "Invalid request body format",
                    PaymentStatus::Rejected,
                )),
            )
                .into_response();
        }
    };

    match state.payment_service.submit(req).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => {
            let status = match e {
                SubmitError::Rejected(_) => StatusCode::BAD_REQUEST,
                SubmitError::Failed(_) => StatusCode::BAD_GATEWAY,
                SubmitError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(ErrorEnvelope::new(e.public_message(), e.payment_status())),
            )
                .into_response()
        }
    }
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    let Ok(id) = Uuid::parse_str(&payment_id) else {
        return not_found();
    };

    match state.payment_service.fetch(id).await {
        Ok(Some(outcome)) => (StatusCode::OK, Json(outcome)).into_response(),
        Ok(None) => not_found(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::message(e.to_string())),
        )
            .into_response(),
    }
}

pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"message": "pong"})))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::message("payment not found")),
    )
        .into_response()
}

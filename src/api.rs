use crate::model::LookupOutcome;
use crate::sips::SipsService;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_derive::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

#[derive(Clone)]
pub struct AppState {
    pub sips: Arc<SipsService>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(lookup))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    debug!("Health check requested");
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

/// `POST /` with `{"cups": "..."}`. Responds with a one-element array holding
/// the scraped record.
#[instrument(skip_all)]
async fn lookup(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let cups = match payload {
        Ok(Json(body)) => match requested_cups(&body) {
            Some(cups) => cups,
            None => {
                warn!("Lookup request without a usable cups field");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "Missing required field: cups".to_string(),
                );
            }
        },
        Err(rejection) => {
            warn!("Rejected lookup body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match state.sips.lookup(&cups).await {
        Ok(LookupOutcome::Found(result)) => {
            info!("Found supply data for CUPS {}", cups);
            (StatusCode::OK, Json(vec![result])).into_response()
        }
        Ok(LookupOutcome::NotFound) => error_response(
            StatusCode::NOT_FOUND,
            format!("No data found for CUPS {}", cups),
        ),
        Err(e) => {
            error!("Lookup for CUPS {} failed: {}", cups, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn requested_cups(body: &Value) -> Option<String> {
    body.get("cups")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|cups| !cups.is_empty())
        .map(str::to_string)
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

//! HTTP endpoint for currency conversion.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::core::convert::{ConversionRequest, CurrencyConverter};
use crate::core::error::FinanceError;

/// Shared application state.
pub struct AppState {
    pub converter: CurrencyConverter,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for FinanceError {
    fn into_response(self) -> Response {
        match self {
            FinanceError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            FinanceError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            FinanceError::Upstream(msg) => {
                error!(error = %msg, "Exchange rate lookup failed");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch exchange rate",
                )
            }
        }
    }
}

async fn convert(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConversionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected conversion request body");
            return error_response(StatusCode::BAD_REQUEST, "Missing parameters");
        }
    };

    match state.converter.convert_request(&request).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/convert", post(convert))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on an already bound listener until the task is dropped.
pub async fn serve_on(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Conversion API listening on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .context("HTTP server terminated")
}

pub async fn serve(bind: &str, converter: CurrencyConverter) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    serve_on(listener, Arc::new(AppState { converter })).await
}

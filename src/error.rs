use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Location not found: {0}")]
    LocationUnresolved(String),

    /// A non-recoverable routing backend failure. `detail` carries the
    /// backend's raw payload so callers can see what the router said.
    #[error("Routing error: {message}")]
    Routing { message: String, detail: Value },

    #[error("No route found: {0}")]
    NoRouteFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Weather service error: {0}")]
    Weather(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn routing(message: impl Into<String>, detail: Value) -> Self {
        AppError::Routing {
            message: message.into(),
            detail,
        }
    }
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            AppError::LocationUnresolved(ref e) => {
                tracing::info!("Location not found: {}", e);
                (StatusCode::NOT_FOUND, "Location not found".to_string(), None)
            }
            AppError::Routing {
                ref message,
                ref detail,
            } => {
                tracing::error!(detail = %detail, "Routing error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Routing error: {}", message),
                    Some(detail.clone()),
                )
            }
            AppError::NoRouteFound(ref e) => {
                tracing::warn!("No route found: {}", e);
                (
                    StatusCode::NOT_FOUND,
                    "Could not generate a route from this location. Try another start."
                        .to_string(),
                    None,
                )
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.clone(), None),
            AppError::Geocoding(ref e) => {
                tracing::error!("Geocoding error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Geocoding service error".to_string(),
                    None,
                )
            }
            AppError::Weather(ref e) => {
                tracing::error!("Weather service error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Weather service error".to_string(),
                    None,
                )
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": message,
        });
        if let Some(detail) = detail {
            body["detail"] = detail;
        }

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

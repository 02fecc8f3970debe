use crate::config::ConfigError;
use crate::polls::{PollError, SeedError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Process-level failures for the service binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("seed error: {0}")]
    Seed(#[from] SeedError),
    #[error("poll error: {0}")]
    Poll(#[from] PollError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Seed(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Poll(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polls::StoreError;

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[test]
    fn messages_carry_the_failing_layer() {
        let err = AppError::from(SeedError::MissingQuestionText { row: 3 });
        assert_eq!(err.to_string(), "seed error: row 3: question_text is required");

        let err = AppError::from(ConfigError::InvalidPort {
            value: "http".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "configuration error: APP_PORT must be a valid u16 (got 'http')"
        );

        let err = AppError::from(axum::Error::new(std::io::Error::other("listener closed")));
        assert_eq!(err.to_string(), "server error: listener closed");
    }

    #[tokio::test]
    async fn seed_errors_map_to_bad_request_json() {
        let response = AppError::from(SeedError::MissingQuestionText { row: 7 }).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "seed error: row 7: question_text is required");
    }

    #[tokio::test]
    async fn store_and_server_errors_map_to_internal_error_json() {
        let store = AppError::from(PollError::Store(StoreError::Unavailable(
            "offline".to_string(),
        )))
        .into_response();
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(store).await["error"],
            "poll error: store unavailable: offline"
        );

        let server = AppError::from(axum::Error::new(std::io::Error::other("reset")))
            .into_response();
        assert_eq!(server.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::storage::StorageError;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Converts our `HTTPError` into a JSON response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Maps storage errors to appropriate HTTP responses.
impl From<StorageError> for HTTPError {
    fn from(e: StorageError) -> Self {
        tracing::error!("Storage error: {}", e);
        match e {
            StorageError::Disabled => {
                HTTPError::new(StatusCode::SERVICE_UNAVAILABLE, "Client storage is disabled")
            }
            other => HTTPError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Storage error: {}", other),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_storage_maps_to_503() {
        let error = HTTPError::from(StorageError::Disabled);
        assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_other_storage_errors_map_to_500() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let error = HTTPError::from(StorageError::Io(io));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = HTTPError::new(StatusCode::BAD_REQUEST, "bad path").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

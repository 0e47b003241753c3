// gateway/src/error.rs
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;
use crate::identity::IdentityError;

/// Everything a gateway operation can fail with. None of these are fatal to
/// the process; each maps to a structured JSON response.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The caller's fault: missing or malformed fields
    #[error("{0}")]
    InvalidInput(String),

    /// The backend has no record for the requested user
    #[error("User not found")]
    NotFound { details: Option<String> },

    /// Network failure, timeout, or an unparseable backend response
    #[error("Failed to reach backend")]
    BackendUnavailable { details: Option<String> },

    #[error("Failed to resolve caller identity")]
    Identity(#[from] IdentityError),
}

impl From<BackendError> for GatewayError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound { details } => Self::NotFound {
                details: non_empty(details),
            },
            BackendError::InvalidInput { details } => {
                if details.is_empty() {
                    Self::InvalidInput("Invalid input".to_string())
                } else {
                    Self::InvalidInput(details)
                }
            }
            BackendError::Unavailable { details } => Self::BackendUnavailable {
                details: non_empty(details),
            },
        }
    }
}

fn non_empty(details: String) -> Option<String> {
    if details.is_empty() {
        None
    } else {
        Some(details)
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BackendUnavailable { .. } | Self::Identity(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({ "error": self.to_string() });

        let details = match self {
            Self::NotFound { details } | Self::BackendUnavailable { details } => details.as_deref(),
            _ => None,
        };
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// JSON payload errors also come back as JSON bodies: wrong content type is
/// the caller sending something other than JSON (415), anything else is a
/// malformed body (400).
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let (status, message) = match &err {
        JsonPayloadError::ContentType => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected application/json",
        ),
        _ => (StatusCode::BAD_REQUEST, "Invalid request body"),
    };

    let response = HttpResponse::build(status).json(json!({ "error": message }));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_not_found_maps_to_404() {
        let err = GatewayError::from(BackendError::NotFound {
            details: "User not found".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_backend_unavailable_maps_to_500() {
        let err = GatewayError::from(BackendError::Unavailable {
            details: "connection refused".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to reach backend");
    }

    #[test]
    fn test_invalid_input_keeps_backend_details() {
        let err = GatewayError::from(BackendError::InvalidInput {
            details: "ID is required".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "ID is required");
    }
}

//! # Response Envelopes and Error Handling
//!
//! Mutation endpoints answer with a `{message, error, object}` envelope;
//! everything that goes wrong flows through [`ApiError`], which returns the
//! right status code with a sanitized message and keeps internal detail
//! server-side.
//!
//! ## Philosophy
//!
//! **Never expose internal errors to users.** Internal details are logged
//! through the `tracing` crate but never sent to clients.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use autocrud::responses::{self, ApiError};
//!
//! async fn create_task(body: Json<TaskCreate>) -> Result<impl IntoResponse, ApiError> {
//!     let task = insert_task(body).await.map_err(|e| {
//!         ApiError::internal("Failed to create task", Some(e.to_string()))
//!     })?;
//!     Ok(responses::created("task", Some(task)))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

/// Response envelope for mutation endpoints.
///
/// All three keys are always present; absent ones serialize as `null`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: Option<String>,
    pub error: Option<Value>,
    pub object: Option<Value>,
}

impl MessageBody {
    #[must_use]
    pub fn success(message: impl Into<String>, object: Option<Value>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
            object,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>, error: Value) -> Self {
        Self {
            message: Some(message.into()),
            error: Some(error),
            object: None,
        }
    }
}

/// 201 envelope for a successful create.
#[must_use]
pub fn created(resource: &str, object: Option<Value>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::CREATED,
        Json(MessageBody::success(
            format!("{resource} created successfully"),
            object,
        )),
    )
}

/// 200 envelope for a successful update or restore.
#[must_use]
pub fn updated(resource: &str, object: Option<Value>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody::success(
            format!("{resource} updated successfully"),
            object,
        )),
    )
}

/// 200 envelope for a delete, hard or soft.
#[must_use]
pub fn deleted(resource: &str, object: Option<Value>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody::success(
            format!("{resource} deleted successfully"),
            object,
        )),
    )
}

/// 400 envelope carrying validation errors.
#[must_use]
pub fn validation_failed(resource: &str, errors: Value) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageBody::failure(
            format!("{resource} could not be saved"),
            errors,
        )),
    )
}

/// API error type with automatic logging and sanitized responses.
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found - Resource doesn't exist
    NotFound {
        /// Resource type (e.g. "task")
        resource: String,
        /// Optional ID that wasn't found
        id: Option<String>,
    },

    /// 400 Bad Request - Invalid input from user
    BadRequest {
        /// User-facing error message
        message: String,
    },

    /// 400 Bad Request - Validation failed
    ValidationFailed {
        /// User-facing validation errors
        errors: Vec<String>,
    },

    /// 500 Internal Server Error (details logged, not exposed)
    Internal {
        /// User-facing generic message
        message: String,
        /// Internal error details (logged, not sent to user)
        internal: Option<String>,
    },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the user-facing error message (sanitized)
    fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => id.as_ref().map_or_else(
                || format!("{resource} not found"),
                |id| format!("{resource} with ID '{id}' not found"),
            ),
            Self::BadRequest { message } => message.clone(),
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
            Self::Internal { message, .. } => message.clone(),
        }
    }

    /// Log internal error details (not sent to user)
    fn log_internal(&self) {
        match self {
            Self::Internal {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "Internal error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let response = match &self {
            Self::ValidationFailed { errors } => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(response)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

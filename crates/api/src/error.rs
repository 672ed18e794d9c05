use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use classhopper_core::error::CoreError;
use classhopper_db::ingestion::IngestError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{success: false, error, message, code}`; internal
/// details are logged and never returned.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Core(core) => AppError::Core(core),
            IngestError::Database(db) => AppError::Database(db),
        }
    }
}

/// Fields of a rendered error response.
struct ErrorBody {
    status: StatusCode,
    code: &'static str,
    error: &'static str,
    message: String,
    field: Option<String>,
}

impl ErrorBody {
    fn new(status: StatusCode, code: &'static str, error: &'static str, message: String) -> Self {
        Self {
            status,
            code,
            error,
            message,
            field: None,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal error",
            "An internal error occurred".to_string(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => ErrorBody::new(
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                "Bad request",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorBody::internal()
            }
        };

        let mut json = json!({
            "success": false,
            "error": body.error,
            "message": body.message,
            "code": body.code,
        });
        if let Some(field) = body.field {
            json["field"] = serde_json::Value::String(field);
        }

        (body.status, axum::Json(json)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> ErrorBody {
    match core {
        CoreError::NotFound { entity, id } => ErrorBody::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Not found",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation { field, message } => ErrorBody {
            field: Some(field.clone()),
            ..ErrorBody::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed",
                format!("{field}: {message}"),
            )
        },
        CoreError::InvalidState(msg) => ErrorBody::new(
            StatusCode::CONFLICT,
            "INVALID_STATE",
            "Invalid state",
            msg.clone(),
        ),
        CoreError::Conflict(msg) => {
            ErrorBody::new(StatusCode::CONFLICT, "CONFLICT", "Conflict", msg.clone())
        }
        CoreError::Unauthorized(msg) => ErrorBody::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Unauthorized",
            msg.clone(),
        ),
        CoreError::Forbidden(msg) => ErrorBody::new(
            StatusCode::FORBIDDEN,
            "PERMISSION_DENIED",
            "Permission denied",
            msg.clone(),
        ),
        CoreError::RateLimited(msg) => ErrorBody::new(
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMITED",
            "Too many requests",
            msg.clone(),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            ErrorBody::internal()
        }
    }
}

/// Classify a sqlx error.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorBody {
    match err {
        sqlx::Error::RowNotFound => ErrorBody::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Not found",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return ErrorBody::new(
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        "Conflict",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            ErrorBody::internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            ErrorBody::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_names_field() {
        let (status, body) =
            render(CoreError::validation("phone", "does not match").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field"], "phone");
        assert_eq!(body["message"], "phone: does not match");
    }

    #[tokio::test]
    async fn statuses_follow_taxonomy() {
        let cases = [
            (CoreError::InvalidState("x".into()), StatusCode::CONFLICT),
            (CoreError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (CoreError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (CoreError::RateLimited("x".into()), StatusCode::TOO_MANY_REQUESTS),
            (CoreError::NotFound { entity: "Submission", id: 3 }, StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            let (status, body) = render(err.into()).await;
            assert_eq!(status, expected);
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn internal_detail_is_hidden() {
        let (status, body) = render(AppError::InternalError("pool exhausted".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal error occurred");
        assert!(!body.to_string().contains("pool exhausted"));
    }
}

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value as JsonValue};

use crate::models::application::ApplicationStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Application of student {student_id} to proposal {proposal_id} already exists")]
    DuplicateApplication { student_id: i32, proposal_id: i32 },

    #[error("This application has already been {}", status_word(.status))]
    AlreadyDecided { id: i32, status: ApplicationStatus },

    #[error("Proposal {0} is not open for applications")]
    ProposalClosed(i32),

    #[error("Expected exactly one row: {0}")]
    Ambiguous(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn status_word(status: &ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Accepted => "accepted",
        ApplicationStatus::Rejected => "rejected",
        ApplicationStatus::Pending => "left pending",
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated(_) | Error::Forbidden(_) | Error::Token(_) => {
                StatusCode::UNAUTHORIZED
            }
            Error::Validation(_) | Error::Payload(_) | Error::InvalidArgument(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_)
            | Error::DuplicateApplication { .. }
            | Error::AlreadyDecided { .. }
            | Error::ProposalClosed(_) => StatusCode::BAD_REQUEST,
            Error::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Config(_) | Error::Ambiguous(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn field_problems(errors: &validator::ValidationErrors) -> Vec<JsonValue> {
    let mut problems: Vec<JsonValue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                json!({
                    "field": field,
                    "code": e.code.to_string(),
                    "message": e.message.as_ref().map(|m| m.to_string()),
                })
            })
        })
        .collect();
    problems.sort_by(|a, b| a["field"].as_str().cmp(&b["field"].as_str()));
    problems
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = match &self {
            Error::Validation(errs) => json!({
                "error": "Invalid request payload",
                "errors": field_problems(errs),
            }),
            Error::Token(_) => json!({ "error": "Invalid or expired token" }),
            Error::Database(err) => {
                tracing::error!(error = %err, "database failure");
                json!({ "error": "Database error, please retry later" })
            }
            Error::Config(_) | Error::Ambiguous(_) | Error::Internal(_) => {
                tracing::error!(error = %self, "internal failure");
                json!({ "error": "An unexpected error occurred" })
            }
            Error::Unauthenticated(msg) | Error::Forbidden(msg) => json!({ "error": msg }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => Error::Conflict(format!(
                "Duplicate value violates {}",
                db.constraint().unwrap_or("a uniqueness constraint")
            )),
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => Error::NotFound(
                "Referenced entity does not exist".to_string(),
            ),
            other => Error::Database(other),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Payload(rejection.body_text())
    }
}

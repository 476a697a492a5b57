//! RFC 9457 Problem Details responses and the domain-error mapping.
//!
//! Validation and permission failures surface with their detail; database
//! and internal failures are logged server-side and the client receives a
//! generic message only.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::domain::error::DomainError;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

pub type ApiResult<T> = Result<T, Problem>;

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

/// RFC 9457 Problem Details for HTTP APIs.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[must_use]
pub struct Problem {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The HTTP status code for this occurrence of the problem.
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// A human-readable explanation specific to this occurrence.
    pub detail: String,
    /// Optional trace id useful for correlating server logs.
    pub trace_id: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            trace_id: current_trace_id(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "authentication required",
        )
    }
}

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status;
        (
            status,
            [(http::header::CONTENT_TYPE, APPLICATION_PROBLEM_JSON)],
            Json(self),
        )
            .into_response()
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Unauthenticated => Problem::unauthorized(),
            DomainError::PermissionDenied(msg) => {
                Problem::new(StatusCode::FORBIDDEN, "Forbidden", msg)
            }
            DomainError::NotFound(what) => Problem::new(
                StatusCode::NOT_FOUND,
                "Not Found",
                format!("{what} not found or access denied"),
            ),
            DomainError::Validation { field, message } => Problem::new(
                StatusCode::BAD_REQUEST,
                "Bad Request",
                format!("validation error on '{field}': {message}"),
            ),
            DomainError::Database(err) => {
                tracing::error!(error = ?err, "database error");
                internal_problem()
            }
            DomainError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                internal_problem()
            }
        }
    }
}

fn internal_problem() -> Problem {
    Problem::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        "an internal error occurred",
    )
}

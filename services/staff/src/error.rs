use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use roster_core::error::{FieldErrors, error_response};

/// Field key used for payload-level problems that are not tied to one field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Staff service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum StaffServiceError {
    #[error("address not found")]
    AddressNotFound,
    #[error("manager not found")]
    ManagerNotFound,
    #[error("intern not found")]
    InternNotFound,
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl StaffServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddressNotFound => "ADDRESS_NOT_FOUND",
            Self::ManagerNotFound => "MANAGER_NOT_FOUND",
            Self::InternNotFound => "INTERN_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Shorthand for a validation failure on a single field.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }
}

impl From<FieldErrors> for StaffServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for StaffServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid(NON_FIELD_ERRORS, rejection.body_text())
    }
}

impl From<QueryRejection> for StaffServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid(NON_FIELD_ERRORS, rejection.body_text())
    }
}

impl IntoResponse for StaffServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::AddressNotFound | Self::ManagerNotFound | Self::InternNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let fields = match &self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        };
        error_response(status, self.kind(), &self.to_string(), fields)
    }
}

/*
 * Responsibility
 * - the HTTP-facing AppError
 * - IntoResponse (status + `{"error_code": ...}` body; 401 carries no body)
 * - conversions from auth / access / repo errors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::authz::DenyReason;
use crate::services::certificates::AccessError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_code: &'static str,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid course id")]
    InvalidCourseId,
    #[error("insufficient scope")]
    InsufficientScope,
    #[error("forbidden")]
    Forbidden,
    #[error("no certificate for user")]
    NoCertificate,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidCourseId => StatusCode::NOT_FOUND,
            AppError::InsufficientScope | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NoCertificate => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            AppError::Unauthorized => None,
            AppError::InvalidCourseId => Some("course_id_not_valid"),
            AppError::InsufficientScope => Some(DenyReason::InsufficientScope.error_code()),
            AppError::Forbidden => Some(DenyReason::Forbidden.error_code()),
            AppError::NoCertificate => Some("no_certificate_for_user"),
            AppError::Internal => Some("internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.error_code() {
            Some(error_code) => (status, Json(ErrorResponse { error_code })).into_response(),
            None => status.into_response(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredentials
            | AuthError::InvalidCredentials(_)
            | AuthError::UnknownUser => AppError::Unauthorized,
            AuthError::Backend(_) => AppError::Internal,
        }
    }
}

impl From<AccessError> for AppError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Denied(DenyReason::InsufficientScope) => AppError::InsufficientScope,
            AccessError::Denied(DenyReason::Forbidden) => AppError::Forbidden,
            AccessError::InvalidCourseId(_) => AppError::InvalidCourseId,
            AccessError::NotFound => AppError::NoCertificate,
            AccessError::Storage(err) => {
                tracing::error!(error = ?err, "certificate lookup failed");
                AppError::Internal
            }
        }
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use group_service_domain::DomainError;
use thiserror::Error;
use tracing::{debug, warn};

use crate::dto::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(e) => match e {
                DomainError::TokenMissing
                | DomainError::ClaimMissing { .. }
                | DomainError::TokenVerificationFailed { .. } => StatusCode::UNAUTHORIZED,
                DomainError::Unauthorized { .. } => StatusCode::FORBIDDEN,
                DomainError::ValidationFailed { .. }
                | DomainError::MalformedBody { .. }
                | DomainError::MissingParameter { .. }
                | DomainError::RealmNotFound { .. } => StatusCode::BAD_REQUEST,
                DomainError::GroupNotFound { .. }
                | DomainError::GroupNotExist { .. }
                | DomainError::UserNotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::ProviderError { .. } => StatusCode::BAD_GATEWAY,
                DomainError::DependencyUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let AppError::Domain(error) = self;

        if status.is_server_error() {
            warn!(%status, "Request failed: {}", error);
        } else {
            debug!(%status, "Request rejected: {}", error);
        }

        let body = Json(ApiResponse::<()>::error(error.messages()));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

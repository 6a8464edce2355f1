use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pricing::{CouponError, TariffError};
use crate::utils::geo::GeoError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Config(msg) | AppError::Internal(msg) => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<GeoError> for AppError {
    fn from(err: GeoError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<TariffError> for AppError {
    fn from(err: TariffError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<CouponError> for AppError {
    fn from(err: CouponError) -> Self {
        match err {
            CouponError::NotFound => AppError::NotFound(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_domain_error_conversion() {
        assert!(matches!(
            AppError::from(CouponError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(CouponError::Exhausted),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(GeoError::InvalidLatitude(91.0)),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(TariffError::InvalidRoundingUnit(0)),
            AppError::Config(_)
        ));
    }
}

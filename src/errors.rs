use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::application::cart_engine::CartError;
use crate::application::checkout_service::CheckoutError;
use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ValidationFailed(msg) => AppError::BadRequest(msg),
            DomainError::NotFound(what) => AppError::NotFound(what),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::RemoteUnavailable(msg) => AppError::Unavailable(msg),
            DomainError::Unauthorized => AppError::Unauthorized,
        }
    }
}

/// Keeps the status of the underlying failure but reports the cart
/// operation's fixed message.
impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        let message = e.to_string();
        match e.source {
            DomainError::ValidationFailed(_) => AppError::BadRequest(message),
            DomainError::NotFound(_) => AppError::NotFound(message),
            DomainError::Conflict(_) => AppError::Conflict(message),
            DomainError::RemoteUnavailable(_) => AppError::Unavailable(message),
            DomainError::Unauthorized => AppError::Unauthorized,
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::Domain(e) => e.into(),
            CheckoutError::Cart(e) => e.into(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unavailable(detail) => {
                log::warn!("remote store unavailable: {}", detail);
                "Service temporarily unavailable".to_string()
            }
            AppError::Internal(detail) => {
                log::error!("internal error: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cart_engine::CartOp;
    use actix_web::ResponseError;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("product".into()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_display() {
        assert_eq!(
            AppError::NotFound("cart entry".into()).to_string(),
            "Not found: cart entry"
        );
    }

    #[test]
    fn domain_kinds_map_to_statuses() {
        let cases = [
            (DomainError::ValidationFailed("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                DomainError::RemoteUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];
        for (domain, status) in cases {
            assert_eq!(AppError::from(domain).status_code(), status);
        }
    }

    #[test]
    fn cart_error_keeps_status_and_operation_message() {
        let err: AppError = CartError {
            op: CartOp::Add,
            source: DomainError::Conflict("only 2 in stock".into()),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.to_string().starts_with(CartOp::Add.failure_message()));
    }

    #[test]
    fn checkout_error_unwraps_domain_error() {
        let err: AppError =
            CheckoutError::Domain(DomainError::ValidationFailed("card".into())).into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}

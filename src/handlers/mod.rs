pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod notifications;

use std::str::FromStr;

use actix_web::http::header;
use actix_web::HttpRequest;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Parse a decimal price sent as a string, e.g. "9.99".
pub(crate) fn parse_price(raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", raw, e)))
}

pub(crate) fn bearer_token(req: &HttpRequest) -> Option<Uuid> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

/// Reject the request unless it carries a live admin session token.
pub(crate) fn require_admin(req: &HttpRequest, state: &AppState) -> Result<Uuid, AppError> {
    match bearer_token(req) {
        Some(token) if state.auth.is_admin(token) => Ok(token),
        _ => Err(AppError::Unauthorized),
    }
}

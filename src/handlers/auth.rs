use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::auth_service::Registration;
use crate::domain::user::{ClientProfile, ProfilePatch};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyRequest {
    pub email: String,
    /// The 6-digit code sent by email.
    pub code: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResendRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

impl From<ClientProfile> for ProfileResponse {
    fn from(p: ClientProfile) -> Self {
        ProfileResponse {
            id: p.id,
            name: p.name,
            email: p.email,
            address: p.address,
            city: p.city,
            phone: p.phone,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /auth/register
///
/// Sends a verification code. The account exists only after `/auth/verify`.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 202, description = "Verification code sent"),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "auth"
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    state
        .auth
        .register(Registration {
            name: body.name,
            email: body.email,
            password: body.password,
            address: body.address,
            city: body.city,
            phone: body.phone,
        })
        .await?;
    state.notifications.info("Check your email for the verification code");
    Ok(HttpResponse::Accepted().finish())
}

/// POST /auth/verify
#[utoipa::path(
    post,
    path = "/auth/verify",
    request_body = VerifyRequest,
    responses(
        (status = 201, description = "Account created", body = ProfileResponse),
        (status = 400, description = "Code does not match"),
        (status = 404, description = "No pending registration"),
    ),
    tag = "auth"
)]
pub async fn verify(
    state: web::Data<AppState>,
    body: web::Json<VerifyRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = state.auth.verify(&body.email, &body.code).await?;
    state.notifications.success("Account verified");
    Ok(HttpResponse::Created().json(ProfileResponse::from(profile)))
}

/// POST /auth/resend
#[utoipa::path(
    post,
    path = "/auth/resend",
    request_body = ResendRequest,
    responses(
        (status = 202, description = "New code sent"),
        (status = 404, description = "No pending registration"),
    ),
    tag = "auth"
)]
pub async fn resend(
    state: web::Data<AppState>,
    body: web::Json<ResendRequest>,
) -> Result<HttpResponse, AppError> {
    state.auth.resend_code(&body.email).await?;
    Ok(HttpResponse::Accepted().finish())
}

/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = ProfileResponse),
        (status = 400, description = "Email not verified yet"),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "auth"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = state.auth.login(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

/// PATCH /users/{id}
///
/// Only the fields present in the body change.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Client UUID"),
    ),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Empty name"),
        (status = 404, description = "Client not found"),
    ),
    tag = "auth"
)]
pub async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let profile = state
        .auth
        .update_profile(
            path.into_inner(),
            ProfilePatch {
                name: body.name,
                address: body.address,
                city: body.city,
                phone: body.phone,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::catalog::{CategoryResponse, ProductResponse};
use super::{parse_price, require_admin};
use crate::domain::catalog::{CategoryInput, CategoryPatch, ProductInput, ProductPatch};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    /// Send as `Authorization: Bearer <token>` on admin routes.
    pub token: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub stock: i32,
    #[serde(default)]
    pub image_url: String,
    pub category_id: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

// ── Session ──────────────────────────────────────────────────────────────────

/// POST /admin/login
#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin session opened", body = AdminLoginResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "admin"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let token = state.auth.admin_login(&body.email, &body.password)?;
    Ok(HttpResponse::Ok().json(AdminLoginResponse { token }))
}

/// POST /admin/logout
#[utoipa::path(
    post,
    path = "/admin/logout",
    responses(
        (status = 204, description = "Admin session closed"),
        (status = 401, description = "Missing or unknown token"),
    ),
    tag = "admin"
)]
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = require_admin(&req, &state)?;
    state.auth.admin_logout(token);
    Ok(HttpResponse::NoContent().finish())
}

// ── Products ─────────────────────────────────────────────────────────────────

/// POST /admin/products
#[utoipa::path(
    post,
    path = "/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 401, description = "Not an admin"),
    ),
    tag = "admin"
)]
pub async fn create_product(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req, &state)?;
    let body = body.into_inner();
    let input = ProductInput {
        price: parse_price(&body.price)?,
        name: body.name,
        description: body.description,
        stock: body.stock,
        image_url: body.image_url,
        category_id: body.category_id,
    };
    let product = state.catalog.create_product(input).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(&product)))
}

/// PATCH /admin/products/{id}
#[utoipa::path(
    patch,
    path = "/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Product not found"),
    ),
    tag = "admin"
)]
pub async fn update_product(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req, &state)?;
    let body = body.into_inner();
    let patch = ProductPatch {
        price: body.price.as_deref().map(parse_price).transpose()?,
        name: body.name,
        description: body.description,
        stock: body.stock,
        image_url: body.image_url,
        category_id: body.category_id,
    };
    let product = state.catalog.update_product(path.into_inner(), patch).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(&product)))
}

/// DELETE /admin/products/{id}
#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Product not found"),
    ),
    tag = "admin"
)]
pub async fn delete_product(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req, &state)?;
    state.catalog.delete_product(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ── Categories ───────────────────────────────────────────────────────────────

/// POST /admin/categories
#[utoipa::path(
    post,
    path = "/admin/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid category data"),
        (status = 401, description = "Not an admin"),
    ),
    tag = "admin"
)]
pub async fn create_category(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req, &state)?;
    let body = body.into_inner();
    let category = state
        .catalog
        .create_category(CategoryInput {
            name: body.name,
            description: body.description,
            image_url: body.image_url,
        })
        .await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(&category)))
}

/// PATCH /admin/categories/{id}
#[utoipa::path(
    patch,
    path = "/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category UUID"),
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Category not found"),
    ),
    tag = "admin"
)]
pub async fn update_category(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req, &state)?;
    let body = body.into_inner();
    let category = state
        .catalog
        .update_category(
            path.into_inner(),
            CategoryPatch {
                name: body.name,
                description: body.description,
                image_url: body.image_url,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(&category)))
}

/// DELETE /admin/categories/{id}
///
/// Products in the category are left in place.
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category UUID"),
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Category not found"),
    ),
    tag = "admin"
)]
pub async fn delete_category(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req, &state)?;
    state.catalog.delete_category(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::pagination::Paginator;
use crate::domain::catalog::{Category, Product, ProductFilter};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Decimal price as a string, e.g. "25.99"
    pub price: String,
    pub stock: i32,
    pub image_url: String,
    pub category_id: Uuid,
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price.to_string(),
            stock: p.stock,
            image_url: p.image_url.clone(),
            category_id: p.category_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl From<&Category> for CategoryResponse {
    fn from(c: &Category) -> Self {
        CategoryResponse {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            image_url: c.image_url.clone(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// Case-insensitive match against name or description.
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    /// Page number (1-based). Out-of-range pages fall back to page 1.
    pub page: Option<usize>,
    /// Items per page. Defaults to the configured page size.
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPageResponse {
    pub items: Vec<ProductResponse>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    /// The category selected through `category_id`, when it exists.
    pub category: Option<CategoryResponse>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /products
///
/// Filters the catalog and returns one page of the result.
#[utoipa::path(
    get,
    path = "/products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "One page of matching products", body = ProductPageResponse),
        (status = 503, description = "Catalog store unavailable"),
    ),
    tag = "catalog"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ListProductsParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let catalog = state.catalog.load().await?;
    let filter = ProductFilter {
        search: params.search,
        category_id: params.category_id,
    };
    let category = filter
        .category_id
        .and_then(|id| catalog.category(id))
        .map(CategoryResponse::from);

    let mut pages = Paginator::new(
        catalog.filter_products(&filter),
        params.page_size.unwrap_or(state.page_size),
    );
    pages.go_to(params.page.unwrap_or(1));

    Ok(HttpResponse::Ok().json(ProductPageResponse {
        items: pages.page_items().iter().map(ProductResponse::from).collect(),
        page: pages.current_page(),
        page_size: pages.page_size(),
        total_items: pages.total_items(),
        total_pages: pages.total_pages(),
        has_next: pages.has_next(),
        has_previous: pages.has_previous(),
        category,
    }))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product = state.catalog.product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(&product)))
}

/// GET /categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryResponse]),
        (status = 503, description = "Catalog store unavailable"),
    ),
    tag = "catalog"
)]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = state.catalog.categories().await?;
    let body: Vec<CategoryResponse> = categories.iter().map(CategoryResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

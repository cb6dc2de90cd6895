use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::cart_engine::{CartEngine, CartError};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub product_id: Uuid,
    /// Defaults to 1.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    /// Zero or less removes the entry.
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub image_url: String,
    pub unit_price: String,
    pub quantity: i32,
    pub stock: i32,
    pub subtotal: String,
    /// Whether one more unit fits within stock.
    pub can_increment: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub user_id: Uuid,
    pub items: Vec<CartItemResponse>,
    pub total: String,
    pub item_count: i64,
}

impl From<&CartEngine> for CartResponse {
    fn from(cart: &CartEngine) -> Self {
        CartResponse {
            user_id: cart.user_id(),
            items: cart
                .items()
                .iter()
                .map(|item| CartItemResponse {
                    id: item.entry.id,
                    product_id: item.product.id,
                    name: item.product.name.clone(),
                    image_url: item.product.image_url.clone(),
                    unit_price: item.product.price.to_string(),
                    quantity: item.entry.quantity,
                    stock: item.product.stock,
                    subtotal: item.subtotal().to_string(),
                    can_increment: item.can_increment(),
                })
                .collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingConfirmationResponse {
    /// Invoke its "Confirm" action to go ahead.
    pub notification_id: Uuid,
}

/// Surface a failed cart operation to the user before reporting it.
fn report(state: &AppState, e: CartError) -> AppError {
    state.notifications.error(e.op.failure_message());
    e.into()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /cart/{user_id}
#[utoipa::path(
    get,
    path = "/cart/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Cart owner"),
    ),
    responses(
        (status = 200, description = "Current cart contents", body = CartResponse),
        (status = 503, description = "Cart store unavailable"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let cart = state
        .open_cart(path.into_inner())
        .await
        .map_err(|e| report(&state, e))?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// POST /cart/{user_id}/items
///
/// Adds to the entry for the product if one exists.
#[utoipa::path(
    post,
    path = "/cart/{user_id}/items",
    params(
        ("user_id" = Uuid, Path, description = "Cart owner"),
    ),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Product added", body = CartResponse),
        (status = 400, description = "Quantity below 1"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Not enough stock"),
    ),
    tag = "cart"
)]
pub async fn add_item(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AddItemRequest>,
) -> Result<HttpResponse, AppError> {
    let mut cart = state.cart(path.into_inner());
    cart.add(body.product_id, body.quantity)
        .await
        .map_err(|e| report(&state, e))?;
    state.notifications.success("Product added to the cart");
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// PATCH /cart/{user_id}/items/{entry_id}
#[utoipa::path(
    patch,
    path = "/cart/{user_id}/items/{entry_id}",
    params(
        ("user_id" = Uuid, Path, description = "Cart owner"),
        ("entry_id" = Uuid, Path, description = "Cart entry"),
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated", body = CartResponse),
        (status = 404, description = "Entry not in this cart"),
        (status = 409, description = "Not enough stock"),
    ),
    tag = "cart"
)]
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<UpdateQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let (user_id, entry_id) = path.into_inner();
    let mut cart = state.cart(user_id);
    cart.update_quantity(entry_id, body.quantity)
        .await
        .map_err(|e| report(&state, e))?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// DELETE /cart/{user_id}/items/{entry_id}
#[utoipa::path(
    delete,
    path = "/cart/{user_id}/items/{entry_id}",
    params(
        ("user_id" = Uuid, Path, description = "Cart owner"),
        ("entry_id" = Uuid, Path, description = "Cart entry"),
    ),
    responses(
        (status = 200, description = "Entry removed", body = CartResponse),
        (status = 404, description = "Entry belongs to another cart"),
    ),
    tag = "cart"
)]
pub async fn remove_item(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (user_id, entry_id) = path.into_inner();
    let mut cart = state.cart(user_id);
    cart.remove(entry_id)
        .await
        .map_err(|e| report(&state, e))?;
    state.notifications.info("Product removed from the cart");
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// POST /cart/{user_id}/clear
///
/// Asks for confirmation first. The cart is emptied only when the returned
/// notification's "Confirm" action is invoked.
#[utoipa::path(
    post,
    path = "/cart/{user_id}/clear",
    params(
        ("user_id" = Uuid, Path, description = "Cart owner"),
    ),
    responses(
        (status = 202, description = "Confirmation requested", body = PendingConfirmationResponse),
    ),
    tag = "cart"
)]
pub async fn clear_cart(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let cart = state.cart(path.into_inner());
    let queue = state.notifications.clone();
    let notification_id = state.notifications.confirm(
        "Remove every product from the cart?",
        move || {
            tokio::spawn(async move {
                let mut cart = cart;
                match cart.clear().await {
                    Ok(()) => {
                        queue.success("Cart emptied");
                    }
                    Err(e) => {
                        queue.error(e.op.failure_message());
                    }
                }
            });
        },
        None,
    );
    Ok(HttpResponse::Accepted().json(PendingConfirmationResponse { notification_id }))
}

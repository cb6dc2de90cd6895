use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::checkout::{CheckoutSession, PaymentDetails, ShippingDetails};
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ShippingDto {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
}

impl From<&ShippingDetails> for ShippingDto {
    fn from(s: &ShippingDetails) -> Self {
        ShippingDto {
            name: s.name.clone(),
            address: s.address.clone(),
            city: s.city.clone(),
            phone: s.phone.clone(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// Any formatting; only the first 16 digits are kept.
    pub card_number: String,
    /// MM/YY, separators optional.
    pub expiry: String,
    pub cvv: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub user_id: Uuid,
    /// One of `shipping`, `payment`, `confirmation`.
    pub step: String,
    pub processing: bool,
    pub shipping: ShippingDto,
    /// Last four card digits once payment data has been accepted.
    pub card_last4: Option<String>,
}

impl CheckoutResponse {
    fn new(user_id: Uuid, session: &CheckoutSession) -> Self {
        let digits: String = session
            .payment()
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let card_last4 = (digits.len() >= 4).then(|| digits[digits.len() - 4..].to_string());
        CheckoutResponse {
            user_id,
            step: session.step().as_str().to_string(),
            processing: session.is_processing(),
            shipping: ShippingDto::from(session.shipping()),
            card_last4,
        }
    }
}

fn no_session(user_id: Uuid) -> AppError {
    AppError::NotFound(format!("checkout for user {user_id}"))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /checkout/{user_id}
///
/// Opens a checkout for the user's current cart, replacing any previous one
/// unless its payment is still being processed. Shipping data is prefilled
/// from the client profile when there is one.
#[utoipa::path(
    post,
    path = "/checkout/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Buyer"),
    ),
    responses(
        (status = 201, description = "Checkout started", body = CheckoutResponse),
        (status = 400, description = "The cart is empty"),
        (status = 409, description = "Payment in progress"),
    ),
    tag = "checkout"
)]
pub async fn start(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let cart = state.open_cart(user_id).await?;
    let mut session = state.checkout.start(&cart)?;
    match state.auth.profile(user_id).await {
        Ok(profile) => session.prefill(&profile),
        Err(DomainError::NotFound(_)) => {}
        Err(e) => log::warn!("could not prefill checkout for {}: {}", user_id, e),
    }

    let body = CheckoutResponse::new(user_id, &session);
    let mut sessions = state.sessions.lock().await;
    if sessions.get(&user_id).is_some_and(|s| s.is_processing()) {
        return Err(AppError::Conflict("payment is being processed".into()));
    }
    sessions.insert(user_id, session);
    Ok(HttpResponse::Created().json(body))
}

/// GET /checkout/{user_id}
#[utoipa::path(
    get,
    path = "/checkout/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Buyer"),
    ),
    responses(
        (status = 200, description = "Current checkout", body = CheckoutResponse),
        (status = 404, description = "No checkout in progress"),
    ),
    tag = "checkout"
)]
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let sessions = state.sessions.lock().await;
    let session = sessions.get(&user_id).ok_or_else(|| no_session(user_id))?;
    Ok(HttpResponse::Ok().json(CheckoutResponse::new(user_id, session)))
}

/// POST /checkout/{user_id}/shipping
#[utoipa::path(
    post,
    path = "/checkout/{user_id}/shipping",
    params(
        ("user_id" = Uuid, Path, description = "Buyer"),
    ),
    request_body = ShippingDto,
    responses(
        (status = 200, description = "Moved on to payment", body = CheckoutResponse),
        (status = 400, description = "A shipping field is empty"),
        (status = 404, description = "No checkout in progress"),
        (status = 409, description = "Checkout is not at the shipping step"),
    ),
    tag = "checkout"
)]
pub async fn submit_shipping(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ShippingDto>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let body = body.into_inner();
    let mut sessions = state.sessions.lock().await;
    let session = sessions
        .get_mut(&user_id)
        .ok_or_else(|| no_session(user_id))?;
    state.checkout.submit_shipping(
        session,
        ShippingDetails {
            name: body.name,
            address: body.address,
            city: body.city,
            phone: body.phone,
        },
    )?;
    Ok(HttpResponse::Ok().json(CheckoutResponse::new(user_id, session)))
}

/// POST /checkout/{user_id}/back
///
/// Returns to shipping from payment. Ignored anywhere else.
#[utoipa::path(
    post,
    path = "/checkout/{user_id}/back",
    params(
        ("user_id" = Uuid, Path, description = "Buyer"),
    ),
    responses(
        (status = 200, description = "Current checkout", body = CheckoutResponse),
        (status = 404, description = "No checkout in progress"),
    ),
    tag = "checkout"
)]
pub async fn back(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let mut sessions = state.sessions.lock().await;
    let session = sessions
        .get_mut(&user_id)
        .ok_or_else(|| no_session(user_id))?;
    session.back();
    Ok(HttpResponse::Ok().json(CheckoutResponse::new(user_id, session)))
}

/// POST /checkout/{user_id}/payment
///
/// Validates the card, waits out the simulated gateway, empties the cart and
/// confirms the order.
#[utoipa::path(
    post,
    path = "/checkout/{user_id}/payment",
    params(
        ("user_id" = Uuid, Path, description = "Buyer"),
    ),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Order confirmed", body = CheckoutResponse),
        (status = 400, description = "Card data incomplete"),
        (status = 404, description = "No checkout in progress"),
        (status = 409, description = "Checkout is not at the payment step"),
        (status = 503, description = "Cart could not be emptied"),
    ),
    tag = "checkout"
)]
pub async fn pay(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let details = PaymentDetails::from_input(&body.card_number, &body.expiry, &body.cvv);

    // Mark the stored session as processing so concurrent calls are refused,
    // then run the slow part without holding the lock.
    let mut session = {
        let mut sessions = state.sessions.lock().await;
        let session = sessions
            .get_mut(&user_id)
            .ok_or_else(|| no_session(user_id))?;
        state.checkout.begin_payment(session, details)?;
        session.clone()
    };

    let result = match state.open_cart(user_id).await {
        Ok(mut cart) => state
            .checkout
            .process_payment(&mut session, &mut cart)
            .await
            .map_err(AppError::from),
        Err(e) => {
            session.abort_processing();
            state.notifications.error(e.op.failure_message());
            Err(e.into())
        }
    };

    let body = CheckoutResponse::new(user_id, &session);
    state.sessions.lock().await.insert(user_id, session);
    result?;
    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /checkout/{user_id}
#[utoipa::path(
    delete,
    path = "/checkout/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Buyer"),
    ),
    responses(
        (status = 204, description = "Checkout discarded"),
        (status = 404, description = "No checkout in progress"),
        (status = 409, description = "Payment is being processed"),
    ),
    tag = "checkout"
)]
pub async fn discard(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let mut sessions = state.sessions.lock().await;
    match sessions.get(&user_id) {
        None => Err(no_session(user_id)),
        Some(s) if s.is_processing() => Err(AppError::Conflict(
            "payment is being processed and cannot be cancelled".into(),
        )),
        Some(_) => {
            sessions.remove(&user_id);
            Ok(HttpResponse::NoContent().finish())
        }
    }
}

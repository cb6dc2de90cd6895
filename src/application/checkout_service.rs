use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use super::cart_engine::{CartEngine, CartError};
use super::notifications::NotificationQueue;
use crate::domain::checkout::{CheckoutSession, PaymentDetails, ShippingDetails};
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;

pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Drives a [`CheckoutSession`] against a user's cart and reports outcomes
/// through the notification queue.
///
/// Payment is simulated: a fixed delay stands in for a gateway and there is
/// no way to cancel once it has started.
pub struct CheckoutService {
    products: Arc<dyn ProductRepository>,
    notifications: NotificationQueue,
    payment_delay: Duration,
    decrement_stock: bool,
}

impl CheckoutService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        notifications: NotificationQueue,
        payment_delay: Duration,
        decrement_stock: bool,
    ) -> Self {
        Self {
            products,
            notifications,
            payment_delay,
            decrement_stock,
        }
    }

    pub fn start(&self, cart: &CartEngine) -> Result<CheckoutSession, DomainError> {
        CheckoutSession::start(cart.items()).inspect_err(|e| {
            self.notifications.info(e.to_string());
        })
    }

    pub fn submit_shipping(
        &self,
        session: &mut CheckoutSession,
        details: ShippingDetails,
    ) -> Result<(), DomainError> {
        session
            .submit_shipping(details)
            .inspect_err(|e| self.warn_on_validation(e))
    }

    /// Validate payment data and enter the processing sub-state.
    pub fn begin_payment(
        &self,
        session: &mut CheckoutSession,
        details: PaymentDetails,
    ) -> Result<(), DomainError> {
        session
            .begin_payment(details)
            .inspect_err(|e| self.warn_on_validation(e))
    }

    fn warn_on_validation(&self, e: &DomainError) {
        if let DomainError::ValidationFailed(msg) = e {
            self.notifications.warning(msg.clone());
        }
    }

    /// Run the whole payment step: validation, processing and confirmation.
    pub async fn pay(
        &self,
        session: &mut CheckoutSession,
        cart: &mut CartEngine,
        details: PaymentDetails,
    ) -> Result<(), CheckoutError> {
        self.begin_payment(session, details)?;
        self.process_payment(session, cart).await
    }

    /// Finish a session already in the processing sub-state: wait out the
    /// simulated gateway, take stock if enabled, empty the cart, then confirm.
    ///
    /// If any step fails, stock already taken is handed back and the session
    /// leaves processing and stays on the payment step.
    pub async fn process_payment(
        &self,
        session: &mut CheckoutSession,
        cart: &mut CartEngine,
    ) -> Result<(), CheckoutError> {
        if !session.is_processing() {
            return Err(DomainError::Conflict("payment is not being processed".into()).into());
        }
        tokio::time::sleep(self.payment_delay).await;

        let total = cart.total();
        let taken = if self.decrement_stock {
            match self.take_stock(cart).await {
                Ok(taken) => taken,
                Err(e) => return Err(self.abort(session, e.into())),
            }
        } else {
            Vec::new()
        };
        if let Err(e) = cart.clear().await {
            self.restore_stock(&taken).await;
            return Err(self.abort(session, e.into()));
        }

        session.complete()?;
        log::info!("checkout completed for user {} (total {})", cart.user_id(), total);
        self.notifications.success("Order placed successfully!");
        Ok(())
    }

    /// Decrement stock for every cart line. All or nothing: on failure the
    /// lines already taken are restored before the error is returned.
    async fn take_stock(&self, cart: &CartEngine) -> Result<Vec<(Uuid, i32)>, DomainError> {
        let ids: Vec<Uuid> = cart.items().iter().map(|i| i.product.id).collect();
        let current: HashMap<Uuid, i32> = self
            .products
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p.stock))
            .collect();
        for item in cart.items() {
            let available = current.get(&item.product.id).copied().unwrap_or(0);
            if item.entry.quantity > available {
                return Err(DomainError::Conflict(format!(
                    "only {} of '{}' left in stock",
                    available, item.product.name
                )));
            }
        }

        let mut taken = Vec::with_capacity(cart.items().len());
        for item in cart.items() {
            let (id, quantity) = (item.product.id, item.entry.quantity);
            if let Err(e) = self.products.adjust_stock(id, -quantity).await {
                self.restore_stock(&taken).await;
                return Err(e);
            }
            taken.push((id, quantity));
        }
        Ok(taken)
    }

    async fn restore_stock(&self, taken: &[(Uuid, i32)]) {
        for &(id, quantity) in taken {
            if let Err(e) = self.products.adjust_stock(id, quantity).await {
                log::error!("could not restore {} units of product {}: {}", quantity, id, e);
            }
        }
    }

    fn abort(&self, session: &mut CheckoutSession, e: CheckoutError) -> CheckoutError {
        log::warn!("checkout failed: {}", e);
        session.abort_processing();
        self.notifications.error("The order could not be completed");
        e
    }
}

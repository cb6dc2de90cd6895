use std::collections::HashMap;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::cart::{self, CartViewEntry};
use crate::domain::catalog::Product;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, ProductRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp {
    Load,
    Add,
    UpdateQuantity,
    Remove,
    Clear,
}

impl CartOp {
    pub fn failure_message(self) -> &'static str {
        match self {
            CartOp::Load => "Could not load the cart",
            CartOp::Add => "Could not add the product to the cart",
            CartOp::UpdateQuantity => "Could not update the quantity",
            CartOp::Remove => "Could not remove the product from the cart",
            CartOp::Clear => "Could not empty the cart",
        }
    }
}

#[derive(Debug, Error)]
#[error("{}: {source}", .op.failure_message())]
pub struct CartError {
    pub op: CartOp,
    #[source]
    pub source: DomainError,
}

/// One user's cart, kept in step with the remote store.
///
/// Every mutation writes first and then reloads the whole view, so after an
/// operation resolves `items` reflects the store. Nothing is applied
/// optimistically. Quantities are refused when they would exceed the
/// product's current stock.
pub struct CartEngine {
    user_id: Uuid,
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
    items: Vec<CartViewEntry>,
    loading: bool,
    error: Option<String>,
}

impl CartEngine {
    pub fn new(
        user_id: Uuid,
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            user_id,
            carts,
            products,
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Build an engine and load its current contents.
    pub async fn open(
        user_id: Uuid,
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Result<Self, CartError> {
        let mut engine = Self::new(user_id, carts, products);
        engine.reload().await?;
        Ok(engine)
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn items(&self) -> &[CartViewEntry] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, entry_id: Uuid) -> Option<&CartViewEntry> {
        self.items.iter().find(|item| item.entry.id == entry_id)
    }

    pub fn total(&self) -> BigDecimal {
        cart::total(&self.items)
    }

    pub fn item_count(&self) -> i64 {
        cart::item_count(&self.items)
    }

    pub async fn reload(&mut self) -> Result<(), CartError> {
        self.loading = true;
        self.error = None;
        let result = self.fetch().await;
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => self.fail(CartOp::Load, e),
        }
    }

    // One query for the entries, one batched query for their products.
    async fn fetch(&self) -> Result<Vec<CartViewEntry>, DomainError> {
        let entries = self.carts.list_for_user(self.user_id).await?;
        let ids: Vec<Uuid> = entries.iter().map(|e| e.product_id).collect();
        let products: HashMap<Uuid, Product> = self
            .products
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let product = products.get(&entry.product_id)?.clone();
                Some(CartViewEntry { entry, product })
            })
            .collect())
    }

    fn fail<T>(&mut self, op: CartOp, source: DomainError) -> Result<T, CartError> {
        log::warn!("cart {} {:?} failed: {}", self.user_id, op, source);
        self.error = Some(op.failure_message().to_string());
        Err(CartError { op, source })
    }

    pub async fn add(&mut self, product_id: Uuid, quantity: i32) -> Result<(), CartError> {
        match self.write_add(product_id, quantity).await {
            Ok(()) => self.reload().await,
            Err(e) => self.fail(CartOp::Add, e),
        }
    }

    async fn write_add(&self, product_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        if quantity < 1 {
            return Err(DomainError::ValidationFailed(
                "quantity to add must be at least 1".into(),
            ));
        }
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("product {product_id}")))?;
        let current = self
            .carts
            .find_for_product(self.user_id, product_id)
            .await?
            .map_or(0, |e| e.quantity);
        let requested = current.checked_add(quantity).ok_or_else(|| {
            DomainError::Conflict(format!(
                "only {} of '{}' in stock, quantity out of range",
                product.stock, product.name
            ))
        })?;
        ensure_in_stock(&product, requested)?;

        let entry = self.carts.add(self.user_id, product_id, quantity).await?;
        log::debug!(
            "cart {}: product {} now at quantity {}",
            self.user_id,
            product_id,
            entry.quantity
        );
        Ok(())
    }

    /// Overwrite an entry's quantity. Zero or less removes the entry.
    pub async fn update_quantity(&mut self, entry_id: Uuid, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove(entry_id).await;
        }
        match self.write_quantity(entry_id, quantity).await {
            Ok(()) => self.reload().await,
            Err(e) => self.fail(CartOp::UpdateQuantity, e),
        }
    }

    async fn write_quantity(&self, entry_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        let entry = self
            .carts
            .find_by_id(entry_id)
            .await?
            .filter(|e| e.user_id == self.user_id)
            .ok_or_else(|| DomainError::NotFound(format!("cart entry {entry_id}")))?;
        let product = self
            .products
            .find_by_id(entry.product_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("product {}", entry.product_id)))?;
        ensure_in_stock(&product, quantity)?;

        self.carts.set_quantity(entry_id, quantity).await?;
        log::debug!("cart {}: entry {} set to {}", self.user_id, entry_id, quantity);
        Ok(())
    }

    pub async fn remove(&mut self, entry_id: Uuid) -> Result<(), CartError> {
        match self.write_remove(entry_id).await {
            Ok(()) => self.reload().await,
            Err(e) => self.fail(CartOp::Remove, e),
        }
    }

    async fn write_remove(&self, entry_id: Uuid) -> Result<(), DomainError> {
        if let Some(entry) = self.carts.find_by_id(entry_id).await? {
            if entry.user_id != self.user_id {
                return Err(DomainError::NotFound(format!("cart entry {entry_id}")));
            }
            self.carts.remove(entry_id).await?;
            log::debug!("cart {}: entry {} removed", self.user_id, entry_id);
        }
        Ok(())
    }

    /// Delete every entry of this user. The outcome is known, so the view is
    /// emptied without a reload.
    pub async fn clear(&mut self) -> Result<(), CartError> {
        if let Err(e) = self.carts.clear_for_user(self.user_id).await {
            return self.fail(CartOp::Clear, e);
        }
        log::debug!("cart {} cleared", self.user_id);
        self.items.clear();
        self.error = None;
        Ok(())
    }
}

fn ensure_in_stock(product: &Product, requested: i32) -> Result<(), DomainError> {
    if requested > product.stock {
        return Err(DomainError::Conflict(format!(
            "only {} of '{}' in stock, {} requested",
            product.stock, product.name, requested
        )));
    }
    Ok(())
}

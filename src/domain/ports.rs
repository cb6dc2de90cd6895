use async_trait::async_trait;
use uuid::Uuid;

use super::cart::CartEntry;
use super::catalog::{Category, CategoryInput, CategoryPatch, Product, ProductInput, ProductPatch};
use super::errors::DomainError;
use super::user::{ClientAccount, ClientProfile, NewClient, ProfilePatch};

#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Product>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    /// Batched lookup. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError>;
    async fn create(&self, input: ProductInput) -> Result<Product, DomainError>;
    async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    /// Add `delta` (possibly negative) to the stored stock.
    async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<(), DomainError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Category>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError>;
    async fn create(&self, input: CategoryInput) -> Result<Category, DomainError>;
    async fn update(&self, id: Uuid, patch: CategoryPatch) -> Result<Category, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

#[async_trait]
pub trait CartRepository: Send + Sync + 'static {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CartEntry>, DomainError>;
    async fn find_by_id(&self, entry_id: Uuid) -> Result<Option<CartEntry>, DomainError>;
    async fn find_for_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<CartEntry>, DomainError>;
    /// Create the `(user_id, product_id)` entry or increase its quantity.
    async fn add(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<CartEntry, DomainError>;
    async fn set_quantity(&self, entry_id: Uuid, quantity: i32) -> Result<CartEntry, DomainError>;
    async fn remove(&self, entry_id: Uuid) -> Result<(), DomainError>;
    async fn clear_for_user(&self, user_id: Uuid) -> Result<(), DomainError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn find_by_email(&self, email: &str) -> Result<Option<ClientAccount>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClientProfile>, DomainError>;
    /// Fails with `Conflict` when the email is already registered.
    async fn create(&self, client: NewClient) -> Result<ClientProfile, DomainError>;
    async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfilePatch,
    ) -> Result<ClientProfile, DomainError>;
}

#[async_trait]
pub trait VerificationMailer: Send + Sync + 'static {
    /// Returns whether the message was accepted for delivery.
    async fn send_verification_code(&self, email: &str, name: &str, code: &str) -> bool;
}

pub trait AdminAuthenticator: Send + Sync + 'static {
    fn verify(&self, email: &str, password: &str) -> bool;
}

//! In-process implementation of every repository port, used by tests and
//! local demos. Data lives only as long as the store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::CartEntry;
use crate::domain::catalog::{
    Category, CategoryInput, CategoryPatch, Product, ProductInput, ProductPatch,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, CategoryRepository, ProductRepository, UserRepository};
use crate::domain::user::{ClientAccount, ClientProfile, NewClient, ProfilePatch};

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    categories: Vec<Category>,
    cart: Vec<CartEntry>,
    users: Vec<ClientAccount>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with `RemoteUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn with<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::RemoteUnavailable("store is offline".into()));
        }
        let mut tables = self
            .tables
            .lock()
            .map_err(|e| DomainError::RemoteUnavailable(e.to_string()))?;
        f(&mut tables)
    }
}

fn not_found(kind: &str, id: Uuid) -> DomainError {
    DomainError::NotFound(format!("{kind} {id}"))
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.with(|t| Ok(t.products.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        self.with(|t| Ok(t.products.iter().find(|p| p.id == id).cloned()))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        self.with(|t| {
            Ok(t.products
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect())
        })
    }

    async fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        self.with(|t| {
            let product = Product {
                id: Uuid::new_v4(),
                name: input.name,
                description: input.description,
                price: input.price,
                stock: input.stock,
                image_url: input.image_url,
                category_id: input.category_id,
            };
            t.products.push(product.clone());
            Ok(product)
        })
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product, DomainError> {
        self.with(|t| {
            let product = t
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| not_found("product", id))?;
            product.apply(patch);
            Ok(product.clone())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.with(|t| {
            t.products.retain(|p| p.id != id);
            Ok(())
        })
    }

    async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<(), DomainError> {
        self.with(|t| {
            let product = t
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| not_found("product", id))?;
            product.stock = product.stock.saturating_add(delta).max(0);
            Ok(())
        })
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        self.with(|t| Ok(t.categories.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        self.with(|t| Ok(t.categories.iter().find(|c| c.id == id).cloned()))
    }

    async fn create(&self, input: CategoryInput) -> Result<Category, DomainError> {
        self.with(|t| {
            let category = Category {
                id: Uuid::new_v4(),
                name: input.name,
                description: input.description,
                image_url: input.image_url,
            };
            t.categories.push(category.clone());
            Ok(category)
        })
    }

    async fn update(&self, id: Uuid, patch: CategoryPatch) -> Result<Category, DomainError> {
        self.with(|t| {
            let category = t
                .categories
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| not_found("category", id))?;
            category.apply(patch);
            Ok(category.clone())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.with(|t| {
            t.categories.retain(|c| c.id != id);
            Ok(())
        })
    }
}

#[async_trait]
impl CartRepository for InMemoryStore {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CartEntry>, DomainError> {
        self.with(|t| {
            Ok(t.cart
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect())
        })
    }

    async fn find_by_id(&self, entry_id: Uuid) -> Result<Option<CartEntry>, DomainError> {
        self.with(|t| Ok(t.cart.iter().find(|e| e.id == entry_id).cloned()))
    }

    async fn find_for_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<CartEntry>, DomainError> {
        self.with(|t| {
            Ok(t.cart
                .iter()
                .find(|e| e.user_id == user_id && e.product_id == product_id)
                .cloned())
        })
    }

    async fn add(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<CartEntry, DomainError> {
        self.with(|t| {
            if let Some(entry) = t
                .cart
                .iter_mut()
                .find(|e| e.user_id == user_id && e.product_id == product_id)
            {
                entry.quantity = entry.quantity.saturating_add(quantity);
                return Ok(entry.clone());
            }
            let entry = CartEntry {
                id: Uuid::new_v4(),
                user_id,
                product_id,
                quantity,
            };
            t.cart.push(entry.clone());
            Ok(entry)
        })
    }

    async fn set_quantity(&self, entry_id: Uuid, quantity: i32) -> Result<CartEntry, DomainError> {
        self.with(|t| {
            let entry = t
                .cart
                .iter_mut()
                .find(|e| e.id == entry_id)
                .ok_or_else(|| not_found("cart entry", entry_id))?;
            entry.quantity = quantity;
            Ok(entry.clone())
        })
    }

    async fn remove(&self, entry_id: Uuid) -> Result<(), DomainError> {
        self.with(|t| {
            t.cart.retain(|e| e.id != entry_id);
            Ok(())
        })
    }

    async fn clear_for_user(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.with(|t| {
            t.cart.retain(|e| e.user_id != user_id);
            Ok(())
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<ClientAccount>, DomainError> {
        self.with(|t| {
            Ok(t.users
                .iter()
                .find(|u| u.profile.email.eq_ignore_ascii_case(email))
                .cloned())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClientProfile>, DomainError> {
        self.with(|t| {
            Ok(t.users
                .iter()
                .find(|u| u.profile.id == id)
                .map(|u| u.profile.clone()))
        })
    }

    async fn create(&self, client: NewClient) -> Result<ClientProfile, DomainError> {
        self.with(|t| {
            if t
                .users
                .iter()
                .any(|u| u.profile.email.eq_ignore_ascii_case(&client.email))
            {
                return Err(DomainError::Conflict(format!(
                    "email {} is already registered",
                    client.email
                )));
            }
            let profile = ClientProfile {
                id: Uuid::new_v4(),
                name: client.name,
                email: client.email,
                address: client.address,
                city: client.city,
                phone: client.phone,
            };
            t.users.push(ClientAccount {
                profile: profile.clone(),
                password_hash: client.password_hash,
            });
            Ok(profile)
        })
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfilePatch,
    ) -> Result<ClientProfile, DomainError> {
        self.with(|t| {
            let account = t
                .users
                .iter_mut()
                .find(|u| u.profile.id == id)
                .ok_or_else(|| not_found("user", id))?;
            account.profile.apply(patch);
            Ok(account.profile.clone())
        })
    }
}

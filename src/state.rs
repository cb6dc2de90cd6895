use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::auth_service::AuthService;
use crate::application::cart_engine::CartEngine;
use crate::application::catalog_service::CatalogService;
use crate::application::checkout_service::{CheckoutService, DEFAULT_PAYMENT_DELAY};
use crate::application::notifications::{NotificationQueue, DEFAULT_DURATION};
use crate::application::pagination::DEFAULT_PAGE_SIZE;
use crate::config::Settings;
use crate::db::DbPool;
use crate::domain::checkout::CheckoutSession;
use crate::domain::ports::{
    AdminAuthenticator, CartRepository, CategoryRepository, ProductRepository, UserRepository,
    VerificationMailer,
};
use crate::infrastructure::cart_repo::DieselCartRepository;
use crate::infrastructure::catalog_repo::{DieselCategoryRepository, DieselProductRepository};
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::user_repo::DieselUserRepository;

/// The four storage ports the service runs against.
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn ProductRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            products: Arc::new(DieselProductRepository::new(pool.clone())),
            categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
            carts: Arc::new(DieselCartRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool)),
        }
    }

    pub fn in_memory(store: InMemoryStore) -> Self {
        Self {
            products: Arc::new(store.clone()),
            categories: Arc::new(store.clone()),
            carts: Arc::new(store.clone()),
            users: Arc::new(store),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub page_size: usize,
    pub notification_duration: Duration,
    pub payment_delay: Duration,
    pub decrement_stock: bool,
    pub bcrypt_cost: u32,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            notification_duration: DEFAULT_DURATION,
            payment_delay: DEFAULT_PAYMENT_DELAY,
            decrement_stock: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl From<&Settings> for AppOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            page_size: settings.page_size,
            notification_duration: settings.notification_duration,
            payment_delay: settings.payment_delay,
            decrement_stock: settings.checkout_decrements_stock,
            ..Self::default()
        }
    }
}

/// Shared state behind every handler.
pub struct AppState {
    pub repos: Repositories,
    pub catalog: CatalogService,
    pub checkout: CheckoutService,
    pub auth: AuthService,
    pub notifications: NotificationQueue,
    pub page_size: usize,
    /// One in-flight checkout per user.
    pub sessions: Mutex<HashMap<Uuid, CheckoutSession>>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        admin: Arc<dyn AdminAuthenticator>,
        mailer: Arc<dyn VerificationMailer>,
        options: AppOptions,
    ) -> Self {
        let notifications = NotificationQueue::new(options.notification_duration);
        Self {
            catalog: CatalogService::new(repos.products.clone(), repos.categories.clone()),
            checkout: CheckoutService::new(
                repos.products.clone(),
                notifications.clone(),
                options.payment_delay,
                options.decrement_stock,
            ),
            auth: AuthService::with_cost(admin, repos.users.clone(), mailer, options.bcrypt_cost),
            notifications,
            page_size: options.page_size,
            sessions: Mutex::new(HashMap::new()),
            repos,
        }
    }

    pub fn cart(&self, user_id: Uuid) -> CartEngine {
        CartEngine::new(user_id, self.repos.carts.clone(), self.repos.products.clone())
    }

    pub async fn open_cart(
        &self,
        user_id: Uuid,
    ) -> Result<CartEngine, crate::application::cart_engine::CartError> {
        CartEngine::open(user_id, self.repos.carts.clone(), self.repos.products.clone()).await
    }
}

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::catalog::{
    Category, CategoryInput, CategoryPatch, Product, ProductFilter, ProductInput, ProductPatch,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CategoryRepository, ProductRepository};

/// Snapshot of products and categories fetched together.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Products passing `filter`, in catalog order.
    pub fn filter_products(&self, filter: &ProductFilter) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }
}

pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl CatalogService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn load(&self) -> Result<Catalog, DomainError> {
        let products = self.products.list().await?;
        let categories = self.categories.list().await?;
        Ok(Catalog::new(products, categories))
    }

    pub async fn categories(&self) -> Result<Vec<Category>, DomainError> {
        self.categories.list().await
    }

    pub async fn product(&self, id: Uuid) -> Result<Product, DomainError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("product {id}")))
    }

    async fn ensure_category(&self, id: Uuid) -> Result<(), DomainError> {
        match self.categories.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::ValidationFailed(format!(
                "category {id} does not exist"
            ))),
        }
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<Product, DomainError> {
        input.validate()?;
        self.ensure_category(input.category_id).await?;
        let product = self.products.create(input).await?;
        log::info!("product {} '{}' created", product.id, product.name);
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, DomainError> {
        patch.validate()?;
        if let Some(category_id) = patch.category_id {
            self.ensure_category(category_id).await?;
        }
        self.products.update(id, patch).await
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        self.product(id).await?;
        self.products.delete(id).await?;
        log::info!("product {} deleted", id);
        Ok(())
    }

    pub async fn create_category(&self, input: CategoryInput) -> Result<Category, DomainError> {
        input.validate()?;
        let category = self.categories.create(input).await?;
        log::info!("category {} '{}' created", category.id, category.name);
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        patch: CategoryPatch,
    ) -> Result<Category, DomainError> {
        patch.validate()?;
        self.categories.update(id, patch).await
    }

    /// Products of a deleted category keep their dangling `category_id`.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), DomainError> {
        if self.categories.find_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound(format!("category {id}")));
        }
        self.categories.delete(id).await?;
        log::info!("category {} deleted", id);
        Ok(())
    }
}

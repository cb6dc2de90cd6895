use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{
    Category, CategoryInput, CategoryPatch, Product, ProductInput, ProductPatch,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CategoryRepository, ProductRepository};
use crate::schema::{categories, products};

use super::blocking;
use super::models::{
    CategoryChangeset, CategoryRow, NewCategoryRow, NewProductRow, ProductChangeset, ProductRow,
};

// ── Products ─────────────────────────────────────────────────────────────────

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        blocking(&self.pool, |conn| {
            let rows: Vec<ProductRow> = products::table
                .select(ProductRow::as_select())
                .order(products::created_at.asc())
                .load(conn)?;
            Ok(rows.into_iter().map(Product::from).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        blocking(&self.pool, move |conn| {
            let row: Option<ProductRow> = products::table
                .filter(products::id.eq(id))
                .select(ProductRow::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(Product::from))
        })
        .await
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.to_vec();
        blocking(&self.pool, move |conn| {
            let rows: Vec<ProductRow> = products::table
                .filter(products::id.eq_any(ids))
                .select(ProductRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Product::from).collect())
        })
        .await
    }

    async fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        blocking(&self.pool, move |conn| {
            let row: ProductRow = diesel::insert_into(products::table)
                .values(&NewProductRow {
                    id: Uuid::new_v4(),
                    name: input.name,
                    description: input.description,
                    price: input.price,
                    stock: input.stock,
                    image_url: input.image_url,
                    category_id: input.category_id,
                })
                .returning(ProductRow::as_returning())
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product, DomainError> {
        blocking(&self.pool, move |conn| {
            let row: Option<ProductRow> = diesel::update(products::table.filter(products::id.eq(id)))
                .set(ProductChangeset::from(patch))
                .returning(ProductRow::as_returning())
                .get_result(conn)
                .optional()?;
            row.map(Product::from)
                .ok_or_else(|| DomainError::NotFound(format!("product {id}")))
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        blocking(&self.pool, move |conn| {
            diesel::delete(products::table.filter(products::id.eq(id))).execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<(), DomainError> {
        blocking(&self.pool, move |conn| {
            // Stock never drops below zero.
            let updated = diesel::update(products::table.filter(products::id.eq(id)))
                .set((
                    products::stock.eq(sql::<Integer>("GREATEST(stock + ")
                        .bind::<Integer, _>(delta)
                        .sql(", 0)")),
                    products::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(DomainError::NotFound(format!("product {id}")));
            }
            Ok(())
        })
        .await
    }
}

// ── Categories ───────────────────────────────────────────────────────────────

pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        blocking(&self.pool, |conn| {
            let rows: Vec<CategoryRow> = categories::table
                .select(CategoryRow::as_select())
                .order(categories::name.asc())
                .load(conn)?;
            Ok(rows.into_iter().map(Category::from).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        blocking(&self.pool, move |conn| {
            let row: Option<CategoryRow> = categories::table
                .filter(categories::id.eq(id))
                .select(CategoryRow::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(Category::from))
        })
        .await
    }

    async fn create(&self, input: CategoryInput) -> Result<Category, DomainError> {
        blocking(&self.pool, move |conn| {
            let row: CategoryRow = diesel::insert_into(categories::table)
                .values(&NewCategoryRow {
                    id: Uuid::new_v4(),
                    name: input.name,
                    description: input.description,
                    image_url: input.image_url,
                })
                .returning(CategoryRow::as_returning())
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn update(&self, id: Uuid, patch: CategoryPatch) -> Result<Category, DomainError> {
        blocking(&self.pool, move |conn| {
            let row: Option<CategoryRow> = diesel::update(categories::table.filter(categories::id.eq(id)))
                .set(CategoryChangeset::from(patch))
                .returning(CategoryRow::as_returning())
                .get_result(conn)
                .optional()?;
            row.map(Category::from)
                .ok_or_else(|| DomainError::NotFound(format!("category {id}")))
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        blocking(&self.pool, move |conn| {
            diesel::delete(categories::table.filter(categories::id.eq(id))).execute(conn)?;
            Ok(())
        })
        .await
    }
}

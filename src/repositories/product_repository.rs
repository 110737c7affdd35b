// src/repositories/product_repository.rs
//
// Product persistence
//
// archetype and external_id are written once by insert. update never
// names those columns, and the store trigger rejects any statement that does.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{get_connection, ConnectionPool};
use crate::domain::{DomainId, Product, ProductDraft, ProductId, ProductStatus, ProductSummary};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ProductRepository: Send + Sync {
    fn insert(&self, draft: &ProductDraft) -> AppResult<ProductId>;
    /// Writes name, description, owner, status and tags only
    fn update(&self, product: &Product) -> AppResult<bool>;
    fn delete(&self, id: ProductId) -> AppResult<bool>;
    fn get_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;
    fn list_all(&self) -> AppResult<Vec<Product>>;
    fn list_with_owner_names(&self) -> AppResult<Vec<ProductSummary>>;
    fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<ProductId>>;
    fn count_by_owner(&self, owner_id: DomainId) -> AppResult<u64>;
}

pub struct SqliteProductRepository {
    pool: Arc<ConnectionPool>,
}

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.created_at, p.owner_id, \
                               p.archetype, p.external_id, p.status, p.tags";

impl SqliteProductRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &Row) -> Result<Product, rusqlite::Error> {
        let created_at = DateTime::parse_from_rfc3339(&row.get::<_, String>("created_at")?)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?
            .with_timezone(&Utc);

        let status_str: Option<String> = row.get("status")?;
        let status = ProductStatus::parse_optional(status_str.as_deref())
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Product {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at,
            owner_id: row.get("owner_id")?,
            archetype: row.get("archetype")?,
            external_id: row.get("external_id")?,
            status,
            tags: row.get("tags")?,
        })
    }

    fn row_to_summary(row: &Row) -> Result<ProductSummary, rusqlite::Error> {
        Ok(ProductSummary {
            product: Self::row_to_product(row)?,
            owner_name: row.get("owner_name")?,
        })
    }
}

impl ProductRepository for SqliteProductRepository {
    fn insert(&self, draft: &ProductDraft) -> AppResult<ProductId> {
        let conn = get_connection(&self.pool)?;

        conn.execute(
            "INSERT INTO products (
                name, description, created_at, owner_id, archetype, external_id, status, tags
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                draft.name,
                draft.description,
                draft.created_at.to_rfc3339(),
                draft.owner_id,
                draft.archetype,
                draft.external_id,
                draft.status.map(|s| s.as_str()),
                draft.tags,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, product: &Product) -> AppResult<bool> {
        let conn = get_connection(&self.pool)?;

        let affected = conn.execute(
            "UPDATE products
             SET name = ?1, description = ?2, owner_id = ?3, status = ?4, tags = ?5
             WHERE id = ?6",
            params![
                product.name,
                product.description,
                product.owner_id,
                product.status.map(|s| s.as_str()),
                product.tags,
                product.id,
            ],
        )?;

        Ok(affected > 0)
    }

    fn delete(&self, id: ProductId) -> AppResult<bool> {
        let conn = get_connection(&self.pool)?;
        let affected = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn get_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt =
            conn.prepare(&format!("SELECT {} FROM products p WHERE p.id = ?1", PRODUCT_COLUMNS))?;

        match stmt.query_row(params![id], Self::row_to_product) {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Product>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM products p ORDER BY p.name, p.id",
            PRODUCT_COLUMNS
        ))?;

        let products: Vec<Product> = stmt
            .query_map([], Self::row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    fn list_with_owner_names(&self) -> AppResult<Vec<ProductSummary>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {}, d.name AS owner_name
             FROM products p
             JOIN domains d ON d.id = p.owner_id
             ORDER BY p.name, p.id",
            PRODUCT_COLUMNS
        ))?;

        let summaries: Vec<ProductSummary> = stmt
            .query_map([], Self::row_to_summary)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(summaries)
    }

    fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<ProductId>> {
        let conn = get_connection(&self.pool)?;

        let id = conn
            .query_row(
                "SELECT id FROM products WHERE external_id = ?1",
                params![external_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(id)
    }

    fn count_by_owner(&self, owner_id: DomainId) -> AppResult<u64> {
        let conn = get_connection(&self.pool)?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM products WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }
}

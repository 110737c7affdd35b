// src/repositories/contract_repository.rs
//
// Contract persistence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{get_connection, ConnectionPool};
use crate::domain::{
    Contract, ContractDetail, ContractDraft, ContractId, ContractSummary, ContractTerms, DomainId,
    ProductId,
};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ContractRepository: Send + Sync {
    fn insert(&self, draft: &ContractDraft) -> AppResult<ContractId>;
    /// Writes name, transfer domain and terms; never the product/consumer pair
    fn update(&self, contract: &Contract) -> AppResult<bool>;
    fn delete(&self, id: ContractId) -> AppResult<bool>;
    fn get_by_id(&self, id: ContractId) -> AppResult<Option<Contract>>;
    fn get_detail(&self, id: ContractId) -> AppResult<Option<ContractDetail>>;
    fn list_all(&self) -> AppResult<Vec<Contract>>;
    fn list_summaries(&self) -> AppResult<Vec<ContractSummary>>;
    fn find_by_pair(&self, product_id: ProductId, consumer_id: DomainId) -> AppResult<Option<ContractId>>;
    fn count_by_consumer(&self, consumer_id: DomainId) -> AppResult<u64>;
    fn count_by_product(&self, product_id: ProductId) -> AppResult<u64>;
}

pub struct SqliteContractRepository {
    pool: Arc<ConnectionPool>,
}

const CONTRACT_COLUMNS: &str = "c.id, c.name, c.description, c.created_at, c.product_id, \
                                c.consumer_id, c.transfer_id, c.usage, c.purpose, c.limitations, \
                                c.schema_descriptor, c.support_channel, c.price_amount, \
                                c.price_currency, c.price_unit";

impl SqliteContractRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_contract(row: &Row) -> Result<Contract, rusqlite::Error> {
        let created_at = DateTime::parse_from_rfc3339(&row.get::<_, String>("created_at")?)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?
            .with_timezone(&Utc);

        let schema_json: Option<String> = row.get("schema_descriptor")?;
        let schema_descriptor = schema_json
            .map(|s| serde_json::from_str::<serde_json::Value>(&s))
            .transpose()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Contract {
            id: row.get("id")?,
            name: row.get("name")?,
            created_at,
            product_id: row.get("product_id")?,
            consumer_id: row.get("consumer_id")?,
            transfer_id: row.get("transfer_id")?,
            terms: ContractTerms {
                description: row.get("description")?,
                usage: row.get("usage")?,
                purpose: row.get("purpose")?,
                limitations: row.get("limitations")?,
                schema_descriptor,
                support_channel: row.get("support_channel")?,
                price_amount: row.get("price_amount")?,
                price_currency: row.get("price_currency")?,
                price_unit: row.get("price_unit")?,
            },
        })
    }

    fn row_to_summary(row: &Row) -> Result<ContractSummary, rusqlite::Error> {
        Ok(ContractSummary {
            contract: Self::row_to_contract(row)?,
            product_name: row.get("product_name")?,
            consumer_name: row.get("consumer_name")?,
        })
    }

    fn row_to_detail(row: &Row) -> Result<ContractDetail, rusqlite::Error> {
        Ok(ContractDetail {
            contract: Self::row_to_contract(row)?,
            product_name: row.get("product_name")?,
            consumer_name: row.get("consumer_name")?,
            transfer_name: row.get("transfer_name")?,
        })
    }

    fn schema_to_text(terms: &ContractTerms) -> AppResult<Option<String>> {
        Ok(terms
            .schema_descriptor
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?)
    }
}

impl ContractRepository for SqliteContractRepository {
    fn insert(&self, draft: &ContractDraft) -> AppResult<ContractId> {
        let conn = get_connection(&self.pool)?;
        let schema_json = Self::schema_to_text(&draft.terms)?;
        let terms = &draft.terms;

        conn.execute(
            "INSERT INTO contracts (
                name, description, created_at, product_id, consumer_id, transfer_id,
                usage, purpose, limitations, schema_descriptor, support_channel,
                price_amount, price_currency, price_unit
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                draft.name,
                terms.description,
                draft.created_at.to_rfc3339(),
                draft.product_id,
                draft.consumer_id,
                draft.transfer_id,
                terms.usage,
                terms.purpose,
                terms.limitations,
                schema_json,
                terms.support_channel,
                terms.price_amount,
                terms.price_currency,
                terms.price_unit,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, contract: &Contract) -> AppResult<bool> {
        let conn = get_connection(&self.pool)?;
        let schema_json = Self::schema_to_text(&contract.terms)?;
        let terms = &contract.terms;

        let affected = conn.execute(
            "UPDATE contracts
             SET name = ?1, description = ?2, transfer_id = ?3, usage = ?4, purpose = ?5,
                 limitations = ?6, schema_descriptor = ?7, support_channel = ?8,
                 price_amount = ?9, price_currency = ?10, price_unit = ?11
             WHERE id = ?12",
            params![
                contract.name,
                terms.description,
                contract.transfer_id,
                terms.usage,
                terms.purpose,
                terms.limitations,
                schema_json,
                terms.support_channel,
                terms.price_amount,
                terms.price_currency,
                terms.price_unit,
                contract.id,
            ],
        )?;

        Ok(affected > 0)
    }

    fn delete(&self, id: ContractId) -> AppResult<bool> {
        let conn = get_connection(&self.pool)?;
        let affected = conn.execute("DELETE FROM contracts WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn get_by_id(&self, id: ContractId) -> AppResult<Option<Contract>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt =
            conn.prepare(&format!("SELECT {} FROM contracts c WHERE c.id = ?1", CONTRACT_COLUMNS))?;

        match stmt.query_row(params![id], Self::row_to_contract) {
            Ok(contract) => Ok(Some(contract)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn get_detail(&self, id: ContractId) -> AppResult<Option<ContractDetail>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {}, p.name AS product_name, cd.name AS consumer_name, td.name AS transfer_name
             FROM contracts c
             LEFT JOIN products p ON p.id = c.product_id
             LEFT JOIN domains cd ON cd.id = c.consumer_id
             LEFT JOIN domains td ON td.id = c.transfer_id
             WHERE c.id = ?1",
            CONTRACT_COLUMNS
        ))?;

        match stmt.query_row(params![id], Self::row_to_detail) {
            Ok(detail) => Ok(Some(detail)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Contract>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM contracts c ORDER BY c.name, c.id",
            CONTRACT_COLUMNS
        ))?;

        let contracts: Vec<Contract> = stmt
            .query_map([], Self::row_to_contract)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(contracts)
    }

    fn list_summaries(&self) -> AppResult<Vec<ContractSummary>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {}, p.name AS product_name, cd.name AS consumer_name
             FROM contracts c
             JOIN products p ON p.id = c.product_id
             JOIN domains cd ON cd.id = c.consumer_id
             ORDER BY c.name, c.id",
            CONTRACT_COLUMNS
        ))?;

        let summaries: Vec<ContractSummary> = stmt
            .query_map([], Self::row_to_summary)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(summaries)
    }

    fn find_by_pair(&self, product_id: ProductId, consumer_id: DomainId) -> AppResult<Option<ContractId>> {
        let conn = get_connection(&self.pool)?;

        let id = conn
            .query_row(
                "SELECT id FROM contracts WHERE product_id = ?1 AND consumer_id = ?2",
                params![product_id, consumer_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(id)
    }

    fn count_by_consumer(&self, consumer_id: DomainId) -> AppResult<u64> {
        let conn = get_connection(&self.pool)?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM contracts WHERE consumer_id = ?1",
            params![consumer_id],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    fn count_by_product(&self, product_id: ProductId) -> AppResult<u64> {
        let conn = get_connection(&self.pool)?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM contracts WHERE product_id = ?1",
            params![product_id],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }
}

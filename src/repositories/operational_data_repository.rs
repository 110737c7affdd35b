// src/repositories/operational_data_repository.rs

use std::str::FromStr;
use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::{get_connection, ConnectionPool};
use crate::domain::{DataType, OperationalData, OperationalDataDraft, OperationalDataId};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait OperationalDataRepository: Send + Sync {
    fn insert(&self, draft: &OperationalDataDraft) -> AppResult<OperationalDataId>;
    fn update(&self, item: &OperationalData) -> AppResult<bool>;
    fn delete(&self, id: OperationalDataId) -> AppResult<bool>;
    fn get_by_id(&self, id: OperationalDataId) -> AppResult<Option<OperationalData>>;
    fn list_all(&self) -> AppResult<Vec<OperationalData>>;
}

pub struct SqliteOperationalDataRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteOperationalDataRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &Row) -> Result<OperationalData, rusqlite::Error> {
        let data_type = DataType::from_str(&row.get::<_, String>("data_type")?)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let length: Option<i64> = row.get("length")?;

        Ok(OperationalData {
            id: row.get("id")?,
            name: row.get("name")?,
            data_type,
            length: length.map(|v| v as u32),
            description: row.get("description")?,
            business_rule: row.get("business_rule")?,
        })
    }
}

impl OperationalDataRepository for SqliteOperationalDataRepository {
    fn insert(&self, draft: &OperationalDataDraft) -> AppResult<OperationalDataId> {
        let conn = get_connection(&self.pool)?;

        conn.execute(
            "INSERT INTO operational_data (name, data_type, length, description, business_rule)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.name,
                draft.data_type.as_str(),
                draft.length.map(|v| v as i64),
                draft.description,
                draft.business_rule,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, item: &OperationalData) -> AppResult<bool> {
        let conn = get_connection(&self.pool)?;

        let affected = conn.execute(
            "UPDATE operational_data
             SET name = ?1, data_type = ?2, length = ?3, description = ?4, business_rule = ?5
             WHERE id = ?6",
            params![
                item.name,
                item.data_type.as_str(),
                item.length.map(|v| v as i64),
                item.description,
                item.business_rule,
                item.id,
            ],
        )?;

        Ok(affected > 0)
    }

    fn delete(&self, id: OperationalDataId) -> AppResult<bool> {
        let conn = get_connection(&self.pool)?;
        let affected = conn.execute("DELETE FROM operational_data WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn get_by_id(&self, id: OperationalDataId) -> AppResult<Option<OperationalData>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare("SELECT * FROM operational_data WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_item) {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<OperationalData>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare("SELECT * FROM operational_data ORDER BY name, id")?;

        let items: Vec<OperationalData> = stmt
            .query_map([], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }
}

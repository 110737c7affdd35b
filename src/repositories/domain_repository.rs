// src/repositories/domain_repository.rs
//
// Domain persistence

use std::str::FromStr;
use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::db::{get_connection, ConnectionPool};
use crate::domain::{Domain, DomainDraft, DomainId, DomainKind, DomainSummary};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait DomainRepository: Send + Sync {
    /// Insert a new row and return the identity the store assigned
    fn insert(&self, draft: &DomainDraft) -> AppResult<DomainId>;
    /// Overwrite every mutable column. Returns false when no row matched.
    fn update(&self, domain: &Domain) -> AppResult<bool>;
    /// Returns false when no row matched
    fn delete(&self, id: DomainId) -> AppResult<bool>;
    fn get_by_id(&self, id: DomainId) -> AppResult<Option<Domain>>;
    fn list_all(&self) -> AppResult<Vec<Domain>>;
    fn list_with_parent_names(&self) -> AppResult<Vec<DomainSummary>>;
    fn exists(&self, id: DomainId) -> AppResult<bool>;
    fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<DomainId>>;
    /// Parent, grandparent, ... of `id`, nearest first
    fn ancestor_ids(&self, id: DomainId) -> AppResult<Vec<DomainId>>;
}

pub struct SqliteDomainRepository {
    pool: Arc<ConnectionPool>,
}

const DOMAIN_COLUMNS: &str = "d.id, d.name, d.description, d.external_id, d.parent_id, d.kind";

impl SqliteDomainRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Domain - returns rusqlite::Error for query_map compatibility
    fn row_to_domain(row: &Row) -> Result<Domain, rusqlite::Error> {
        let kind_str: String = row.get("kind")?;
        let kind = DomainKind::from_str(&kind_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Domain {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            external_id: row.get("external_id")?,
            parent_id: row.get("parent_id")?,
            kind,
        })
    }

    fn row_to_summary(row: &Row) -> Result<DomainSummary, rusqlite::Error> {
        Ok(DomainSummary {
            domain: Self::row_to_domain(row)?,
            parent_name: row.get("parent_name")?,
        })
    }
}

impl DomainRepository for SqliteDomainRepository {
    fn insert(&self, draft: &DomainDraft) -> AppResult<DomainId> {
        let conn = get_connection(&self.pool)?;

        conn.execute(
            "INSERT INTO domains (name, description, external_id, parent_id, kind)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.name,
                draft.description,
                draft.external_id,
                draft.parent_id,
                draft.kind.as_str(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, domain: &Domain) -> AppResult<bool> {
        let conn = get_connection(&self.pool)?;

        let affected = conn.execute(
            "UPDATE domains
             SET name = ?1, description = ?2, external_id = ?3, parent_id = ?4, kind = ?5
             WHERE id = ?6",
            params![
                domain.name,
                domain.description,
                domain.external_id,
                domain.parent_id,
                domain.kind.as_str(),
                domain.id,
            ],
        )?;

        Ok(affected > 0)
    }

    fn delete(&self, id: DomainId) -> AppResult<bool> {
        let conn = get_connection(&self.pool)?;
        let affected = conn.execute("DELETE FROM domains WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn get_by_id(&self, id: DomainId) -> AppResult<Option<Domain>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!("SELECT {} FROM domains d WHERE d.id = ?1", DOMAIN_COLUMNS))?;

        match stmt.query_row(params![id], Self::row_to_domain) {
            Ok(domain) => Ok(Some(domain)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Domain>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM domains d ORDER BY d.name, d.id",
            DOMAIN_COLUMNS
        ))?;

        let domains: Vec<Domain> = stmt
            .query_map([], Self::row_to_domain)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(domains)
    }

    fn list_with_parent_names(&self) -> AppResult<Vec<DomainSummary>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {}, p.name AS parent_name
             FROM domains d
             LEFT JOIN domains p ON p.id = d.parent_id
             ORDER BY d.name, d.id",
            DOMAIN_COLUMNS
        ))?;

        let summaries: Vec<DomainSummary> = stmt
            .query_map([], Self::row_to_summary)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(summaries)
    }

    fn exists(&self, id: DomainId) -> AppResult<bool> {
        let conn = get_connection(&self.pool)?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM domains WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<DomainId>> {
        let conn = get_connection(&self.pool)?;

        let id = conn
            .query_row(
                "SELECT id FROM domains WHERE external_id = ?1",
                params![external_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(id)
    }

    fn ancestor_ids(&self, id: DomainId) -> AppResult<Vec<DomainId>> {
        let conn = get_connection(&self.pool)?;

        // The depth bound keeps a corrupted cyclic chain from recursing forever.
        let mut stmt = conn.prepare(
            "WITH RECURSIVE ancestors(id, depth) AS (
                 SELECT parent_id, 1 FROM domains WHERE id = ?1 AND parent_id IS NOT NULL
                 UNION ALL
                 SELECT d.parent_id, a.depth + 1
                 FROM domains d
                 JOIN ancestors a ON d.id = a.id
                 WHERE d.parent_id IS NOT NULL
                   AND a.depth < (SELECT COUNT(*) FROM domains)
             )
             SELECT id FROM ancestors ORDER BY depth",
        )?;

        let ids: Vec<DomainId> = stmt
            .query_map(params![id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ids)
    }
}

// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - No automatic migrations
// - Clear error messages
// - Idempotent operations

use rusqlite::Connection;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Schema version this build understands
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
///
/// A fresh database gets the version 1 schema and its version row in one
/// transaction. An up-to-date database is left alone; any other version is
/// refused so the catalog is never touched by a mismatched build.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    match get_schema_version(conn)? {
        0 => {
            let tx = conn.unchecked_transaction()?;
            apply_initial_schema(&tx)?;
            set_schema_version(&tx, CURRENT_SCHEMA_VERSION)?;
            tx.commit()?;
            log::info!("Catalog schema created (version {})", CURRENT_SCHEMA_VERSION);
            Ok(())
        }
        CURRENT_SCHEMA_VERSION => Ok(()),
        found if found < CURRENT_SCHEMA_VERSION => Err(AppError::Other(format!(
            "Schema version {} is outdated. Expected {}. Manual migration required.",
            found, CURRENT_SCHEMA_VERSION
        ))),
        found => Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            found, CURRENT_SCHEMA_VERSION
        ))),
    }
}

/// Highest applied version, 0 for a database without the version table
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Domains, products, contracts and operational data, with their
/// constraints and triggers
fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(include_str!("../../schema.sql"))
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))
}

/// Verify database integrity
/// 
/// Runs SQLite's integrity check. Should be called periodically.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(AppError::Database)?;
    
    if result != "ok" {
        return Err(AppError::Other(format!("Database integrity check failed: {}", result)));
    }
    
    Ok(())
}

/// Get database statistics
///
/// Store size and catalog row counts
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn
        .query_row("PRAGMA page_count", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    let page_size: i64 = conn
        .query_row("PRAGMA page_size", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        domain_count: count_rows(conn, "domains")?,
        product_count: count_rows(conn, "products")?,
        contract_count: count_rows(conn, "contracts")?,
        operational_data_count: count_rows(conn, "operational_data")?,
    })
}

fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .map_err(AppError::Database)
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub domain_count: i64,
    pub product_count: i64,
    pub contract_count: i64,
    pub operational_data_count: i64,
}

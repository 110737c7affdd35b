// src/db/test_support.rs
//
// File-backed pools for tests. The TempDir must outlive the pool.

use std::sync::Arc;

use tempfile::TempDir;

use super::{create_connection_pool, get_connection, initialize_database, ConnectionPool};
use crate::config::StoreConfig;

/// Fresh catalog with the schema applied
pub fn test_pool() -> (TempDir, Arc<ConnectionPool>) {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::with_path(dir.path().join("catalog.db"));
    let pool = create_connection_pool(&config).unwrap();

    {
        let conn = get_connection(&pool).unwrap();
        initialize_database(&conn).unwrap();
    }

    (dir, Arc::new(pool))
}

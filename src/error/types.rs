// src/error/types.rs
use crate::domain::DomainError;
use rusqlite::ffi;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Error classification visible to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Storage,
}

/// Store constraint that rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
    Check,
    Trigger,
    Other,
}

impl AppError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        AppError::NotFound(format!("{} {}", entity, id))
    }

    /// Which constraint rejected the statement, if this is a constraint failure
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            AppError::Database(rusqlite::Error::SqliteFailure(err, msg))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Some(match err.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        ConstraintViolation::Unique
                    }
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintViolation::ForeignKey,
                    ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL => {
                        ConstraintViolation::Check
                    }
                    // ON DELETE RESTRICT fires as a built-in trigger
                    ffi::SQLITE_CONSTRAINT_TRIGGER
                        if msg.as_deref() == Some("FOREIGN KEY constraint failed") =>
                    {
                        ConstraintViolation::ForeignKey
                    }
                    ffi::SQLITE_CONSTRAINT_TRIGGER => ConstraintViolation::Trigger,
                    _ => ConstraintViolation::Other,
                })
            }
            _ => None,
        }
    }

    /// Classify into the caller-facing taxonomy.
    ///
    /// Constraint failures that reach this point untranslated are still
    /// classified by the constraint that fired, never as generic storage errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Domain(_) | AppError::InvalidRequest(_) => ErrorKind::Validation,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Database(_) => match self.constraint_violation() {
                Some(ConstraintViolation::Unique) | Some(ConstraintViolation::ForeignKey) => {
                    ErrorKind::Conflict
                }
                Some(ConstraintViolation::Check) | Some(ConstraintViolation::Trigger) => {
                    ErrorKind::Validation
                }
                _ => ErrorKind::Storage,
            },
            _ => ErrorKind::Storage,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn failing_insert(sql_setup: &str, sql: &str) -> AppError {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        conn.execute_batch(sql_setup).unwrap();
        AppError::Database(conn.execute(sql, []).unwrap_err())
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = failing_insert(
            "CREATE TABLE t (v TEXT UNIQUE); INSERT INTO t VALUES ('a');",
            "INSERT INTO t VALUES ('a')",
        );
        assert_eq!(err.constraint_violation(), Some(ConstraintViolation::Unique));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_foreign_key_violation_is_conflict() {
        let err = failing_insert(
            "CREATE TABLE p (id INTEGER PRIMARY KEY);
             CREATE TABLE c (p_id INTEGER NOT NULL REFERENCES p(id));",
            "INSERT INTO c VALUES (42)",
        );
        assert_eq!(err.constraint_violation(), Some(ConstraintViolation::ForeignKey));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_restricted_delete_is_conflict() {
        let err = failing_insert(
            "CREATE TABLE p (id INTEGER PRIMARY KEY);
             CREATE TABLE c (p_id INTEGER NOT NULL REFERENCES p(id) ON DELETE RESTRICT);
             INSERT INTO p VALUES (1); INSERT INTO c VALUES (1);",
            "DELETE FROM p WHERE id = 1",
        );
        assert_eq!(err.constraint_violation(), Some(ConstraintViolation::ForeignKey));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_raised_trigger_is_validation() {
        let err = failing_insert(
            "CREATE TABLE t (v INTEGER);
             CREATE TRIGGER t_guard BEFORE INSERT ON t
             BEGIN SELECT RAISE(ABORT, 'v is frozen'); END;",
            "INSERT INTO t VALUES (1)",
        );
        assert_eq!(err.constraint_violation(), Some(ConstraintViolation::Trigger));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_check_violation_is_validation() {
        let err = failing_insert(
            "CREATE TABLE t (v INTEGER CHECK (v >= 0));",
            "INSERT INTO t VALUES (-1)",
        );
        assert_eq!(err.constraint_violation(), Some(ConstraintViolation::Check));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_other_errors_are_storage() {
        let err = AppError::Pool("timed out".to_string());
        assert_eq!(err.constraint_violation(), None);
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(AppError::not_found("Domain", 3).kind(), ErrorKind::NotFound);
    }
}

// src/services/store_guard.rs
//
// Shared registry plumbing: rule set lookup and reclassification of store
// constraint failures into the caller-facing error taxonomy.

use crate::domain::{ruleset_for, DomainError, FieldSource, Operation};
use crate::error::{AppError, AppResult, ConstraintViolation};

/// Run the declared rule set for an entity write against a raw request
pub(crate) fn check_rules<S: FieldSource + ?Sized>(
    entity: &str,
    operation: Operation,
    request: &S,
) -> AppResult<()> {
    let rules = ruleset_for(entity, operation).ok_or_else(|| {
        AppError::Other(format!("No rule set declared for {} {:?}", entity, operation))
    })?;

    rules.check(request)?;
    Ok(())
}

/// Reclassify a failed write.
///
/// `on_unique` names the uniqueness rule the caller was guarding; the
/// remaining constraint kinds get generic messages. Non-constraint errors
/// pass through unchanged and end up as storage errors.
pub(crate) fn translate_write_error(err: AppError, on_unique: impl FnOnce() -> String) -> AppError {
    match err.constraint_violation() {
        Some(ConstraintViolation::Unique) => AppError::Conflict(on_unique()),
        Some(ConstraintViolation::ForeignKey) => AppError::Conflict(
            "Referenced entity does not exist or is still referenced".to_string(),
        ),
        Some(ConstraintViolation::Check) | Some(ConstraintViolation::Trigger) => {
            AppError::Domain(DomainError::InvariantViolation(store_message(&err)))
        }
        _ => {
            if !matches!(err, AppError::Domain(_) | AppError::Conflict(_) | AppError::NotFound(_)) {
                log::error!("Store write failed: {}", err);
            }
            err
        }
    }
}

fn store_message(err: &AppError) -> String {
    match err {
        AppError::Database(rusqlite::Error::SqliteFailure(_, Some(msg))) => msg.clone(),
        other => other.to_string(),
    }
}

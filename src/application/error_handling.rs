// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → caller-facing responses
// - Validation, conflict and not-found errors carry their own message
// - Storage errors never expose internal details; they are logged instead

use crate::application::dto::{CommandResponse, ResponseStatus};
use crate::error::{AppError, ErrorKind};

/// Build the response for a failed command
pub fn error_response(error: AppError) -> CommandResponse {
    match error.kind() {
        ErrorKind::Validation => {
            log::debug!("Rejected: {}", error);
            CommandResponse::new(ResponseStatus::ValidationRejected, error.to_string())
        }

        ErrorKind::NotFound => {
            CommandResponse::new(ResponseStatus::NotFound, error.to_string())
        }

        ErrorKind::Conflict => {
            log::debug!("Conflict: {}", error);
            CommandResponse::new(ResponseStatus::Conflict, error.to_string())
        }

        ErrorKind::Storage => {
            // Log full error for debugging
            log::error!("Storage error: {:?}", error);

            let message = match error {
                AppError::Pool(_) => "Database connection failed",
                AppError::Serialization(_) => "Data serialization failed",
                _ => "Storage operation failed",
            };
            CommandResponse::new(ResponseStatus::ServerError, message)
                .with_details("Check logs for details")
        }
    }
}

/// Collapse a handler result into the response sent back
pub trait IntoCommandResponse {
    fn into_response(self) -> CommandResponse;
}

impl IntoCommandResponse for Result<CommandResponse, AppError> {
    fn into_response(self) -> CommandResponse {
        self.unwrap_or_else(error_response)
    }
}

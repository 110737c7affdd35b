// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between callers and registries
// - Commands accept a JSON payload, return a CommandResponse
// - The router maps action names to handlers and errors to responses
// - Commands NEVER contain business logic

pub mod contract_commands;
pub mod domain_commands;
pub mod mesh_commands;
pub mod operational_data_commands;
pub mod product_commands;

pub use contract_commands::*;
pub use domain_commands::*;
pub use mesh_commands::*;
pub use operational_data_commands::*;
pub use product_commands::*;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::application::dto::{CommandRequest, CommandResponse, ResponseStatus};
use crate::application::error_handling::IntoCommandResponse;
use crate::application::state::AppState;
use crate::domain::UpdateOutcome;
use crate::error::{AppError, AppResult};

pub type CommandHandler = fn(&AppState, Value) -> AppResult<CommandResponse>;

/// Deserialize a payload; any shape mismatch is a rejected request
pub(crate) fn parse_payload<T: DeserializeOwned>(payload: Value) -> AppResult<T> {
    serde_json::from_value(payload)
        .map_err(|e| AppError::InvalidRequest(format!("Malformed payload: {}", e)))
}

pub(crate) fn to_data<T: Serialize>(value: T) -> AppResult<Value> {
    Ok(serde_json::to_value(value)?)
}

pub(crate) fn update_response(
    entity: &str,
    id: Option<i64>,
    outcome: UpdateOutcome,
) -> CommandResponse {
    let response = match outcome {
        UpdateOutcome::Updated => {
            CommandResponse::new(ResponseStatus::Ok, format!("{} updated", entity))
        }
        UpdateOutcome::Unchanged => {
            CommandResponse::new(ResponseStatus::NoChange, format!("{} unchanged", entity))
        }
    };

    match id {
        Some(id) => response.with_id(id),
        None => response,
    }
}

/// Action name → handler table
pub struct CommandRouter {
    handlers: HashMap<&'static str, CommandHandler>,
}

impl CommandRouter {
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, CommandHandler> = HashMap::new();

        handlers.insert("list_domains", list_domains);
        handlers.insert("get_domain", get_domain);
        handlers.insert("create_domain", create_domain);
        handlers.insert("update_domain", update_domain);
        handlers.insert("delete_domain", delete_domain);

        handlers.insert("list_products", list_products);
        handlers.insert("get_product", get_product);
        handlers.insert("create_product", create_product);
        handlers.insert("update_product", update_product);
        handlers.insert("delete_product", delete_product);
        handlers.insert("generate_external_id", generate_product_external_id);

        handlers.insert("list_contracts", list_contracts);
        handlers.insert("get_contract", get_contract);
        handlers.insert("create_contract", create_contract);
        handlers.insert("update_contract", update_contract);
        handlers.insert("delete_contract", delete_contract);

        handlers.insert("list_operational_data", list_operational_data);
        handlers.insert("create_operational_data", create_operational_data);
        handlers.insert("update_operational_data", update_operational_data);
        handlers.insert("delete_operational_data", delete_operational_data);

        handlers.insert("get_mesh", get_mesh);
        handlers.insert("get_stats", get_stats);

        Self { handlers }
    }

    /// Registered action names, sorted
    pub fn actions(&self) -> Vec<&'static str> {
        let mut actions: Vec<&'static str> = self.handlers.keys().copied().collect();
        actions.sort_unstable();
        actions
    }

    pub fn dispatch(&self, state: &AppState, request: CommandRequest) -> CommandResponse {
        let Some(handler) = self.handlers.get(request.action.as_str()) else {
            log::warn!("Unknown action '{}'", request.action);
            return CommandResponse::validation(format!("Unknown action '{}'", request.action));
        };

        log::debug!("Dispatching '{}'", request.action);
        let response = handler(state, request.payload).into_response();
        log::debug!("'{}' -> {:?}", request.action, response.status);

        response
    }

    /// Parse and dispatch one JSON request line
    pub fn handle_line(&self, state: &AppState, line: &str) -> CommandResponse {
        match serde_json::from_str::<CommandRequest>(line) {
            Ok(request) => self.dispatch(state, request),
            Err(e) => {
                log::warn!("Malformed request: {}", e);
                CommandResponse::validation("Malformed request").with_details(e.to_string())
            }
        }
    }

    /// Dispatch one raw input line. Blank lines yield no response.
    pub fn handle_raw_line(&self, state: &AppState, raw: &[u8]) -> Option<CommandResponse> {
        match std::str::from_utf8(raw) {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(self.handle_line(state, line)),
            Err(e) => {
                log::warn!("Request is not valid UTF-8: {}", e);
                Some(CommandResponse::validation("Malformed request").with_details(e.to_string()))
            }
        }
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}

// src/application/commands/operational_data_commands.rs

use serde_json::Value;

use super::{parse_payload, to_data, update_response};
use crate::application::{dto::*, state::AppState};
use crate::error::AppResult;
use crate::services::{CreateOperationalDataRequest, UpdateOperationalDataRequest};

pub fn list_operational_data(state: &AppState, _payload: Value) -> AppResult<CommandResponse> {
    let items = state.operational_data_registry.list_operational_data()?;

    let dtos: Vec<OperationalDataDto> = items.into_iter().map(OperationalDataDto::from).collect();
    Ok(CommandResponse::ok(to_data(dtos)?))
}

pub fn create_operational_data(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let request: CreateOperationalDataRequest = parse_payload(payload)?;
    let id = state
        .operational_data_registry
        .create_operational_data(request)?;

    Ok(CommandResponse::created("Operational data created", id))
}

pub fn update_operational_data(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let request: UpdateOperationalDataRequest = parse_payload(payload)?;
    let id = request.id;
    let outcome = state
        .operational_data_registry
        .update_operational_data(request)?;

    Ok(update_response("Operational data", id, outcome))
}

pub fn delete_operational_data(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let IdPayload { id } = parse_payload(payload)?;
    state.operational_data_registry.delete_operational_data(id)?;

    Ok(CommandResponse::new(ResponseStatus::Ok, "Operational data deleted").with_id(id))
}

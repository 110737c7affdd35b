// src/application/commands/contract_commands.rs
//
// Contract Command Handlers

use serde_json::Value;

use super::{parse_payload, to_data, update_response};
use crate::application::{dto::*, state::AppState};
use crate::error::AppResult;
use crate::services::{CreateContractRequest, UpdateContractRequest};

pub fn list_contracts(state: &AppState, _payload: Value) -> AppResult<CommandResponse> {
    let contracts = state.contract_registry.list_contracts()?;

    let dtos: Vec<ContractDto> = contracts.into_iter().map(ContractDto::from).collect();
    Ok(CommandResponse::ok(to_data(dtos)?))
}

/// One contract with product, consumer and transfer names resolved
pub fn get_contract(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let IdPayload { id } = parse_payload(payload)?;
    let detail = state.contract_registry.get_contract(id)?;

    Ok(CommandResponse::ok(to_data(ContractDto::from(detail))?).with_id(id))
}

pub fn create_contract(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let request: CreateContractRequest = parse_payload(payload)?;
    let id = state.contract_registry.create_contract(request)?;

    Ok(CommandResponse::created("Contract created", id))
}

pub fn update_contract(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let request: UpdateContractRequest = parse_payload(payload)?;
    let id = request.id;
    let outcome = state.contract_registry.update_contract(request)?;

    Ok(update_response("Contract", id, outcome))
}

pub fn delete_contract(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let IdPayload { id } = parse_payload(payload)?;
    state.contract_registry.delete_contract(id)?;

    Ok(CommandResponse::new(ResponseStatus::Ok, "Contract deleted").with_id(id))
}

// src/application/commands/domain_commands.rs
//
// Domain Command Handlers
//
// RULES:
// - Parse the payload
// - Call the registry
// - Return DTOs
// - Never contain business logic

use serde_json::Value;

use super::{parse_payload, to_data, update_response};
use crate::application::{dto::*, state::AppState};
use crate::error::AppResult;
use crate::services::{CreateDomainRequest, UpdateDomainRequest};

/// List all domains with their parent's name
pub fn list_domains(state: &AppState, _payload: Value) -> AppResult<CommandResponse> {
    let domains = state.domain_registry.list_domains()?;

    let dtos: Vec<DomainDto> = domains.into_iter().map(DomainDto::from).collect();
    Ok(CommandResponse::ok(to_data(dtos)?))
}

pub fn get_domain(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let IdPayload { id } = parse_payload(payload)?;
    let domain = state.domain_registry.get_domain(id)?;

    Ok(CommandResponse::ok(to_data(DomainDto::from(domain))?).with_id(id))
}

pub fn create_domain(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let request: CreateDomainRequest = parse_payload(payload)?;
    let id = state.domain_registry.create_domain(request)?;

    Ok(CommandResponse::created("Domain created", id))
}

pub fn update_domain(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let request: UpdateDomainRequest = parse_payload(payload)?;
    let id = request.id;
    let outcome = state.domain_registry.update_domain(request)?;

    Ok(update_response("Domain", id, outcome))
}

pub fn delete_domain(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let IdPayload { id } = parse_payload(payload)?;
    state.domain_registry.delete_domain(id)?;

    Ok(CommandResponse::new(ResponseStatus::Ok, "Domain deleted").with_id(id))
}

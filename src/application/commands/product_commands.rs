// src/application/commands/product_commands.rs
//
// Product Command Handlers

use serde_json::{json, Value};

use super::{parse_payload, to_data, update_response};
use crate::application::{dto::*, state::AppState};
use crate::domain::generate_external_id;
use crate::error::AppResult;
use crate::services::{CreateProductRequest, UpdateProductRequest};

/// List all products with their owner's name
pub fn list_products(state: &AppState, _payload: Value) -> AppResult<CommandResponse> {
    let products = state.product_registry.list_products()?;

    let dtos: Vec<ProductDto> = products.into_iter().map(ProductDto::from).collect();
    Ok(CommandResponse::ok(to_data(dtos)?))
}

pub fn get_product(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let IdPayload { id } = parse_payload(payload)?;
    let product = state.product_registry.get_product(id)?;

    Ok(CommandResponse::ok(to_data(ProductDto::from(product))?).with_id(id))
}

pub fn create_product(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let request: CreateProductRequest = parse_payload(payload)?;
    let id = state.product_registry.create_product(request)?;

    Ok(CommandResponse::created("Product created", id))
}

/// archetype and external_id in the payload are accepted and ignored
pub fn update_product(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let request: UpdateProductRequest = parse_payload(payload)?;
    let id = request.id;
    let outcome = state.product_registry.update_product(request)?;

    Ok(update_response("Product", id, outcome))
}

/// Deletes the product's contracts along with it
pub fn delete_product(state: &AppState, payload: Value) -> AppResult<CommandResponse> {
    let IdPayload { id } = parse_payload(payload)?;
    state.product_registry.delete_product(id)?;

    Ok(CommandResponse::new(ResponseStatus::Ok, "Product deleted").with_id(id))
}

/// A fresh identifier for a product about to be created
pub fn generate_product_external_id(_state: &AppState, _payload: Value) -> AppResult<CommandResponse> {
    Ok(CommandResponse::ok(json!({ "external_id": generate_external_id() })))
}

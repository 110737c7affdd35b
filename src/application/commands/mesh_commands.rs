// src/application/commands/mesh_commands.rs

use serde_json::Value;

use super::to_data;
use crate::application::{dto::*, state::AppState};
use crate::error::AppResult;

/// Nodes and edges of the whole catalog
pub fn get_mesh(state: &AppState, _payload: Value) -> AppResult<CommandResponse> {
    let graph = state.mesh_service.build_mesh()?;

    Ok(CommandResponse::ok(to_data(graph)?))
}

/// Store size and row counts
pub fn get_stats(state: &AppState, _payload: Value) -> AppResult<CommandResponse> {
    let stats = state.mesh_service.get_stats()?;

    Ok(CommandResponse::ok(to_data(stats)?))
}

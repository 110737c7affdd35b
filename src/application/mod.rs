// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE the registries
// - It is the boundary between callers (JSON requests) and services
// - It translates between payloads, DTOs and domain entities
// - It maps every error onto a response status

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::{CommandHandler, CommandRouter};
pub use dto::*;
pub use error_handling::{error_response, IntoCommandResponse};
pub use state::AppState;

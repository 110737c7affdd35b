// src/events/handlers/mod.rs
//
// Event Handlers - INTERNAL MODULE
//
// Handlers use closure-based subscription via EventBus::subscribe.
// Only registration functions are exported.

pub mod audit_handler;

pub use audit_handler::register_audit_handlers;

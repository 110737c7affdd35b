// src/events/handlers/audit_handler.rs
//
// Audit trail: every catalog event becomes one log line.
//
// Handlers only log. They hold no state and never call back into registries.

use crate::events::types::{
    ContractsCascaded, EntityCreated, EntityDeleted, EntityUpdated, SelfConsumptionDetected,
};
use crate::events::EventBus;

/// Registers the audit handlers with the event bus.
pub fn register_audit_handlers(bus: &EventBus) {
    bus.subscribe::<EntityCreated, _>(|event| {
        log::info!(
            "[AUDIT] {} {} created ('{}')",
            event.entity,
            event.entity_id,
            event.name
        );
    });

    bus.subscribe::<EntityUpdated, _>(|event| {
        log::info!("[AUDIT] {} {} updated", event.entity, event.entity_id);
    });

    bus.subscribe::<EntityDeleted, _>(|event| {
        log::info!("[AUDIT] {} {} deleted", event.entity, event.entity_id);
    });

    bus.subscribe::<SelfConsumptionDetected, _>(|event| {
        log::warn!(
            "[AUDIT] Contract {} lets domain {} consume its own product {}",
            event.contract_id,
            event.domain_id,
            event.product_id
        );
    });

    bus.subscribe::<ContractsCascaded, _>(|event| {
        log::warn!(
            "[AUDIT] Deleting product {} removed {} contract(s)",
            event.product_id,
            event.removed
        );
    });

    log::debug!("[AUDIT] Handlers registered");
}

// src/events/types.rs
//
// Catalog events.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ContractId, DomainId, ProductId};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ident) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($event) }
        }
    };
}

/// Which registry an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEntity {
    Domain,
    Product,
    Contract,
    OperationalData,
}

impl std::fmt::Display for CatalogEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CatalogEntity::Domain => "Domain",
            CatalogEntity::Product => "Product",
            CatalogEntity::Contract => "Contract",
            CatalogEntity::OperationalData => "OperationalData",
        };
        f.write_str(name)
    }
}

// ============================================================================
// LIFECYCLE EVENTS
// ============================================================================

/// Emitted after a row was inserted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entity: CatalogEntity,
    pub entity_id: i64,
    pub name: String,
}

impl EntityCreated {
    pub fn new(entity: CatalogEntity, entity_id: i64, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entity,
            entity_id,
            name,
        }
    }
}

impl_domain_event!(EntityCreated);

/// Emitted after an update that actually changed the row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entity: CatalogEntity,
    pub entity_id: i64,
}

impl EntityUpdated {
    pub fn new(entity: CatalogEntity, entity_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entity,
            entity_id,
        }
    }
}

impl_domain_event!(EntityUpdated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entity: CatalogEntity,
    pub entity_id: i64,
}

impl EntityDeleted {
    pub fn new(entity: CatalogEntity, entity_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entity,
            entity_id,
        }
    }
}

impl_domain_event!(EntityDeleted);

// ============================================================================
// CONTRACT EVENTS
// ============================================================================

/// A contract was created whose consumer also owns the product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfConsumptionDetected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub contract_id: ContractId,
    pub product_id: ProductId,
    pub domain_id: DomainId,
}

impl SelfConsumptionDetected {
    pub fn new(contract_id: ContractId, product_id: ProductId, domain_id: DomainId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            contract_id,
            product_id,
            domain_id,
        }
    }
}

impl_domain_event!(SelfConsumptionDetected);

/// Contracts removed by the store together with their product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractsCascaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub product_id: ProductId,
    pub removed: u64,
}

impl ContractsCascaded {
    pub fn new(product_id: ProductId, removed: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            product_id,
            removed,
        }
    }
}

impl_domain_event!(ContractsCascaded);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(EntityCreated::new(CatalogEntity::Product, 1, "x".into()).event_type(), "EntityCreated");
        assert_eq!(SelfConsumptionDetected::new(1, 2, 3).event_type(), "SelfConsumptionDetected");
        assert_eq!(CatalogEntity::OperationalData.to_string(), "OperationalData");
    }

    #[test]
    fn test_each_event_gets_its_own_id() {
        let a = EntityDeleted::new(CatalogEntity::Domain, 1);
        let b = EntityDeleted::new(CatalogEntity::Domain, 1);
        assert_ne!(a.event_id(), b.event_id());
    }
}

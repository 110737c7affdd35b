// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::events::{create_event_bus, register_audit_handlers, EventBus};
use crate::repositories::{
    ContractRepository, DomainRepository, OperationalDataRepository, ProductRepository,
    SqliteContractRepository, SqliteDomainRepository, SqliteOperationalDataRepository,
    SqliteProductRepository,
};
use crate::services::{
    ContractRegistry, DomainRegistry, MeshService, OperationalDataRegistry, ProductRegistry,
};

/// Everything a command handler can reach.
/// All fields are Arc-wrapped so the state can be shared across threads.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub domain_registry: Arc<DomainRegistry>,
    pub product_registry: Arc<ProductRegistry>,
    pub contract_registry: Arc<ContractRegistry>,
    pub operational_data_registry: Arc<OperationalDataRegistry>,
    pub mesh_service: Arc<MeshService>,
}

impl AppState {
    /// Wire repositories, the event bus and the registries over one pool.
    ///
    /// The schema must already be initialized on `pool`.
    pub fn build(pool: Arc<ConnectionPool>) -> Self {
        let event_bus = Arc::new(create_event_bus());
        register_audit_handlers(&event_bus);

        // Arc<dyn Trait> to match the registry constructors
        let domain_repo: Arc<dyn DomainRepository> =
            Arc::new(SqliteDomainRepository::new(pool.clone()));
        let product_repo: Arc<dyn ProductRepository> =
            Arc::new(SqliteProductRepository::new(pool.clone()));
        let contract_repo: Arc<dyn ContractRepository> =
            Arc::new(SqliteContractRepository::new(pool.clone()));
        let operational_data_repo: Arc<dyn OperationalDataRepository> =
            Arc::new(SqliteOperationalDataRepository::new(pool.clone()));

        let domain_registry = Arc::new(DomainRegistry::new(
            domain_repo.clone(),
            product_repo.clone(),
            contract_repo.clone(),
            event_bus.clone(),
        ));
        let product_registry = Arc::new(ProductRegistry::new(
            product_repo.clone(),
            domain_repo.clone(),
            contract_repo.clone(),
            event_bus.clone(),
        ));
        let contract_registry = Arc::new(ContractRegistry::new(
            contract_repo.clone(),
            product_repo.clone(),
            domain_repo.clone(),
            event_bus.clone(),
        ));
        let operational_data_registry = Arc::new(OperationalDataRegistry::new(
            operational_data_repo,
            event_bus.clone(),
        ));
        let mesh_service = Arc::new(MeshService::new(
            domain_repo,
            product_repo,
            contract_repo,
            pool,
        ));

        log::debug!("Application state ready");

        Self {
            event_bus,
            domain_registry,
            product_registry,
            contract_registry,
            operational_data_registry,
            mesh_service,
        }
    }
}

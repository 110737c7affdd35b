// src/services/test_support.rs
//
// A complete catalog over a temporary SQLite file, wired the way AppState
// wires it, plus shorthand for the common fixtures.

use std::sync::Arc;

use tempfile::TempDir;

use crate::db::test_support::test_pool;
use crate::db::ConnectionPool;
use crate::domain::{ContractId, DomainId, ProductId};
use crate::error::AppError;
use crate::events::EventBus;
use crate::repositories::{
    SqliteContractRepository, SqliteDomainRepository, SqliteOperationalDataRepository,
    SqliteProductRepository,
};
use crate::services::{
    ContractRegistry, CreateContractRequest, CreateDomainRequest, CreateProductRequest,
    DomainRegistry, MeshService, OperationalDataRegistry, ProductRegistry,
};

pub struct Catalog {
    _dir: TempDir,
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub domains: DomainRegistry,
    pub products: ProductRegistry,
    pub contracts: ContractRegistry,
    pub operational_data: OperationalDataRegistry,
    pub mesh: MeshService,
}

impl Catalog {
    pub fn new() -> Self {
        let (dir, pool) = test_pool();
        let event_bus = Arc::new(EventBus::new());

        let domain_repo = Arc::new(SqliteDomainRepository::new(pool.clone()));
        let product_repo = Arc::new(SqliteProductRepository::new(pool.clone()));
        let contract_repo = Arc::new(SqliteContractRepository::new(pool.clone()));
        let operational_repo = Arc::new(SqliteOperationalDataRepository::new(pool.clone()));

        Self {
            _dir: dir,
            domains: DomainRegistry::new(
                domain_repo.clone(),
                product_repo.clone(),
                contract_repo.clone(),
                event_bus.clone(),
            ),
            products: ProductRegistry::new(
                product_repo.clone(),
                domain_repo.clone(),
                contract_repo.clone(),
                event_bus.clone(),
            ),
            contracts: ContractRegistry::new(
                contract_repo.clone(),
                product_repo.clone(),
                domain_repo.clone(),
                event_bus.clone(),
            ),
            operational_data: OperationalDataRegistry::new(operational_repo, event_bus.clone()),
            mesh: MeshService::new(domain_repo, product_repo, contract_repo, pool.clone()),
            pool,
            event_bus,
        }
    }

    pub fn domain_request(name: &str, external_id: &str, kind: &str) -> CreateDomainRequest {
        CreateDomainRequest {
            name: Some(name.to_string()),
            description: Some(format!("{} domain", name)),
            external_id: Some(external_id.to_string()),
            parent_id: None,
            kind: Some(kind.to_string()),
        }
    }

    pub fn product_request(owner_id: DomainId, external_id: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: Some("Campaigns".to_string()),
            description: None,
            owner_id: Some(owner_id),
            archetype: Some("Source-aligned".to_string()),
            external_id: Some(external_id.to_string()),
            status: Some("Development".to_string()),
            tags: None,
        }
    }

    pub fn contract_request(product_id: ProductId, consumer_id: DomainId) -> CreateContractRequest {
        CreateContractRequest {
            product_id: Some(product_id),
            consumer_id: Some(consumer_id),
            name: Some("Campaign feed".to_string()),
            ..Default::default()
        }
    }

    /// Marketing ("mkt", Domain) and Engineering ("eng", Team, child of Marketing)
    pub fn two_domains(&self) -> (DomainId, DomainId) {
        let mkt = self
            .domains
            .create_domain(Self::domain_request("Marketing", "mkt", "Domain"))
            .unwrap();
        let eng = self
            .domains
            .create_domain(CreateDomainRequest {
                parent_id: Some(mkt),
                ..Self::domain_request("Engineering", "eng", "Team")
            })
            .unwrap();
        (mkt, eng)
    }

    pub fn product(&self, owner_id: DomainId, external_id: &str) -> ProductId {
        self.products
            .create_product(Self::product_request(owner_id, external_id))
            .unwrap()
    }

    pub fn contract(&self, product_id: ProductId, consumer_id: DomainId) -> ContractId {
        self.contracts
            .create_contract(Self::contract_request(product_id, consumer_id))
            .unwrap()
    }
}

fn failed_statement(setup: &str, sql: &str) -> AppError {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    conn.execute_batch(setup).unwrap();
    AppError::Database(conn.execute(sql, []).unwrap_err())
}

/// The error SQLite raises when a still-referenced parent row is deleted
pub fn referenced_delete_failure(on_delete: &str) -> AppError {
    failed_statement(
        &format!(
            "CREATE TABLE parent (id INTEGER PRIMARY KEY);
             CREATE TABLE child (parent_id INTEGER NOT NULL REFERENCES parent(id) {});
             INSERT INTO parent VALUES (1); INSERT INTO child VALUES (1);",
            on_delete
        ),
        "DELETE FROM parent WHERE id = 1",
    )
}

/// The error SQLite raises when a row points at a parent that is gone
pub fn missing_parent_failure() -> AppError {
    failed_statement(
        "CREATE TABLE parent (id INTEGER PRIMARY KEY);
         CREATE TABLE child (parent_id INTEGER NOT NULL REFERENCES parent(id));",
        "INSERT INTO child VALUES (42)",
    )
}

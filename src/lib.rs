// src/lib.rs
// Datamesh Registry - catalog of domains, data products and contracts
//
// Architecture:
// - Domain-centric: entity rules and invariants live in `domain`
// - Registries own every write: validation, reference checks, events
// - Repositories are dumb SQL mappers; the store constraints have the last word
// - Application layer: JSON request/response boundary

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    build_mesh_graph,
    generate_external_id,
    // Contract
    Contract,
    ContractDetail,
    ContractId,
    ContractSummary,
    ContractTerms,
    DataType,
    // Domain
    Domain,
    DomainError,
    DomainId,
    DomainKind,
    DomainSummary,
    // Mesh
    MeshGraph,
    // Operational Data
    OperationalData,
    OperationalDataId,
    // Product
    Product,
    ProductId,
    ProductStatus,
    ProductSummary,
    UpdateOutcome,
};

// ============================================================================
// PUBLIC API - Configuration & Errors
// ============================================================================

pub use config::StoreConfig;
pub use error::{AppError, AppResult, ErrorKind};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    register_audit_handlers,
    CatalogEntity,
    ContractsCascaded,
    DomainEvent,
    EntityCreated,
    EntityDeleted,
    EntityUpdated,
    EventBus,
    EventLogEntry,
    SelfConsumptionDetected,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool, DatabaseStats};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    ContractRepository,
    DomainRepository,
    OperationalDataRepository,
    ProductRepository,
    SqliteContractRepository,
    SqliteDomainRepository,
    SqliteOperationalDataRepository,
    SqliteProductRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    ContractRegistry,
    CreateContractRequest,
    CreateDomainRequest,
    CreateOperationalDataRequest,
    CreateProductRequest,
    DomainRegistry,
    MeshService,
    OperationalDataRegistry,
    ProductRegistry,
    UpdateContractRequest,
    UpdateDomainRequest,
    UpdateOperationalDataRequest,
    UpdateProductRequest,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, CommandRequest, CommandResponse, CommandRouter, ResponseStatus};

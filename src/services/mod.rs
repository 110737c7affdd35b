// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Registries own the catalog rules: validation, reference and uniqueness
// checks, error classification and event emission.

pub mod contract_registry;
pub mod domain_registry;
pub mod mesh_service;
pub mod operational_data_registry;
pub mod product_registry;

mod store_guard;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod catalog_property_tests;

pub use contract_registry::{ContractRegistry, CreateContractRequest, UpdateContractRequest};

pub use domain_registry::{CreateDomainRequest, DomainRegistry, UpdateDomainRequest};

pub use mesh_service::MeshService;

pub use operational_data_registry::{
    CreateOperationalDataRequest, OperationalDataRegistry, UpdateOperationalDataRequest,
};

pub use product_registry::{CreateProductRequest, ProductRegistry, UpdateProductRequest};

// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only
//
// Update and delete report whether a row matched; registries decide what
// a miss means.

pub mod contract_repository;
pub mod domain_repository;
pub mod operational_data_repository;
pub mod product_repository;

pub use contract_repository::{ContractRepository, SqliteContractRepository};
pub use domain_repository::{DomainRepository, SqliteDomainRepository};
pub use operational_data_repository::{OperationalDataRepository, SqliteOperationalDataRepository};
pub use product_repository::{ProductRepository, SqliteProductRepository};

#[cfg(test)]
pub use contract_repository::MockContractRepository;
#[cfg(test)]
pub use domain_repository::MockDomainRepository;
#[cfg(test)]
pub use operational_data_repository::MockOperationalDataRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;

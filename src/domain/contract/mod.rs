pub mod entity;
pub mod invariants;

pub use entity::{
    Contract, ContractChanges, ContractDetail, ContractDraft, ContractId, ContractSummary,
    ContractTerms,
};

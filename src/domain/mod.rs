// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all catalog entity modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod contract;
pub mod data_domain;
pub mod mesh;
pub mod operational_data;
pub mod product;
pub mod rules;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Domain (organizational unit or team)
pub use data_domain::{
    ensure_acyclic, ensure_not_self_parent, Domain, DomainDraft, DomainId, DomainKind,
    DomainSummary,
};

// Data Product
pub use product::{
    generate_external_id, Product, ProductChanges, ProductDraft, ProductId, ProductStatus,
    ProductSummary,
};

// Contract
pub use contract::{
    Contract, ContractChanges, ContractDetail, ContractDraft, ContractId, ContractSummary,
    ContractTerms,
};

// Operational Data
pub use operational_data::{DataType, OperationalData, OperationalDataDraft, OperationalDataId};

// Mesh projection
pub use mesh::{build_mesh_graph, EdgeRelation, MeshEdge, MeshGraph, MeshNode, NodeKind};

// Validation
pub use rules::{ruleset_for, FieldSource, FieldValue, Operation, Rule, RuleSet};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use serde::Serialize;
use thiserror::Error;

/// Domain-level errors
/// These represent malformed input and violations of catalog invariants
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Field '{0}' is required")]
    MissingField(String),

    #[error("Field '{field}' {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Domain {0} cannot be its own parent")]
    SelfParent(DomainId),

    #[error("Assigning parent {parent} to domain {domain} would create a hierarchy cycle")]
    HierarchyCycle { domain: DomainId, parent: DomainId },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Result of an update that passed validation and found its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    Updated,
    Unchanged,
}

/// Trim required text
pub(crate) fn normalize_text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Trim optional text; blank becomes None
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Take a field the rule set already required
pub(crate) fn required<T>(value: Option<T>, field: &str) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::MissingField(field.to_string()))
}

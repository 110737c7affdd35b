use super::entity::{DomainId, DomainKind};
use crate::domain::rules::{FieldRules, Operation, Rule, RuleSet};
use crate::domain::{DomainError, DomainResult};

const KIND_RULES: &[Rule] = &[Rule::Required, Rule::OneOf(DomainKind::NAMES)];

pub static DOMAIN_CREATE: RuleSet = RuleSet {
    entity: "Domain",
    operation: Operation::Create,
    fields: &[
        FieldRules { field: "name", rules: &[Rule::Required] },
        FieldRules { field: "external_id", rules: &[Rule::Required] },
        FieldRules { field: "kind", rules: KIND_RULES },
    ],
};

pub static DOMAIN_UPDATE: RuleSet = RuleSet {
    entity: "Domain",
    operation: Operation::Update,
    fields: &[
        FieldRules { field: "id", rules: &[Rule::Required] },
        FieldRules { field: "name", rules: &[Rule::Required] },
        FieldRules { field: "external_id", rules: &[Rule::Required] },
        FieldRules { field: "kind", rules: KIND_RULES },
    ],
};

/// A domain can never be its own parent
pub fn ensure_not_self_parent(id: DomainId, parent_id: Option<DomainId>) -> DomainResult<()> {
    if parent_id == Some(id) {
        return Err(DomainError::SelfParent(id));
    }
    Ok(())
}

/// `ancestry` is the chain above the proposed parent, walking up.
/// If the domain being re-parented appears in it, the assignment closes a loop.
pub fn ensure_acyclic(id: DomainId, parent_id: DomainId, ancestry: &[DomainId]) -> DomainResult<()> {
    if ancestry.contains(&id) {
        return Err(DomainError::HierarchyCycle {
            domain: id,
            parent: parent_id,
        });
    }
    Ok(())
}

// Domain invariants:
//
// 1. external_id is unique across all domains (store UNIQUE is authoritative)
// 2. name and external_id are non-empty after trimming
// 3. kind is Domain or Team
// 4. parent, if present, exists and is not the domain itself
// 5. the parent chain never loops back to the domain
// 6. a domain that owns products or consumes through contracts cannot be deleted

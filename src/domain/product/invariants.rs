use super::entity::ProductStatus;
use crate::domain::rules::{FieldRules, Operation, Rule, RuleSet};

pub static PRODUCT_CREATE: RuleSet = RuleSet {
    entity: "Product",
    operation: Operation::Create,
    fields: &[
        FieldRules { field: "name", rules: &[Rule::Required] },
        FieldRules { field: "owner_id", rules: &[Rule::Required] },
        FieldRules { field: "archetype", rules: &[Rule::Required] },
        FieldRules { field: "external_id", rules: &[Rule::Required] },
        FieldRules { field: "status", rules: &[Rule::OneOf(ProductStatus::NAMES)] },
    ],
};

/// archetype and external_id are accepted on update but never checked or stored
pub static PRODUCT_UPDATE: RuleSet = RuleSet {
    entity: "Product",
    operation: Operation::Update,
    fields: &[
        FieldRules { field: "id", rules: &[Rule::Required] },
        FieldRules { field: "name", rules: &[Rule::Required] },
        FieldRules { field: "owner_id", rules: &[Rule::Required] },
        FieldRules { field: "status", rules: &[Rule::OneOf(ProductStatus::NAMES)] },
    ],
};

// Product invariants:
//
// 1. external_id is unique across all products
// 2. owner must be an existing domain
// 3. name, owner, archetype and external_id are required at creation
// 4. archetype and external_id never change after creation
// 5. status, when set, is one of the closed enumeration
// 6. deleting a product removes its contracts

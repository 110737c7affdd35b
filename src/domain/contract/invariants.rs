use crate::domain::rules::{FieldRules, Operation, Rule, RuleSet};

pub static CONTRACT_CREATE: RuleSet = RuleSet {
    entity: "Contract",
    operation: Operation::Create,
    fields: &[
        FieldRules { field: "product_id", rules: &[Rule::Required] },
        FieldRules { field: "consumer_id", rules: &[Rule::Required] },
        FieldRules { field: "name", rules: &[Rule::Required] },
        FieldRules { field: "price_amount", rules: &[Rule::NonNegative] },
    ],
};

pub static CONTRACT_UPDATE: RuleSet = RuleSet {
    entity: "Contract",
    operation: Operation::Update,
    fields: &[
        FieldRules { field: "id", rules: &[Rule::Required] },
        FieldRules { field: "name", rules: &[Rule::Required] },
        FieldRules { field: "price_amount", rules: &[Rule::NonNegative] },
    ],
};

// Contract invariants:
//
// 1. at most one contract per (product, consumer) pair
// 2. product, consumer and transfer domain must exist
// 3. product and consumer never change after creation
// 4. a domain may consume its own product; this is logged, not rejected

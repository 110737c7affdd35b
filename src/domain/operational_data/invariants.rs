use super::entity::DataType;
use crate::domain::rules::{FieldRules, Operation, Rule, RuleSet};

const NAME_RULES: &[Rule] = &[Rule::Required, Rule::MaxChars(100)];
const DATA_TYPE_RULES: &[Rule] = &[Rule::Required, Rule::OneOf(DataType::NAMES)];
const LENGTH_RULES: &[Rule] = &[Rule::NonNegative];
const DESCRIPTION_RULES: &[Rule] = &[Rule::MaxChars(300)];
const BUSINESS_RULE_RULES: &[Rule] = &[Rule::MaxChars(500)];

pub static OPERATIONAL_DATA_CREATE: RuleSet = RuleSet {
    entity: "OperationalData",
    operation: Operation::Create,
    fields: &[
        FieldRules { field: "name", rules: NAME_RULES },
        FieldRules { field: "data_type", rules: DATA_TYPE_RULES },
        FieldRules { field: "length", rules: LENGTH_RULES },
        FieldRules { field: "description", rules: DESCRIPTION_RULES },
        FieldRules { field: "business_rule", rules: BUSINESS_RULE_RULES },
    ],
};

pub static OPERATIONAL_DATA_UPDATE: RuleSet = RuleSet {
    entity: "OperationalData",
    operation: Operation::Update,
    fields: &[
        FieldRules { field: "id", rules: &[Rule::Required] },
        FieldRules { field: "name", rules: NAME_RULES },
        FieldRules { field: "data_type", rules: DATA_TYPE_RULES },
        FieldRules { field: "length", rules: LENGTH_RULES },
        FieldRules { field: "description", rules: DESCRIPTION_RULES },
        FieldRules { field: "business_rule", rules: BUSINESS_RULE_RULES },
    ],
};

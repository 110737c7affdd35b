// src/domain/rules.rs
//
// Declarative validation rule sets
//
// Each entity declares one RuleSet per write operation in its invariants
// module. Registries run the matching set against the raw request before
// touching the store, so every operation validates the same way.

use super::{DomainError, DomainResult};

/// Raw value of one request field as seen by the rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Absent,
    Text(&'a str),
    Integer(i64),
    Decimal(f64),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a Option<String>) -> Self {
        value.as_deref().map_or(FieldValue::Absent, FieldValue::Text)
    }

    pub fn integer(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Integer)
    }

    pub fn decimal(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Decimal)
    }
}

/// Anything a rule set can be checked against
pub trait FieldSource {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present and, for text, non-empty after trimming
    Required,
    /// Text must be one of the listed values; blank counts as unset
    OneOf(&'static [&'static str]),
    /// Trimmed text length limit in characters
    MaxChars(usize),
    /// Numbers must be zero or greater
    NonNegative,
}

#[derive(Debug)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

#[derive(Debug)]
pub struct RuleSet {
    pub entity: &'static str,
    pub operation: Operation,
    pub fields: &'static [FieldRules],
}

impl RuleSet {
    /// Check every field in declaration order; the first violation wins.
    pub fn check<S: FieldSource + ?Sized>(&self, source: &S) -> DomainResult<()> {
        for field_rules in self.fields {
            let value = source.field(field_rules.field);
            for rule in field_rules.rules {
                rule.apply(field_rules.field, value)?;
            }
        }
        Ok(())
    }
}

impl Rule {
    fn apply(&self, field: &str, value: FieldValue<'_>) -> DomainResult<()> {
        match (self, value) {
            (Rule::Required, FieldValue::Absent) => {
                Err(DomainError::MissingField(field.to_string()))
            }
            (Rule::Required, FieldValue::Text(text)) if text.trim().is_empty() => {
                Err(DomainError::MissingField(field.to_string()))
            }
            (Rule::OneOf(allowed), FieldValue::Text(text))
                if !text.trim().is_empty() && !allowed.contains(&text.trim()) =>
            {
                Err(invalid(field, format!("must be one of: {}", allowed.join(", "))))
            }
            (Rule::MaxChars(max), FieldValue::Text(text)) if text.trim().chars().count() > *max => {
                Err(invalid(field, format!("must be at most {} characters", max)))
            }
            (Rule::NonNegative, FieldValue::Integer(n)) if n < 0 => {
                Err(invalid(field, "must not be negative".to_string()))
            }
            (Rule::NonNegative, FieldValue::Decimal(n)) if !n.is_finite() || n < 0.0 => {
                Err(invalid(field, "must be a finite number not below zero".to_string()))
            }
            _ => Ok(()),
        }
    }
}

fn invalid(field: &str, reason: String) -> DomainError {
    DomainError::InvalidField {
        field: field.to_string(),
        reason,
    }
}

static REGISTRY: &[&RuleSet] = &[
    &super::data_domain::invariants::DOMAIN_CREATE,
    &super::data_domain::invariants::DOMAIN_UPDATE,
    &super::product::invariants::PRODUCT_CREATE,
    &super::product::invariants::PRODUCT_UPDATE,
    &super::contract::invariants::CONTRACT_CREATE,
    &super::contract::invariants::CONTRACT_UPDATE,
    &super::operational_data::invariants::OPERATIONAL_DATA_CREATE,
    &super::operational_data::invariants::OPERATIONAL_DATA_UPDATE,
];

/// Look up the rule set for an entity write
pub fn ruleset_for(entity: &str, operation: Operation) -> Option<&'static RuleSet> {
    REGISTRY
        .iter()
        .copied()
        .find(|set| set.entity == entity && set.operation == operation)
}

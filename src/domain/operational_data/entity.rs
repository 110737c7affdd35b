use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{normalize_optional, normalize_text, DomainError};

pub type OperationalDataId = i64;

/// An operational data element with its type and the business rule behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalData {
    pub id: OperationalDataId,
    pub name: String,
    pub data_type: DataType,
    pub length: Option<u32>,
    pub description: Option<String>,
    pub business_rule: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Text,
    Numeric,
}

impl DataType {
    pub const NAMES: &'static [&'static str] = &["Text", "Numeric"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "Text",
            DataType::Numeric => "Numeric",
        }
    }
}

impl FromStr for DataType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Text" => Ok(DataType::Text),
            "Numeric" => Ok(DataType::Numeric),
            other => Err(DomainError::InvalidField {
                field: "data_type".to_string(),
                reason: format!("'{}' is not one of: {}", other, Self::NAMES.join(", ")),
            }),
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationalDataDraft {
    pub name: String,
    pub data_type: DataType,
    pub length: Option<u32>,
    pub description: Option<String>,
    pub business_rule: Option<String>,
}

impl OperationalDataDraft {
    pub fn new(
        name: Option<String>,
        data_type: DataType,
        length: Option<u32>,
        description: Option<String>,
        business_rule: Option<String>,
    ) -> Self {
        Self {
            name: normalize_text(name),
            data_type,
            length,
            description: normalize_optional(description),
            business_rule: normalize_optional(business_rule),
        }
    }
}

impl OperationalData {
    pub fn from_draft(id: OperationalDataId, draft: OperationalDataDraft) -> Self {
        Self {
            id,
            name: draft.name,
            data_type: draft.data_type,
            length: draft.length,
            description: draft.description,
            business_rule: draft.business_rule,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::{normalize_optional, normalize_text, DomainError, DomainId};

pub type ProductId = i64;

/// A published data asset owned by exactly one Domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    pub name: String,

    pub description: Option<String>,

    /// Creation timestamp, never changes
    pub created_at: DateTime<Utc>,

    /// Owning domain
    pub owner_id: DomainId,

    /// Archetype tag ("Source-aligned", "Aggregate", ...). Immutable.
    pub archetype: String,

    /// Client-generated unique identifier. Immutable.
    pub external_id: String,

    pub status: Option<ProductStatus>,

    /// Free-text tags
    pub tags: Option<String>,
}

/// Lifecycle status. Any value may be set at any time; there are no
/// transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Development,
    Testing,
    Production,
    Deprecated,
    Archived,
}

impl ProductStatus {
    pub const NAMES: &'static [&'static str] =
        &["Development", "Testing", "Production", "Deprecated", "Archived"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Development => "Development",
            ProductStatus::Testing => "Testing",
            ProductStatus::Production => "Production",
            ProductStatus::Deprecated => "Deprecated",
            ProductStatus::Archived => "Archived",
        }
    }

    /// Blank input means "no status"
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, DomainError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => v.parse().map(Some),
            None => Ok(None),
        }
    }
}

impl FromStr for ProductStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Development" => Ok(ProductStatus::Development),
            "Testing" => Ok(ProductStatus::Testing),
            "Production" => Ok(ProductStatus::Production),
            "Deprecated" => Ok(ProductStatus::Deprecated),
            "Archived" => Ok(ProductStatus::Archived),
            other => Err(DomainError::InvalidField {
                field: "status".to_string(),
                reason: format!("'{}' is not one of: {}", other, Self::NAMES.join(", ")),
            }),
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fresh identifier for callers that do not generate their own
pub fn generate_external_id() -> String {
    Uuid::new_v4().to_string()
}

/// Everything needed to create a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub owner_id: DomainId,
    pub archetype: String,
    pub external_id: String,
    pub status: Option<ProductStatus>,
    pub tags: Option<String>,
}

impl ProductDraft {
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        owner_id: DomainId,
        archetype: Option<String>,
        external_id: Option<String>,
        status: Option<ProductStatus>,
        tags: Option<String>,
    ) -> Self {
        Self {
            name: normalize_text(name),
            description: normalize_optional(description),
            created_at: Utc::now(),
            owner_id,
            archetype: normalize_text(archetype),
            external_id: normalize_text(external_id),
            status,
            tags: normalize_optional(tags),
        }
    }
}

/// The mutable subset of a product. Archetype and external_id are absent
/// on purpose: they cannot be expressed as a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: DomainId,
    pub status: Option<ProductStatus>,
    pub tags: Option<String>,
}

impl ProductChanges {
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        owner_id: DomainId,
        status: Option<ProductStatus>,
        tags: Option<String>,
    ) -> Self {
        Self {
            name: normalize_text(name),
            description: normalize_optional(description),
            owner_id,
            status,
            tags: normalize_optional(tags),
        }
    }
}

impl Product {
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            created_at: draft.created_at,
            owner_id: draft.owner_id,
            archetype: draft.archetype,
            external_id: draft.external_id,
            status: draft.status,
            tags: draft.tags,
        }
    }

    pub fn with_changes(&self, changes: ProductChanges) -> Self {
        Self {
            name: changes.name,
            description: changes.description,
            owner_id: changes.owner_id,
            status: changes.status,
            tags: changes.tags,
            ..self.clone()
        }
    }
}

/// List projection: a product with its owner's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub product: Product,
    pub owner_name: String,
}

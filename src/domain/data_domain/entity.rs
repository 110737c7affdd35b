use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{normalize_text, DomainError};

pub type DomainId = i64;

/// An organizational unit or team that owns and consumes data products.
/// Domains form a hierarchy through an optional parent reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Surrogate identity assigned by the store
    pub id: DomainId,

    /// Display name (non-empty, trimmed)
    pub name: String,

    /// Free-text description, may be empty
    pub description: String,

    /// Globally unique external identifier
    pub external_id: String,

    /// Parent domain, never the domain itself
    pub parent_id: Option<DomainId>,

    pub kind: DomainKind,
}

/// Entity-kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainKind {
    Domain,
    Team,
}

impl DomainKind {
    pub const NAMES: &'static [&'static str] = &["Domain", "Team"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainKind::Domain => "Domain",
            DomainKind::Team => "Team",
        }
    }
}

impl FromStr for DomainKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Domain" => Ok(DomainKind::Domain),
            "Team" => Ok(DomainKind::Team),
            other => Err(DomainError::InvalidField {
                field: "kind".to_string(),
                reason: format!("'{}' is not one of: {}", other, Self::NAMES.join(", ")),
            }),
        }
    }
}

impl std::fmt::Display for DomainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The writable attributes of a Domain, normalized and ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainDraft {
    pub name: String,
    pub description: String,
    pub external_id: String,
    pub parent_id: Option<DomainId>,
    pub kind: DomainKind,
}

impl DomainDraft {
    /// Trims all text. Validation happens before this is built.
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        external_id: Option<String>,
        parent_id: Option<DomainId>,
        kind: DomainKind,
    ) -> Self {
        Self {
            name: normalize_text(name),
            description: normalize_text(description),
            external_id: normalize_text(external_id),
            parent_id,
            kind,
        }
    }
}

impl Domain {
    pub fn from_draft(id: DomainId, draft: DomainDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            external_id: draft.external_id,
            parent_id: draft.parent_id,
            kind: draft.kind,
        }
    }

    /// Every mutable field is replaced; identity stays.
    pub fn with_changes(&self, draft: DomainDraft) -> Self {
        Self::from_draft(self.id, draft)
    }
}

/// List projection: a domain with its parent's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainSummary {
    pub domain: Domain,
    pub parent_name: Option<String>,
}

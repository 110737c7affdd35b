use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{normalize_optional, normalize_text, DomainId, ProductId};

pub type ContractId = i64;

/// A consumption agreement between a consuming Domain and a Product.
/// The (product, consumer) linkage is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub product_id: ProductId,
    pub consumer_id: DomainId,

    /// Domain the data is handed over to, if different from the consumer
    pub transfer_id: Option<DomainId>,

    pub terms: ContractTerms,
}

/// Descriptive, freely editable contract fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub description: Option<String>,
    pub usage: Option<String>,
    pub purpose: Option<String>,
    pub limitations: Option<String>,

    /// Schema of the shared data, kept as a JSON document
    pub schema_descriptor: Option<serde_json::Value>,

    pub support_channel: Option<String>,
    pub price_amount: Option<f64>,
    pub price_currency: Option<String>,
    pub price_unit: Option<String>,
}

impl ContractTerms {
    /// Trim all text; blank text and JSON null become None
    pub fn normalized(self) -> Self {
        Self {
            description: normalize_optional(self.description),
            usage: normalize_optional(self.usage),
            purpose: normalize_optional(self.purpose),
            limitations: normalize_optional(self.limitations),
            schema_descriptor: self.schema_descriptor.filter(|v| !v.is_null()),
            support_channel: normalize_optional(self.support_channel),
            price_amount: self.price_amount,
            price_currency: normalize_optional(self.price_currency),
            price_unit: normalize_optional(self.price_unit),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContractDraft {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub product_id: ProductId,
    pub consumer_id: DomainId,
    pub transfer_id: Option<DomainId>,
    pub terms: ContractTerms,
}

impl ContractDraft {
    pub fn new(
        name: Option<String>,
        product_id: ProductId,
        consumer_id: DomainId,
        transfer_id: Option<DomainId>,
        terms: ContractTerms,
    ) -> Self {
        Self {
            name: normalize_text(name),
            created_at: Utc::now(),
            product_id,
            consumer_id,
            transfer_id,
            terms: terms.normalized(),
        }
    }
}

/// The editable part of a contract
#[derive(Debug, Clone, PartialEq)]
pub struct ContractChanges {
    pub name: String,
    pub transfer_id: Option<DomainId>,
    pub terms: ContractTerms,
}

impl ContractChanges {
    pub fn new(name: Option<String>, transfer_id: Option<DomainId>, terms: ContractTerms) -> Self {
        Self {
            name: normalize_text(name),
            transfer_id,
            terms: terms.normalized(),
        }
    }
}

impl Contract {
    pub fn from_draft(id: ContractId, draft: ContractDraft) -> Self {
        Self {
            id,
            name: draft.name,
            created_at: draft.created_at,
            product_id: draft.product_id,
            consumer_id: draft.consumer_id,
            transfer_id: draft.transfer_id,
            terms: draft.terms,
        }
    }

    pub fn with_changes(&self, changes: ContractChanges) -> Self {
        Self {
            name: changes.name,
            transfer_id: changes.transfer_id,
            terms: changes.terms,
            ..self.clone()
        }
    }
}

/// List projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractSummary {
    pub contract: Contract,
    pub product_name: String,
    pub consumer_name: String,
}

/// Single-contract projection including the transferring domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractDetail {
    pub contract: Contract,
    pub product_name: Option<String>,
    pub consumer_name: Option<String>,
    pub transfer_name: Option<String>,
}

// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are caller-friendly, flat representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)
// - Input payloads deserialize straight into the registry request types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    Contract, ContractDetail, ContractSummary, ContractTerms, Domain, DomainSummary,
    OperationalData, Product, ProductSummary,
};

// ============================================================================
// ENVELOPE
// ============================================================================

/// One request line: `{"action": "...", "payload": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    pub action: String,
    #[serde(default)]
    pub payload: Value,
}

/// Payload of the get/delete actions
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdPayload {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    Created,
    NoChange,
    ValidationRejected,
    NotFound,
    Conflict,
    ServerError,
}

impl ResponseStatus {
    /// HTTP-equivalent code
    pub fn code(&self) -> u16 {
        match self {
            ResponseStatus::Ok | ResponseStatus::NoChange => 200,
            ResponseStatus::Created => 201,
            ResponseStatus::ValidationRejected => 400,
            ResponseStatus::NotFound => 404,
            ResponseStatus::Conflict => 409,
            ResponseStatus::ServerError => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code() < 300
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: ResponseStatus,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CommandResponse {
    pub fn new(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            code: status.code(),
            message: message.into(),
            id: None,
            data: None,
            details: None,
        }
    }

    pub fn ok(data: Value) -> Self {
        Self::new(ResponseStatus::Ok, "ok").with_data(data)
    }

    pub fn created(message: impl Into<String>, id: i64) -> Self {
        Self::new(ResponseStatus::Created, message).with_id(id)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ResponseStatus::ValidationRejected, message)
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// ============================================================================
// DOMAIN DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub external_id: String,
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    pub kind: String,
}

// ============================================================================
// PRODUCT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub owner_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub archetype: String,
    pub external_id: String,
    pub status: Option<String>,
    pub tags: Option<String>,
}

// ============================================================================
// CONTRACT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDto {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub consumer_id: i64,
    pub consumer_name: Option<String>,
    pub transfer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_name: Option<String>,
    #[serde(flatten)]
    pub terms: ContractTerms,
}

// ============================================================================
// OPERATIONAL DATA DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalDataDto {
    pub id: i64,
    pub name: String,
    pub data_type: String,
    pub length: Option<u32>,
    pub description: Option<String>,
    pub business_rule: Option<String>,
}

// ============================================================================
// CONVERSION HELPERS (Domain → DTO)
// ============================================================================

impl From<Domain> for DomainDto {
    fn from(domain: Domain) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            external_id: domain.external_id,
            parent_id: domain.parent_id,
            parent_name: None,
            kind: domain.kind.to_string(),
        }
    }
}

impl From<DomainSummary> for DomainDto {
    fn from(summary: DomainSummary) -> Self {
        Self {
            parent_name: summary.parent_name,
            ..DomainDto::from(summary.domain)
        }
    }
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            created_at: product.created_at.to_rfc3339(),
            owner_id: product.owner_id,
            owner_name: None,
            archetype: product.archetype,
            external_id: product.external_id,
            status: product.status.map(|s| s.to_string()),
            tags: product.tags,
        }
    }
}

impl From<ProductSummary> for ProductDto {
    fn from(summary: ProductSummary) -> Self {
        Self {
            owner_name: Some(summary.owner_name),
            ..ProductDto::from(summary.product)
        }
    }
}

impl ContractDto {
    fn from_contract(
        contract: Contract,
        product_name: Option<String>,
        consumer_name: Option<String>,
        transfer_name: Option<String>,
    ) -> Self {
        Self {
            id: contract.id,
            name: contract.name,
            created_at: contract.created_at.to_rfc3339(),
            product_id: contract.product_id,
            product_name,
            consumer_id: contract.consumer_id,
            consumer_name,
            transfer_id: contract.transfer_id,
            transfer_name,
            terms: contract.terms,
        }
    }
}

impl From<ContractSummary> for ContractDto {
    fn from(summary: ContractSummary) -> Self {
        Self::from_contract(
            summary.contract,
            Some(summary.product_name),
            Some(summary.consumer_name),
            None,
        )
    }
}

impl From<ContractDetail> for ContractDto {
    fn from(detail: ContractDetail) -> Self {
        Self::from_contract(
            detail.contract,
            detail.product_name,
            detail.consumer_name,
            detail.transfer_name,
        )
    }
}

impl From<OperationalData> for OperationalDataDto {
    fn from(item: OperationalData) -> Self {
        Self {
            id: item.id,
            name: item.name,
            data_type: item.data_type.to_string(),
            length: item.length,
            description: item.description,
            business_rule: item.business_rule,
        }
    }
}

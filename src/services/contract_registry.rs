// src/services/contract_registry.rs
//
// ContractRegistry - owns Contract entities
//
// A contract links one product to one consuming domain, at most once per
// pair. A domain consuming its own product is allowed but reported.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{
    required, Contract, ContractChanges, ContractDetail, ContractDraft, ContractId,
    ContractSummary, ContractTerms, DomainId, FieldSource, FieldValue, Operation, ProductId,
    UpdateOutcome,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    CatalogEntity, EntityCreated, EntityDeleted, EntityUpdated, EventBus, SelfConsumptionDetected,
};
use crate::repositories::{ContractRepository, DomainRepository, ProductRepository};
use crate::services::store_guard::{check_rules, translate_write_error};

const ENTITY: &str = "Contract";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContractRequest {
    pub product_id: Option<ProductId>,
    pub consumer_id: Option<DomainId>,
    pub transfer_id: Option<DomainId>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub terms: ContractTerms,
}

/// Product and consumer are not part of an update; extra payload keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContractRequest {
    pub id: Option<ContractId>,
    pub name: Option<String>,
    pub transfer_id: Option<DomainId>,
    #[serde(flatten)]
    pub terms: ContractTerms,
}

impl FieldSource for CreateContractRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "product_id" => FieldValue::integer(self.product_id),
            "consumer_id" => FieldValue::integer(self.consumer_id),
            "transfer_id" => FieldValue::integer(self.transfer_id),
            "name" => FieldValue::text(&self.name),
            "price_amount" => FieldValue::decimal(self.terms.price_amount),
            _ => FieldValue::Absent,
        }
    }
}

impl FieldSource for UpdateContractRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::integer(self.id),
            "name" => FieldValue::text(&self.name),
            "transfer_id" => FieldValue::integer(self.transfer_id),
            "price_amount" => FieldValue::decimal(self.terms.price_amount),
            _ => FieldValue::Absent,
        }
    }
}

pub struct ContractRegistry {
    contract_repo: Arc<dyn ContractRepository>,
    product_repo: Arc<dyn ProductRepository>,
    domain_repo: Arc<dyn DomainRepository>,
    event_bus: Arc<EventBus>,
}

impl ContractRegistry {
    pub fn new(
        contract_repo: Arc<dyn ContractRepository>,
        product_repo: Arc<dyn ProductRepository>,
        domain_repo: Arc<dyn DomainRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            contract_repo,
            product_repo,
            domain_repo,
            event_bus,
        }
    }

    /// All contracts ordered by name, ties by id
    pub fn list_contracts(&self) -> AppResult<Vec<ContractSummary>> {
        self.contract_repo.list_summaries()
    }

    pub fn get_contract(&self, id: ContractId) -> AppResult<ContractDetail> {
        self.contract_repo
            .get_detail(id)?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub fn create_contract(&self, request: CreateContractRequest) -> AppResult<ContractId> {
        check_rules(ENTITY, Operation::Create, &request)?;
        let product_id = required(request.product_id, "product_id")?;
        let consumer_id = required(request.consumer_id, "consumer_id")?;

        let product = self.product_repo.get_by_id(product_id)?.ok_or_else(|| {
            AppError::Conflict(format!("Product {} does not exist", product_id))
        })?;
        self.ensure_domain_exists(consumer_id, "Consumer")?;
        if let Some(transfer_id) = request.transfer_id {
            self.ensure_domain_exists(transfer_id, "Transfer")?;
        }

        if self.contract_repo.find_by_pair(product_id, consumer_id)?.is_some() {
            return Err(AppError::Conflict(pair_message(product_id, consumer_id)));
        }

        let draft = ContractDraft::new(
            request.name,
            product_id,
            consumer_id,
            request.transfer_id,
            request.terms,
        );

        let id = self
            .contract_repo
            .insert(&draft)
            .map_err(|e| translate_write_error(e, || pair_message(product_id, consumer_id)))?;

        log::info!(
            "Contract {} created ('{}', product {} -> domain {})",
            id,
            draft.name,
            product_id,
            consumer_id
        );

        if product.owner_id == consumer_id {
            log::warn!(
                "Contract {}: domain {} consumes its own product {}",
                id,
                consumer_id,
                product_id
            );
            self.event_bus
                .emit(SelfConsumptionDetected::new(id, product_id, consumer_id));
        }

        self.event_bus
            .emit(EntityCreated::new(CatalogEntity::Contract, id, draft.name));

        Ok(id)
    }

    /// Update the descriptive fields and transferring domain.
    pub fn update_contract(&self, request: UpdateContractRequest) -> AppResult<UpdateOutcome> {
        check_rules(ENTITY, Operation::Update, &request)?;
        let id = required(request.id, "id")?;

        let existing = self.find_contract(id)?;
        let updated = existing.with_changes(ContractChanges::new(
            request.name,
            request.transfer_id,
            request.terms,
        ));

        if updated == existing {
            log::debug!("Contract {} unchanged", id);
            return Ok(UpdateOutcome::Unchanged);
        }

        if let Some(transfer_id) = updated.transfer_id.filter(|t| Some(*t) != existing.transfer_id) {
            self.ensure_domain_exists(transfer_id, "Transfer")?;
        }

        let written = self.contract_repo.update(&updated).map_err(|e| {
            translate_write_error(e, || pair_message(updated.product_id, updated.consumer_id))
        })?;

        if !written {
            return Err(AppError::not_found(ENTITY, id));
        }

        log::info!("Contract {} updated", id);
        self.event_bus
            .emit(EntityUpdated::new(CatalogEntity::Contract, id));

        Ok(UpdateOutcome::Updated)
    }

    pub fn delete_contract(&self, id: ContractId) -> AppResult<()> {
        if !self.contract_repo.delete(id)? {
            return Err(AppError::not_found(ENTITY, id));
        }

        log::info!("Contract {} deleted", id);
        self.event_bus
            .emit(EntityDeleted::new(CatalogEntity::Contract, id));

        Ok(())
    }

    fn find_contract(&self, id: ContractId) -> AppResult<Contract> {
        self.contract_repo
            .get_by_id(id)?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    fn ensure_domain_exists(&self, id: DomainId, role: &str) -> AppResult<()> {
        if self.domain_repo.exists(id)? {
            Ok(())
        } else {
            Err(AppError::Conflict(format!("{} domain {} does not exist", role, id)))
        }
    }
}

fn pair_message(product_id: ProductId, consumer_id: DomainId) -> String {
    format!(
        "A contract between product {} and domain {} already exists",
        product_id, consumer_id
    )
}

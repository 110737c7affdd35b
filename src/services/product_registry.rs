// src/services/product_registry.rs
//
// ProductRegistry - owns Product entities
//
// archetype and external_id are fixed at creation. Update requests may
// carry them; they are dropped before the entity is rebuilt.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{
    required, DomainId, FieldSource, FieldValue, Operation, Product, ProductChanges, ProductDraft,
    ProductId, ProductStatus, ProductSummary, UpdateOutcome,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    CatalogEntity, ContractsCascaded, EntityCreated, EntityDeleted, EntityUpdated, EventBus,
};
use crate::repositories::{ContractRepository, DomainRepository, ProductRepository};
use crate::services::store_guard::{check_rules, translate_write_error};

const ENTITY: &str = "Product";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<DomainId>,
    pub archetype: Option<String>,
    pub external_id: Option<String>,
    pub status: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<DomainId>,
    /// Accepted, never stored
    pub archetype: Option<String>,
    /// Accepted, never stored
    pub external_id: Option<String>,
    pub status: Option<String>,
    pub tags: Option<String>,
}

impl FieldSource for CreateProductRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::text(&self.name),
            "description" => FieldValue::text(&self.description),
            "owner_id" => FieldValue::integer(self.owner_id),
            "archetype" => FieldValue::text(&self.archetype),
            "external_id" => FieldValue::text(&self.external_id),
            "status" => FieldValue::text(&self.status),
            "tags" => FieldValue::text(&self.tags),
            _ => FieldValue::Absent,
        }
    }
}

impl FieldSource for UpdateProductRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::integer(self.id),
            "name" => FieldValue::text(&self.name),
            "description" => FieldValue::text(&self.description),
            "owner_id" => FieldValue::integer(self.owner_id),
            "status" => FieldValue::text(&self.status),
            "tags" => FieldValue::text(&self.tags),
            _ => FieldValue::Absent,
        }
    }
}

pub struct ProductRegistry {
    product_repo: Arc<dyn ProductRepository>,
    domain_repo: Arc<dyn DomainRepository>,
    contract_repo: Arc<dyn ContractRepository>,
    event_bus: Arc<EventBus>,
}

impl ProductRegistry {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        domain_repo: Arc<dyn DomainRepository>,
        contract_repo: Arc<dyn ContractRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            product_repo,
            domain_repo,
            contract_repo,
            event_bus,
        }
    }

    /// All products by name with their owner's name
    pub fn list_products(&self) -> AppResult<Vec<ProductSummary>> {
        self.product_repo.list_with_owner_names()
    }

    pub fn get_product(&self, id: ProductId) -> AppResult<Product> {
        self.product_repo
            .get_by_id(id)?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub fn create_product(&self, request: CreateProductRequest) -> AppResult<ProductId> {
        check_rules(ENTITY, Operation::Create, &request)?;
        let owner_id = required(request.owner_id, "owner_id")?;
        let status = ProductStatus::parse_optional(request.status.as_deref())?;

        let draft = ProductDraft::new(
            request.name,
            request.description,
            owner_id,
            request.archetype,
            request.external_id,
            status,
            request.tags,
        );

        self.ensure_owner_exists(owner_id)?;

        if self.product_repo.find_by_external_id(&draft.external_id)?.is_some() {
            return Err(AppError::Conflict(external_id_message(&draft.external_id)));
        }

        let id = self
            .product_repo
            .insert(&draft)
            .map_err(|e| translate_write_error(e, || external_id_message(&draft.external_id)))?;

        log::info!(
            "Product {} created ('{}', {}, owner {})",
            id,
            draft.name,
            draft.archetype,
            owner_id
        );
        self.event_bus
            .emit(EntityCreated::new(CatalogEntity::Product, id, draft.name));

        Ok(id)
    }

    /// Update name, description, owner, status and tags.
    pub fn update_product(&self, request: UpdateProductRequest) -> AppResult<UpdateOutcome> {
        check_rules(ENTITY, Operation::Update, &request)?;
        let id = required(request.id, "id")?;
        let owner_id = required(request.owner_id, "owner_id")?;
        let status = ProductStatus::parse_optional(request.status.as_deref())?;

        let existing = self.get_product(id)?;

        if request.archetype.is_some() || request.external_id.is_some() {
            log::debug!("Product {}: ignoring archetype/external_id in update", id);
        }

        let updated = existing.with_changes(ProductChanges::new(
            request.name,
            request.description,
            owner_id,
            status,
            request.tags,
        ));

        if updated == existing {
            log::debug!("Product {} unchanged", id);
            return Ok(UpdateOutcome::Unchanged);
        }

        if updated.owner_id != existing.owner_id {
            self.ensure_owner_exists(updated.owner_id)?;
        }

        let written = self
            .product_repo
            .update(&updated)
            .map_err(|e| translate_write_error(e, || external_id_message(&updated.external_id)))?;

        if !written {
            return Err(AppError::not_found(ENTITY, id));
        }

        log::info!("Product {} updated", id);
        self.event_bus
            .emit(EntityUpdated::new(CatalogEntity::Product, id));

        Ok(UpdateOutcome::Updated)
    }

    /// Delete a product together with every contract on it.
    pub fn delete_product(&self, id: ProductId) -> AppResult<()> {
        if self.product_repo.get_by_id(id)?.is_none() {
            return Err(AppError::not_found(ENTITY, id));
        }

        let contracts = self.contract_repo.count_by_product(id)?;

        let deleted = self
            .product_repo
            .delete(id)
            .map_err(|e| translate_write_error(e, || format!("Product {} is still referenced", id)))?;

        if !deleted {
            return Err(AppError::not_found(ENTITY, id));
        }

        if contracts > 0 {
            log::warn!("Product {} deleted with {} contract(s)", id, contracts);
            self.event_bus.emit(ContractsCascaded::new(id, contracts));
        } else {
            log::info!("Product {} deleted", id);
        }
        self.event_bus
            .emit(EntityDeleted::new(CatalogEntity::Product, id));

        Ok(())
    }

    fn ensure_owner_exists(&self, owner_id: DomainId) -> AppResult<()> {
        if self.domain_repo.exists(owner_id)? {
            Ok(())
        } else {
            Err(AppError::Conflict(format!(
                "Owner domain {} does not exist",
                owner_id
            )))
        }
    }
}

fn external_id_message(external_id: &str) -> String {
    format!("Product external id '{}' is already in use", external_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repositories::{MockContractRepository, MockDomainRepository, MockProductRepository};
    use crate::services::test_support::{missing_parent_failure, Catalog};

    fn registry(
        product_repo: MockProductRepository,
        domain_repo: MockDomainRepository,
        event_bus: Arc<EventBus>,
    ) -> ProductRegistry {
        ProductRegistry::new(
            Arc::new(product_repo),
            Arc::new(domain_repo),
            Arc::new(MockContractRepository::new()),
            event_bus,
        )
    }

    #[test]
    fn test_owner_removed_before_insert_is_conflict() {
        // The owner check passes, then the domain is gone by the time of the write
        let mut domain_repo = MockDomainRepository::new();
        domain_repo.expect_exists().returning(|_| Ok(true));
        let mut product_repo = MockProductRepository::new();
        product_repo.expect_find_by_external_id().returning(|_| Ok(None));
        product_repo
            .expect_insert()
            .returning(|_| Err(missing_parent_failure()));

        let event_bus = Arc::new(EventBus::new());
        let err = registry(product_repo, domain_repo, event_bus.clone())
            .create_product(Catalog::product_request(7, "p-1"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(event_bus.get_event_log().is_empty());
    }

    #[test]
    fn test_missing_owner_is_conflict_without_write() {
        let mut domain_repo = MockDomainRepository::new();
        domain_repo.expect_exists().returning(|_| Ok(false));
        let mut product_repo = MockProductRepository::new();
        product_repo.expect_insert().never();

        let err = registry(product_repo, domain_repo, Arc::new(EventBus::new()))
            .create_product(Catalog::product_request(7, "p-1"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("Owner domain 7"));
    }
}

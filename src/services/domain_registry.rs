// src/services/domain_registry.rs
//
// DomainRegistry - owns Domain entities
//
// Order for every write: rule set, reference checks, uniqueness pre-check,
// write with constraint translation, event. The pre-checks only produce
// better messages; the store constraints decide.

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{
    ensure_acyclic, ensure_not_self_parent, required, Domain, DomainDraft, DomainId, DomainKind,
    DomainSummary, FieldSource, FieldValue, Operation, UpdateOutcome,
};
use crate::error::{AppError, AppResult};
use crate::events::{CatalogEntity, EntityCreated, EntityDeleted, EntityUpdated, EventBus};
use crate::repositories::{ContractRepository, DomainRepository, ProductRepository};
use crate::services::store_guard::{check_rules, translate_write_error};

const ENTITY: &str = "Domain";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDomainRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub parent_id: Option<DomainId>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDomainRequest {
    pub id: Option<DomainId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub parent_id: Option<DomainId>,
    pub kind: Option<String>,
}

impl FieldSource for CreateDomainRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::text(&self.name),
            "description" => FieldValue::text(&self.description),
            "external_id" => FieldValue::text(&self.external_id),
            "parent_id" => FieldValue::integer(self.parent_id),
            "kind" => FieldValue::text(&self.kind),
            _ => FieldValue::Absent,
        }
    }
}

impl FieldSource for UpdateDomainRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::integer(self.id),
            "name" => FieldValue::text(&self.name),
            "description" => FieldValue::text(&self.description),
            "external_id" => FieldValue::text(&self.external_id),
            "parent_id" => FieldValue::integer(self.parent_id),
            "kind" => FieldValue::text(&self.kind),
            _ => FieldValue::Absent,
        }
    }
}

fn parse_kind(kind: Option<&str>) -> AppResult<DomainKind> {
    let kind = required(kind, "kind")?;
    Ok(DomainKind::from_str(kind)?)
}

pub struct DomainRegistry {
    domain_repo: Arc<dyn DomainRepository>,
    product_repo: Arc<dyn ProductRepository>,
    contract_repo: Arc<dyn ContractRepository>,
    event_bus: Arc<EventBus>,
}

impl DomainRegistry {
    pub fn new(
        domain_repo: Arc<dyn DomainRepository>,
        product_repo: Arc<dyn ProductRepository>,
        contract_repo: Arc<dyn ContractRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            domain_repo,
            product_repo,
            contract_repo,
            event_bus,
        }
    }

    /// All domains by name, each with its parent's name
    pub fn list_domains(&self) -> AppResult<Vec<DomainSummary>> {
        self.domain_repo.list_with_parent_names()
    }

    pub fn get_domain(&self, id: DomainId) -> AppResult<Domain> {
        self.domain_repo
            .get_by_id(id)?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub fn create_domain(&self, request: CreateDomainRequest) -> AppResult<DomainId> {
        check_rules(ENTITY, Operation::Create, &request)?;
        let kind = parse_kind(request.kind.as_deref())?;

        let draft = DomainDraft::new(
            request.name,
            request.description,
            request.external_id,
            request.parent_id,
            kind,
        );

        if let Some(parent_id) = draft.parent_id {
            self.ensure_parent_exists(parent_id)?;
        }

        if self.domain_repo.find_by_external_id(&draft.external_id)?.is_some() {
            return Err(external_id_taken(&draft.external_id));
        }

        let id = self
            .domain_repo
            .insert(&draft)
            .map_err(|e| translate_write_error(e, || external_id_message(&draft.external_id)))?;

        log::info!("Domain {} created ('{}', {})", id, draft.name, draft.kind);
        self.event_bus
            .emit(EntityCreated::new(CatalogEntity::Domain, id, draft.name));

        Ok(id)
    }

    /// Replace every mutable field of a domain.
    ///
    /// Self-parenting is rejected before the store is consulted. A parent
    /// change walks the new parent's ancestor chain so no loop can form;
    /// that walk and the write are not atomic.
    pub fn update_domain(&self, request: UpdateDomainRequest) -> AppResult<UpdateOutcome> {
        check_rules(ENTITY, Operation::Update, &request)?;
        let id = required(request.id, "id")?;
        ensure_not_self_parent(id, request.parent_id)?;
        let kind = parse_kind(request.kind.as_deref())?;

        let existing = self.get_domain(id)?;
        let updated = existing.with_changes(DomainDraft::new(
            request.name,
            request.description,
            request.external_id,
            request.parent_id,
            kind,
        ));

        if updated == existing {
            log::debug!("Domain {} unchanged", id);
            return Ok(UpdateOutcome::Unchanged);
        }

        if let Some(parent_id) = updated.parent_id.filter(|p| Some(*p) != existing.parent_id) {
            self.ensure_parent_exists(parent_id)?;
            let ancestry = self.domain_repo.ancestor_ids(parent_id)?;
            ensure_acyclic(id, parent_id, &ancestry)?;
        }

        match self.domain_repo.find_by_external_id(&updated.external_id)? {
            Some(other) if other != id => return Err(external_id_taken(&updated.external_id)),
            _ => {}
        }

        let written = self
            .domain_repo
            .update(&updated)
            .map_err(|e| translate_write_error(e, || external_id_message(&updated.external_id)))?;

        if !written {
            return Err(AppError::not_found(ENTITY, id));
        }

        log::info!("Domain {} updated", id);
        self.event_bus
            .emit(EntityUpdated::new(CatalogEntity::Domain, id));

        Ok(UpdateOutcome::Updated)
    }

    /// Delete a domain nothing depends on.
    ///
    /// Owned products and consumed contracts block the delete. Child
    /// domains and contracts transferring to it lose the reference.
    pub fn delete_domain(&self, id: DomainId) -> AppResult<()> {
        if !self.domain_repo.exists(id)? {
            return Err(AppError::not_found(ENTITY, id));
        }

        let owned = self.product_repo.count_by_owner(id)?;
        if owned > 0 {
            return Err(AppError::Conflict(format!(
                "Domain {} still owns {} product(s)",
                id, owned
            )));
        }

        let consumed = self.contract_repo.count_by_consumer(id)?;
        if consumed > 0 {
            return Err(AppError::Conflict(format!(
                "Domain {} still consumes through {} contract(s)",
                id, consumed
            )));
        }

        let deleted = self.domain_repo.delete(id).map_err(|e| {
            translate_write_error(e, || format!("Domain {} is still referenced", id))
        })?;

        if !deleted {
            return Err(AppError::not_found(ENTITY, id));
        }

        log::info!("Domain {} deleted", id);
        self.event_bus
            .emit(EntityDeleted::new(CatalogEntity::Domain, id));

        Ok(())
    }

    fn ensure_parent_exists(&self, parent_id: DomainId) -> AppResult<()> {
        if self.domain_repo.exists(parent_id)? {
            Ok(())
        } else {
            Err(AppError::Conflict(format!(
                "Parent domain {} does not exist",
                parent_id
            )))
        }
    }
}

fn external_id_message(external_id: &str) -> String {
    format!("Domain external id '{}' is already in use", external_id)
}

fn external_id_taken(external_id: &str) -> AppError {
    AppError::Conflict(external_id_message(external_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repositories::{MockContractRepository, MockDomainRepository, MockProductRepository};
    use crate::services::test_support::{referenced_delete_failure, Catalog};

    fn registry(domain_repo: MockDomainRepository) -> DomainRegistry {
        DomainRegistry::new(
            Arc::new(domain_repo),
            Arc::new(MockProductRepository::new()),
            Arc::new(MockContractRepository::new()),
            Arc::new(EventBus::new()),
        )
    }

    fn domain(id: DomainId, parent_id: Option<DomainId>) -> Domain {
        Domain {
            id,
            name: format!("Domain {}", id),
            description: String::new(),
            external_id: format!("d{}", id),
            parent_id,
            kind: DomainKind::Domain,
        }
    }

    #[test]
    fn test_validation_runs_before_any_store_access() {
        // A mock without expectations panics on any call
        let registry = registry(MockDomainRepository::new());

        let err = registry
            .create_domain(CreateDomainRequest {
                name: Some("   ".to_string()),
                external_id: Some("mkt".to_string()),
                kind: Some("Domain".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = registry
            .update_domain(UpdateDomainRequest {
                id: Some(3),
                name: Some("Marketing".to_string()),
                external_id: Some("mkt".to_string()),
                parent_id: Some(3),
                kind: Some("Domain".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(crate::domain::DomainError::SelfParent(3))));
    }

    #[test]
    fn test_reparenting_under_a_descendant_is_rejected() {
        let mut repo = MockDomainRepository::new();
        repo.expect_get_by_id().returning(|id| Ok(Some(domain(id, None))));
        repo.expect_exists().returning(|_| Ok(true));
        // 1 <- 2 <- 3: making 3 the parent of 1 closes the loop
        repo.expect_ancestor_ids().returning(|_| Ok(vec![2, 1]));
        repo.expect_update().never();

        let err = registry(repo)
            .update_domain(UpdateDomainRequest {
                id: Some(1),
                name: Some("Domain 1".to_string()),
                external_id: Some("d1".to_string()),
                parent_id: Some(3),
                kind: Some("Domain".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Domain(crate::domain::DomainError::HierarchyCycle { domain: 1, parent: 3 })
        ));
    }

    #[test]
    fn test_unchanged_update_skips_write() {
        let mut repo = MockDomainRepository::new();
        repo.expect_get_by_id().returning(|id| Ok(Some(domain(id, None))));
        repo.expect_update().never();

        let outcome = registry(repo)
            .update_domain(UpdateDomainRequest {
                id: Some(4),
                name: Some(" Domain 4 ".to_string()),
                external_id: Some("d4".to_string()),
                kind: Some("Domain".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Unchanged);
    }

    #[test]
    fn test_unique_violation_at_write_is_conflict() {
        // Pre-check passes, the store still rejects: a lost race
        let mut repo = MockDomainRepository::new();
        repo.expect_find_by_external_id().returning(|_| Ok(None));
        repo.expect_insert().returning(|_| {
            let conn = rusqlite::Connection::open_in_memory().unwrap();
            conn.execute_batch("CREATE TABLE t (v TEXT UNIQUE); INSERT INTO t VALUES ('a');")
                .unwrap();
            Err(AppError::Database(
                conn.execute("INSERT INTO t VALUES ('a')", []).unwrap_err(),
            ))
        });

        let err = registry(repo)
            .create_domain(CreateDomainRequest {
                name: Some("Marketing".to_string()),
                external_id: Some("mkt".to_string()),
                kind: Some("Domain".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("'mkt'"));
    }

    #[test]
    fn test_delete_rejected_by_store_is_conflict() {
        // Counts say the domain is free, but a product landed before the DELETE
        for on_delete in ["", "ON DELETE RESTRICT"] {
            let mut domain_repo = MockDomainRepository::new();
            domain_repo.expect_exists().returning(|_| Ok(true));
            domain_repo
                .expect_delete()
                .returning(move |_| Err(referenced_delete_failure(on_delete)));
            let mut product_repo = MockProductRepository::new();
            product_repo.expect_count_by_owner().returning(|_| Ok(0));
            let mut contract_repo = MockContractRepository::new();
            contract_repo.expect_count_by_consumer().returning(|_| Ok(0));

            let event_bus = Arc::new(EventBus::new());
            let registry = DomainRegistry::new(
                Arc::new(domain_repo),
                Arc::new(product_repo),
                Arc::new(contract_repo),
                event_bus.clone(),
            );

            let err = registry.delete_domain(5).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Conflict, "{}", on_delete);
            assert!(event_bus.get_event_log().is_empty());
        }
    }

    #[test]
    fn test_store_refuses_deleting_an_owner() {
        let catalog = Catalog::new();
        let (mkt, _) = catalog.two_domains();
        catalog.product(mkt, "p-1");

        let repo = crate::repositories::SqliteDomainRepository::new(catalog.pool.clone());
        let err = translate_write_error(repo.delete(mkt).unwrap_err(), String::new);
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}

// src/services/operational_data_registry.rs
//
// OperationalDataRegistry - the operational data dictionary
//
// Standalone entries: nothing references them and they reference nothing.

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{
    required, DataType, DomainError, FieldSource, FieldValue, OperationalData,
    OperationalDataDraft, OperationalDataId, Operation, UpdateOutcome,
};
use crate::error::{AppError, AppResult};
use crate::events::{CatalogEntity, EntityCreated, EntityDeleted, EntityUpdated, EventBus};
use crate::repositories::OperationalDataRepository;
use crate::services::store_guard::{check_rules, translate_write_error};

const ENTITY: &str = "OperationalData";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOperationalDataRequest {
    pub name: Option<String>,
    pub data_type: Option<String>,
    pub length: Option<i64>,
    pub description: Option<String>,
    pub business_rule: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOperationalDataRequest {
    pub id: Option<OperationalDataId>,
    pub name: Option<String>,
    pub data_type: Option<String>,
    pub length: Option<i64>,
    pub description: Option<String>,
    pub business_rule: Option<String>,
}

impl FieldSource for CreateOperationalDataRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::text(&self.name),
            "data_type" => FieldValue::text(&self.data_type),
            "length" => FieldValue::integer(self.length),
            "description" => FieldValue::text(&self.description),
            "business_rule" => FieldValue::text(&self.business_rule),
            _ => FieldValue::Absent,
        }
    }
}

impl FieldSource for UpdateOperationalDataRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::integer(self.id),
            "name" => FieldValue::text(&self.name),
            "data_type" => FieldValue::text(&self.data_type),
            "length" => FieldValue::integer(self.length),
            "description" => FieldValue::text(&self.description),
            "business_rule" => FieldValue::text(&self.business_rule),
            _ => FieldValue::Absent,
        }
    }
}

fn build_draft(
    name: Option<String>,
    data_type: Option<&str>,
    length: Option<i64>,
    description: Option<String>,
    business_rule: Option<String>,
) -> AppResult<OperationalDataDraft> {
    let data_type = DataType::from_str(required(data_type, "data_type")?)?;

    let length = length
        .map(u32::try_from)
        .transpose()
        .map_err(|_| DomainError::InvalidField {
            field: "length".to_string(),
            reason: format!("must be at most {}", u32::MAX),
        })?;

    Ok(OperationalDataDraft::new(
        name,
        data_type,
        length,
        description,
        business_rule,
    ))
}

pub struct OperationalDataRegistry {
    repo: Arc<dyn OperationalDataRepository>,
    event_bus: Arc<EventBus>,
}

impl OperationalDataRegistry {
    pub fn new(repo: Arc<dyn OperationalDataRepository>, event_bus: Arc<EventBus>) -> Self {
        Self { repo, event_bus }
    }

    pub fn list_operational_data(&self) -> AppResult<Vec<OperationalData>> {
        self.repo.list_all()
    }

    pub fn create_operational_data(
        &self,
        request: CreateOperationalDataRequest,
    ) -> AppResult<OperationalDataId> {
        check_rules(ENTITY, Operation::Create, &request)?;
        let draft = build_draft(
            request.name,
            request.data_type.as_deref(),
            request.length,
            request.description,
            request.business_rule,
        )?;

        let id = self
            .repo
            .insert(&draft)
            .map_err(|e| translate_write_error(e, || format!("'{}' already exists", draft.name)))?;

        log::info!("Operational data {} created ('{}')", id, draft.name);
        self.event_bus
            .emit(EntityCreated::new(CatalogEntity::OperationalData, id, draft.name));

        Ok(id)
    }

    pub fn update_operational_data(
        &self,
        request: UpdateOperationalDataRequest,
    ) -> AppResult<UpdateOutcome> {
        check_rules(ENTITY, Operation::Update, &request)?;
        let id = required(request.id, "id")?;
        let draft = build_draft(
            request.name,
            request.data_type.as_deref(),
            request.length,
            request.description,
            request.business_rule,
        )?;

        let existing = self
            .repo
            .get_by_id(id)?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;
        let updated = OperationalData::from_draft(id, draft);

        if updated == existing {
            log::debug!("Operational data {} unchanged", id);
            return Ok(UpdateOutcome::Unchanged);
        }

        let written = self
            .repo
            .update(&updated)
            .map_err(|e| translate_write_error(e, || format!("'{}' already exists", updated.name)))?;

        if !written {
            return Err(AppError::not_found(ENTITY, id));
        }

        log::info!("Operational data {} updated", id);
        self.event_bus
            .emit(EntityUpdated::new(CatalogEntity::OperationalData, id));

        Ok(UpdateOutcome::Updated)
    }

    pub fn delete_operational_data(&self, id: OperationalDataId) -> AppResult<()> {
        if !self.repo.delete(id)? {
            return Err(AppError::not_found(ENTITY, id));
        }

        log::info!("Operational data {} deleted", id);
        self.event_bus
            .emit(EntityDeleted::new(CatalogEntity::OperationalData, id));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repositories::MockOperationalDataRepository;
    use crate::services::test_support::Catalog;

    fn request(name: &str, data_type: &str, length: Option<i64>) -> CreateOperationalDataRequest {
        CreateOperationalDataRequest {
            name: Some(name.to_string()),
            data_type: Some(data_type.to_string()),
            length,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_update_delete() {
        let catalog = Catalog::new();
        let registry = &catalog.operational_data;

        let id = registry
            .create_operational_data(request(" order_total ", "Numeric", Some(12)))
            .unwrap();

        let items = registry.list_operational_data().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "order_total");
        assert_eq!(items[0].data_type, DataType::Numeric);

        let same = UpdateOperationalDataRequest {
            id: Some(id),
            name: Some("order_total".to_string()),
            data_type: Some("Numeric".to_string()),
            length: Some(12),
            ..Default::default()
        };
        assert_eq!(registry.update_operational_data(same.clone()).unwrap(), UpdateOutcome::Unchanged);

        let longer = UpdateOperationalDataRequest { length: Some(16), ..same };
        assert_eq!(registry.update_operational_data(longer).unwrap(), UpdateOutcome::Updated);

        registry.delete_operational_data(id).unwrap();
        let err = registry.delete_operational_data(id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_limits_are_enforced() {
        let catalog = Catalog::new();
        let registry = &catalog.operational_data;

        let long_name = "x".repeat(101);
        let err = registry
            .create_operational_data(request(&long_name, "Text", None))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = registry
            .create_operational_data(request("total", "Date", None))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = registry
            .create_operational_data(request("total", "Numeric", Some(-1)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = registry
            .create_operational_data(CreateOperationalDataRequest {
                business_rule: Some("r".repeat(501)),
                ..request("total", "Numeric", None)
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(registry.list_operational_data().unwrap().is_empty());
    }

    #[test]
    fn test_update_of_missing_entry_is_not_found() {
        let mut repo = MockOperationalDataRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let registry = OperationalDataRegistry::new(Arc::new(repo), Arc::new(EventBus::new()));
        let err = registry
            .update_operational_data(UpdateOperationalDataRequest {
                id: Some(9),
                name: Some("total".to_string()),
                data_type: Some("Numeric".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

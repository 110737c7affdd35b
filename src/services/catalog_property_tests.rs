// src/services/catalog_property_tests.rs
//
// CATALOG PROPERTY TESTS
//
// Cross-registry behavior against a real store:
// - uniqueness of domain external ids, product external ids and contract pairs
// - self-parenting and hierarchy loops are rejected without writes
// - product identity fields survive updates
// - delete restrictions and cascades
// - list round-trips echo trimmed input

#[cfg(test)]
mod properties {
    use crate::domain::{DomainKind, ProductStatus, UpdateOutcome};
    use crate::error::ErrorKind;
    use crate::events::{ContractsCascaded, SelfConsumptionDetected};
    use crate::services::test_support::Catalog;
    use crate::services::{
        CreateDomainRequest, UpdateContractRequest, UpdateDomainRequest, UpdateProductRequest,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn update_request(id: i64, name: &str, external_id: &str, parent_id: Option<i64>) -> UpdateDomainRequest {
        UpdateDomainRequest {
            id: Some(id),
            name: Some(name.to_string()),
            description: None,
            external_id: Some(external_id.to_string()),
            parent_id,
            kind: Some("Domain".to_string()),
        }
    }

    #[test]
    fn test_duplicate_domain_external_id_is_conflict() {
        let catalog = Catalog::new();
        catalog
            .domains
            .create_domain(Catalog::domain_request("Marketing", "mkt", "Domain"))
            .unwrap();

        let err = catalog
            .domains
            .create_domain(Catalog::domain_request("Sales", "mkt", "Team"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(catalog.domains.list_domains().unwrap().len(), 1);
    }

    #[test]
    fn test_update_rechecks_external_id_excluding_self() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();

        // Keeping its own external id is fine
        let outcome = catalog
            .domains
            .update_domain(update_request(mkt, "Growth", "mkt", None))
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);

        let err = catalog
            .domains
            .update_domain(update_request(eng, "Engineering", "mkt", Some(mkt)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_self_parent_is_validation_error_without_change() {
        let catalog = Catalog::new();
        let (mkt, _) = catalog.two_domains();
        let before = catalog.domains.get_domain(mkt).unwrap();

        let err = catalog
            .domains
            .update_domain(update_request(mkt, "Renamed", "mkt", Some(mkt)))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(catalog.domains.get_domain(mkt).unwrap(), before);
    }

    #[test]
    fn test_hierarchy_loop_is_validation_error() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        let ops = catalog
            .domains
            .create_domain(CreateDomainRequest {
                parent_id: Some(eng),
                ..Catalog::domain_request("Platform Ops", "ops", "Team")
            })
            .unwrap();

        // Marketing -> Ops would close Marketing <- Engineering <- Ops
        let err = catalog
            .domains
            .update_domain(update_request(mkt, "Marketing", "mkt", Some(ops)))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(catalog.domains.get_domain(mkt).unwrap().parent_id, None);
    }

    #[test]
    fn test_missing_parent_is_conflict() {
        let catalog = Catalog::new();

        let err = catalog
            .domains
            .create_domain(CreateDomainRequest {
                parent_id: Some(404),
                ..Catalog::domain_request("Marketing", "mkt", "Domain")
            })
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_product_identity_fields_survive_update() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        let id = catalog.product(mkt, "uuid-1");

        let outcome = catalog
            .products
            .update_product(UpdateProductRequest {
                id: Some(id),
                name: Some("Campaign spend".to_string()),
                owner_id: Some(eng),
                archetype: Some("Aggregate".to_string()),
                external_id: Some("uuid-2".to_string()),
                status: Some("Production".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);

        let product = catalog.products.get_product(id).unwrap();
        assert_eq!(product.name, "Campaign spend");
        assert_eq!(product.owner_id, eng);
        assert_eq!(product.status, Some(ProductStatus::Production));
        assert_eq!(product.archetype, "Source-aligned");
        assert_eq!(product.external_id, "uuid-1");
    }

    #[test]
    fn test_duplicate_contract_pair_is_conflict() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        let product = catalog.product(mkt, "uuid-1");

        catalog.contract(product, eng);
        let err = catalog
            .contracts
            .create_contract(Catalog::contract_request(product, eng))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(catalog.contracts.list_contracts().unwrap().len(), 1);
    }

    #[test]
    fn test_domain_delete_restricted_by_products() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        catalog.product(mkt, "uuid-1");

        let err = catalog.domains.delete_domain(mkt).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Engineering owns nothing; Marketing loses nothing but a child
        catalog.domains.delete_domain(eng).unwrap();
        let remaining = catalog.domains.list_domains().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].domain.id, mkt);
    }

    #[test]
    fn test_domain_delete_restricted_by_consumed_contracts() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        let product = catalog.product(mkt, "uuid-1");
        catalog.contract(product, eng);

        let err = catalog.domains.delete_domain(eng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_deleting_parent_detaches_children() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();

        catalog.domains.delete_domain(mkt).unwrap();
        assert_eq!(catalog.domains.get_domain(eng).unwrap().parent_id, None);
    }

    #[test]
    fn test_product_delete_cascades_contracts() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        let product = catalog.product(mkt, "uuid-1");
        catalog.contract(product, eng);

        let cascaded = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&cascaded);
        catalog.event_bus.subscribe::<ContractsCascaded, _>(move |event| {
            seen.fetch_add(event.removed as usize, Ordering::SeqCst);
        });

        catalog.products.delete_product(product).unwrap();

        assert!(catalog.contracts.list_contracts().unwrap().is_empty());
        assert_eq!(cascaded.load(Ordering::SeqCst), 1);
        // With the contract gone Engineering can be deleted
        catalog.domains.delete_domain(eng).unwrap();
    }

    #[test]
    fn test_create_then_list_round_trip() {
        let catalog = Catalog::new();
        let id = catalog
            .domains
            .create_domain(CreateDomainRequest {
                name: Some("  Marketing ".to_string()),
                description: Some(" Brand and campaigns ".to_string()),
                external_id: Some(" mkt ".to_string()),
                parent_id: None,
                kind: Some("Domain".to_string()),
            })
            .unwrap();

        let list = catalog.domains.list_domains().unwrap();
        assert_eq!(list.len(), 1);
        let domain = &list[0].domain;
        assert_eq!(domain.id, id);
        assert_eq!(domain.name, "Marketing");
        assert_eq!(domain.description, "Brand and campaigns");
        assert_eq!(domain.external_id, "mkt");
        assert_eq!(domain.parent_id, None);
        assert_eq!(domain.kind, DomainKind::Domain);
    }

    #[test]
    fn test_marketing_engineering_scenario() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        let product = catalog.product(mkt, "uuid-1");

        let contract = catalog
            .contracts
            .create_contract(Catalog::contract_request(product, eng))
            .unwrap();
        assert!(contract > 0);

        let detail = catalog.contracts.get_contract(contract).unwrap();
        assert_eq!(detail.product_name.as_deref(), Some("Campaigns"));
        assert_eq!(detail.consumer_name.as_deref(), Some("Engineering"));

        let err = catalog
            .contracts
            .create_contract(Catalog::contract_request(product, eng))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_empty_domain_name_is_validation_error() {
        let catalog = Catalog::new();

        let err = catalog
            .domains
            .create_domain(Catalog::domain_request("", "x", "Domain"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(catalog.domains.list_domains().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_kind_is_validation_error() {
        let catalog = Catalog::new();

        let err = catalog
            .domains
            .create_domain(Catalog::domain_request("Marketing", "mkt", "Division"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_product_with_missing_owner_is_conflict() {
        let catalog = Catalog::new();

        let err = catalog
            .products
            .create_product(Catalog::product_request(404, "uuid-1"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_duplicate_product_external_id_is_conflict() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        catalog.product(mkt, "uuid-1");

        let err = catalog
            .products
            .create_product(Catalog::product_request(eng, "uuid-1"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(catalog.products.list_products().unwrap().len(), 1);
    }

    #[test]
    fn test_self_consumption_is_allowed_and_reported() {
        let catalog = Catalog::new();
        let (mkt, _) = catalog.two_domains();
        let product = catalog.product(mkt, "uuid-1");

        let reports = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&reports);
        catalog.event_bus.subscribe::<SelfConsumptionDetected, _>(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        catalog.contract(product, mkt);

        assert_eq!(reports.load(Ordering::SeqCst), 1);
        assert_eq!(catalog.contracts.list_contracts().unwrap().len(), 1);
    }

    #[test]
    fn test_update_outcomes_distinguish_no_change_from_missing() {
        let catalog = Catalog::new();
        let (mkt, _) = catalog.two_domains();

        let same = update_request(mkt, "Marketing", "mkt", None);
        let outcome = catalog
            .domains
            .update_domain(UpdateDomainRequest {
                description: Some("Marketing domain".to_string()),
                ..same
            })
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Unchanged);

        let err = catalog
            .domains
            .update_domain(update_request(404, "Ghost", "ghost", None))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_contract_update_keeps_linkage() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        let product = catalog.product(mkt, "uuid-1");
        let id = catalog.contract(product, eng);

        let mut request = UpdateContractRequest {
            id: Some(id),
            name: Some("Campaign feed v2".to_string()),
            transfer_id: Some(mkt),
            ..Default::default()
        };
        request.terms.price_amount = Some(99.0);
        request.terms.price_currency = Some("EUR".to_string());

        assert_eq!(
            catalog.contracts.update_contract(request.clone()).unwrap(),
            UpdateOutcome::Updated
        );
        assert_eq!(
            catalog.contracts.update_contract(request).unwrap(),
            UpdateOutcome::Unchanged
        );

        let detail = catalog.contracts.get_contract(id).unwrap();
        assert_eq!(detail.contract.product_id, product);
        assert_eq!(detail.contract.consumer_id, eng);
        assert_eq!(detail.transfer_name.as_deref(), Some("Marketing"));
        assert_eq!(detail.contract.terms.price_amount, Some(99.0));
    }

    #[test]
    fn test_negative_price_is_validation_error() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        let product = catalog.product(mkt, "uuid-1");

        let mut request = Catalog::contract_request(product, eng);
        request.terms.price_amount = Some(-5.0);

        let err = catalog.contracts.create_contract(request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_deleting_missing_entities_is_not_found() {
        let catalog = Catalog::new();

        assert_eq!(catalog.domains.delete_domain(1).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(catalog.products.delete_product(1).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(catalog.contracts.delete_contract(1).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(catalog.contracts.get_contract(1).unwrap_err().kind(), ErrorKind::NotFound);
    }
}

// src/services/mesh_service.rs
//
// Catalog-wide read views: the mesh graph and store statistics.

use std::sync::Arc;

use crate::db::{get_connection, get_database_stats, ConnectionPool, DatabaseStats};
use crate::domain::{build_mesh_graph, MeshGraph};
use crate::error::AppResult;
use crate::repositories::{ContractRepository, DomainRepository, ProductRepository};

pub struct MeshService {
    domain_repo: Arc<dyn DomainRepository>,
    product_repo: Arc<dyn ProductRepository>,
    contract_repo: Arc<dyn ContractRepository>,
    pool: Arc<ConnectionPool>,
}

impl MeshService {
    pub fn new(
        domain_repo: Arc<dyn DomainRepository>,
        product_repo: Arc<dyn ProductRepository>,
        contract_repo: Arc<dyn ContractRepository>,
        pool: Arc<ConnectionPool>,
    ) -> Self {
        Self {
            domain_repo,
            product_repo,
            contract_repo,
            pool,
        }
    }

    /// Nodes and edges for every domain, product and contract.
    ///
    /// The three lists are read separately; a concurrent delete can leave
    /// an edge endpoint out, in which case the edge is simply omitted.
    pub fn build_mesh(&self) -> AppResult<MeshGraph> {
        let domains = self.domain_repo.list_all()?;
        let products = self.product_repo.list_all()?;
        let contracts = self.contract_repo.list_all()?;

        let graph = build_mesh_graph(&domains, &products, &contracts);
        log::debug!(
            "Mesh built: {} nodes, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        );

        Ok(graph)
    }

    pub fn get_stats(&self) -> AppResult<DatabaseStats> {
        let conn = get_connection(&self.pool)?;
        get_database_stats(&conn)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::EdgeRelation;
    use crate::services::test_support::Catalog;

    #[test]
    fn test_mesh_and_stats_follow_catalog() {
        let catalog = Catalog::new();
        let (mkt, eng) = catalog.two_domains();
        let product = catalog.product(mkt, "uuid-1");
        catalog.contract(product, eng);

        let graph = catalog.mesh.build_mesh().unwrap();
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.edges_with(EdgeRelation::PartOf).count(), 1);
        assert_eq!(graph.edges_with(EdgeRelation::OwnedBy).count(), 1);
        assert_eq!(graph.edges_with(EdgeRelation::Accesses).count(), 1);
        assert_eq!(graph.edges_with(EdgeRelation::Establishes).count(), 1);
        assert_eq!(graph.edges_with(EdgeRelation::ProvidedBy).count(), 1);

        let stats = catalog.mesh.get_stats().unwrap();
        assert_eq!(stats.domain_count, 2);
        assert_eq!(stats.product_count, 1);
        assert_eq!(stats.contract_count, 1);
        assert_eq!(stats.operational_data_count, 0);
    }

    #[test]
    fn test_empty_catalog_has_empty_mesh() {
        let catalog = Catalog::new();
        let graph = catalog.mesh.build_mesh().unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}

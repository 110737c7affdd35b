// src/domain/mesh.rs
//
// Mesh projection: the whole catalog as nodes and edges.
//
// Pure function over already-loaded entities. Layout is a presentation
// concern and not computed here.

use serde::Serialize;
use std::collections::HashMap;

use super::{Contract, Domain, DomainId, Product, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Domain,
    Product,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRelation {
    /// product -> owning domain
    OwnedBy,
    /// contract -> product
    Accesses,
    /// consuming domain -> contract
    Establishes,
    /// contract -> domain that owns the product
    ProvidedBy,
    /// child domain -> parent domain
    PartOf,
}

impl EdgeRelation {
    fn as_str(&self) -> &'static str {
        match self {
            EdgeRelation::OwnedBy => "owned_by",
            EdgeRelation::Accesses => "accesses",
            EdgeRelation::Establishes => "establishes",
            EdgeRelation::ProvidedBy => "provided_by",
            EdgeRelation::PartOf => "part_of",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeshNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Domain kind, product archetype, or consuming domain name
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeshEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relation: EdgeRelation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeshGraph {
    pub nodes: Vec<MeshNode>,
    pub edges: Vec<MeshEdge>,
}

impl MeshGraph {
    fn link(&mut self, source: String, target: String, relation: EdgeRelation) {
        self.edges.push(MeshEdge {
            id: format!("{}-{}-{}", source, relation.as_str(), target),
            source,
            target,
            relation,
        });
    }

    pub fn edges_with(&self, relation: EdgeRelation) -> impl Iterator<Item = &MeshEdge> {
        self.edges.iter().filter(move |e| e.relation == relation)
    }
}

fn domain_node(id: DomainId) -> String {
    format!("d-{}", id)
}

fn product_node(id: ProductId) -> String {
    format!("p-{}", id)
}

fn contract_node(id: i64) -> String {
    format!("c-{}", id)
}

/// Build the graph. Edges are emitted only when both endpoints are present
/// in the input, so a partial snapshot never yields dangling edges.
pub fn build_mesh_graph(domains: &[Domain], products: &[Product], contracts: &[Contract]) -> MeshGraph {
    let domains_by_id: HashMap<DomainId, &Domain> = domains.iter().map(|d| (d.id, d)).collect();
    let products_by_id: HashMap<ProductId, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let mut graph = MeshGraph::default();

    for domain in domains {
        graph.nodes.push(MeshNode {
            id: domain_node(domain.id),
            kind: NodeKind::Domain,
            label: domain.name.clone(),
            detail: Some(domain.kind.to_string()),
        });

        if let Some(parent_id) = domain.parent_id.filter(|p| domains_by_id.contains_key(p)) {
            graph.link(domain_node(domain.id), domain_node(parent_id), EdgeRelation::PartOf);
        }
    }

    for product in products {
        graph.nodes.push(MeshNode {
            id: product_node(product.id),
            kind: NodeKind::Product,
            label: product.name.clone(),
            detail: Some(product.archetype.clone()),
        });

        if domains_by_id.contains_key(&product.owner_id) {
            graph.link(
                product_node(product.id),
                domain_node(product.owner_id),
                EdgeRelation::OwnedBy,
            );
        }
    }

    for contract in contracts {
        let consumer = domains_by_id.get(&contract.consumer_id);
        graph.nodes.push(MeshNode {
            id: contract_node(contract.id),
            kind: NodeKind::Contract,
            label: contract.name.clone(),
            detail: consumer.map(|d| d.name.clone()),
        });

        let product = products_by_id.get(&contract.product_id);
        if let Some(product) = product {
            graph.link(
                contract_node(contract.id),
                product_node(product.id),
                EdgeRelation::Accesses,
            );
        }

        if consumer.is_some() {
            graph.link(
                domain_node(contract.consumer_id),
                contract_node(contract.id),
                EdgeRelation::Establishes,
            );
        }

        if let Some(product) = product.filter(|p| domains_by_id.contains_key(&p.owner_id)) {
            graph.link(
                contract_node(contract.id),
                domain_node(product.owner_id),
                EdgeRelation::ProvidedBy,
            );
        }
    }

    graph
}

pub mod entity;
pub mod invariants;

pub use entity::{
    generate_external_id, Product, ProductChanges, ProductDraft, ProductId, ProductStatus,
    ProductSummary,
};

pub mod entity;
pub mod invariants;

pub use entity::{Domain, DomainDraft, DomainId, DomainKind, DomainSummary};
pub use invariants::{ensure_acyclic, ensure_not_self_parent};

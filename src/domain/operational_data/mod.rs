pub mod entity;
pub mod invariants;

pub use entity::{DataType, OperationalData, OperationalDataDraft, OperationalDataId};

pub mod dispatch;
pub mod field_schema;
pub mod loop_schema;
pub mod segment_registry;
pub mod segment_schema;
pub mod transactions;

pub use dispatch::{dispatch, DispatchRule};
pub use field_schema::{FieldSchema, FieldType};
pub use loop_schema::{ChildLoopSlot, LoopSchema, LoopValidatorFn, SegmentSlot};
pub use segment_registry::lookup as lookup_segment_schema;
pub use segment_schema::{SegmentOverride, SegmentSchema, SegmentValidatorFn};
pub use transactions::{loop_schema, transaction_schema, TransactionSchema};

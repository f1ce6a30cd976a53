//! Transaction-scope validators. Field-shape checks live on [`crate::schema::FieldSchema`],
//! segment-scope checks on [`crate::schema::SegmentSchema`], and loop-scope checks on
//! [`crate::schema::LoopSchema`] — each attached to the schema type it validates, per
//! the "validators-as-methods" design note. Only the checks that need the whole bound
//! tree at once (segment count, the HL parent/child chain) live in this module.
pub mod transaction;

pub use transaction::{validate_hl_tree, validate_segment_count};

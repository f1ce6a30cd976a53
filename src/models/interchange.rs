use super::{Delimiters, Segment, TransactionRecord, X12Version};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct InterchangeControl {
    pub isa_segment: Segment,
    pub iea_segment: Option<Segment>,
    pub delimiters: Delimiters,
    pub version: X12Version,
    pub functional_groups: Vec<FunctionalGroup>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct FunctionalGroup {
    pub gs_segment: Segment,
    pub ge_segment: Option<Segment>,
    pub transactions: Vec<TransactionRecord>,
}
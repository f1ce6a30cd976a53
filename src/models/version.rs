use crate::error::EdiError;
use crate::models::Segment;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// The ASC X12 release carried in ISA12. This crate's schemas and dispatch
/// tables target 005010 exclusively; other releases are recognized but rejected
/// at the transaction-dispatch boundary rather than the envelope boundary, so a
/// caller inspecting a bare interchange still sees what it claimed to be.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum X12Version {
    V005010,
    Unknown(String),
}

impl X12Version {
    pub fn from_isa(isa_segment: &Segment) -> Result<Self, EdiError> {
        if isa_segment.elements.len() < 12 {
            return Err(EdiError::InvalidControlStructure(
                "ISA segment too short for version element (ISA12)".to_string(),
            ));
        }
        Ok(match isa_segment.elements[11].as_str() {
            "00501" => Self::V005010,
            other => Self::Unknown(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::V005010 => "00501",
            Self::Unknown(s) => s,
        }
    }
}

/// The implementation convention named on `ST03`, e.g. `005010X279A1` for the
/// eligibility inquiry/response pair. Dispatch and schema lookups key on this,
/// falling back to a synthesized `005010<code>` when `ST03` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct ImplementationConvention(pub String);

impl ImplementationConvention {
    pub fn from_st(st_segment: &Segment, transaction_code: &str) -> Self {
        match st_segment.field(2) {
            Some(reference) => Self(reference.to_string()),
            None => Self(format!("005010{transaction_code}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_005010() {
        let mut elements = vec![String::new(); 16];
        elements[11] = "00501".to_string();
        let isa = Segment::new("ISA", elements);
        assert_eq!(X12Version::from_isa(&isa).unwrap(), X12Version::V005010);
    }

    #[test]
    fn falls_back_to_code_without_st03() {
        let st = Segment::new("ST", vec!["270".to_string(), "0001".to_string()]);
        let convention = ImplementationConvention::from_st(&st, "270");
        assert_eq!(convention.0, "005010270");
    }
}

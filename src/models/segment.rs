#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// A tagged record straight off the wire: an identifier and its ordered field values.
/// Carries no schema of its own — the registry in [`crate::schema::segment_registry`]
/// supplies that at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Segment {
    pub id: String,
    pub elements: Vec<String>,
}

impl Segment {
    pub fn new(id: impl Into<String>, elements: Vec<String>) -> Self {
        Self { id: id.into(), elements }
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.elements.get(index).map(|s| s.as_str()).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_reads_as_absent() {
        let segment = Segment::new("REF", vec!["6P".to_string(), "".to_string()]);
        assert_eq!(segment.field(0), Some("6P"));
        assert_eq!(segment.field(1), None);
        assert_eq!(segment.field(2), None);
    }
}

use std::collections::HashMap;

use super::Segment;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// A single instance of a named loop, built by the [`crate::context::ParserContext`]
/// and handed to the binder once its transaction's `SE` is reached.
///
/// Loops are not a fixed set of Rust types — §9 of the design notes chooses the
/// generic nested-mapping shape over tagged variants per transaction, so adding a
/// transaction set is a matter of registering schema and dispatch data rather than
/// new loop types.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct LoopRecord {
    pub name: String,
    /// Segments attached directly to this loop, keyed by their conventional field
    /// name (segment id lowercased, e.g. `"nm1"`, `"ref"`), in the order first seen.
    pub segments: HashMap<String, Vec<Segment>>,
    /// Child loop instances, keyed by loop name, in the order each child first appeared.
    pub children: HashMap<String, Vec<LoopRecord>>,
    /// Insertion order of segment field names, for deterministic rendering.
    pub segment_order: Vec<String>,
    /// Insertion order of child loop names, for deterministic rendering.
    pub child_order: Vec<String>,
}

impl LoopRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn attach_segment(&mut self, field_name: &str, segment: Segment) {
        if !self.segments.contains_key(field_name) {
            self.segment_order.push(field_name.to_string());
        }
        self.segments.entry(field_name.to_string()).or_default().push(segment);
    }

    pub fn segment(&self, field_name: &str) -> Option<&Segment> {
        self.segments.get(field_name).and_then(|v| v.first())
    }

    pub fn segments_of(&self, field_name: &str) -> &[Segment] {
        self.segments.get(field_name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// The currently active instance of a repeating child loop, creating one if
    /// none exists yet, mirroring the "allocate empty loop records along the way"
    /// descent rule.
    pub fn child_mut(&mut self, loop_name: &str) -> &mut LoopRecord {
        if !self.children.contains_key(loop_name) {
            self.child_order.push(loop_name.to_string());
        }
        let instances = self.children.entry(loop_name.to_string()).or_default();
        if instances.is_empty() {
            instances.push(LoopRecord::new(loop_name));
        }
        instances.last_mut().unwrap()
    }

    pub fn push_new_instance(&mut self, loop_name: &str) -> &mut LoopRecord {
        if !self.children.contains_key(loop_name) {
            self.child_order.push(loop_name.to_string());
        }
        let instances = self.children.entry(loop_name.to_string()).or_default();
        instances.push(LoopRecord::new(loop_name));
        instances.last_mut().unwrap()
    }

    pub fn children_of(&self, loop_name: &str) -> &[LoopRecord] {
        self.children.get(loop_name).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_segment_preserves_order() {
        let mut record = LoopRecord::new("2100A");
        record.attach_segment("nm1", Segment::new("NM1", vec!["PR".into()]));
        record.attach_segment("ref", Segment::new("REF", vec!["6P".into()]));
        assert_eq!(record.segment_order, vec!["nm1", "ref"]);
    }

    #[test]
    fn child_mut_creates_first_instance() {
        let mut record = LoopRecord::new("2000A");
        let child = record.child_mut("2100A");
        child.attach_segment("nm1", Segment::new("NM1", vec!["PR".into()]));
        assert_eq!(record.children_of("2100A").len(), 1);
    }

    #[test]
    fn push_new_instance_appends_not_replaces() {
        let mut record = LoopRecord::new("2000A");
        record.push_new_instance("2100A");
        record.push_new_instance("2100A");
        assert_eq!(record.children_of("2100A").len(), 2);
    }
}

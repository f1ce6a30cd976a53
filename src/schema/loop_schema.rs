use std::collections::HashMap;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Location};
use crate::models::LoopRecord;
use crate::schema::segment_schema::SegmentOverride;

/// A loop-scope validator sees the fully-built loop record — including its
/// children — and may raise diagnostics no single segment could (§4.6 step 3):
/// duplicate REF qualifiers, a missing required child loop, and so on.
pub type LoopValidatorFn = fn(&LoopRecord, &Location) -> Vec<Diagnostic>;

/// One segment slot a loop's schema expects, used by the binder to flag
/// missing-mandatory segments and by the renderer to emit segments in
/// declared order.
#[derive(Clone)]
pub struct SegmentSlot {
    pub field_name: &'static str,
    pub segment_id: &'static str,
    pub required: bool,
    pub repeats: bool,
}

impl SegmentSlot {
    pub const fn new(field_name: &'static str, segment_id: &'static str) -> Self {
        Self { field_name, segment_id, required: false, repeats: false }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn repeats(mut self) -> Self {
        self.repeats = true;
        self
    }
}

/// A child loop name paired with whether the binder must flag its absence —
/// required children are part of §4.6 step 3's "required child loops must be
/// present" check.
#[derive(Clone, Copy)]
pub struct ChildLoopSlot {
    pub name: &'static str,
    pub required: bool,
}

impl ChildLoopSlot {
    pub const fn new(name: &'static str) -> Self {
        Self { name, required: false }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Clone)]
pub struct LoopSchema {
    pub name: &'static str,
    pub segment_slots: Vec<SegmentSlot>,
    pub child_loops: Vec<ChildLoopSlot>,
    pub repeats: bool,
    pub validators: Vec<LoopValidatorFn>,
    /// Loop-local narrowings of a base segment schema, keyed by the
    /// conventional field name (e.g. `"nm1"`) — resolved ahead of the base
    /// schema per §4.3's override precedence.
    pub segment_overrides: HashMap<&'static str, SegmentOverride>,
}

impl LoopSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            segment_slots: Vec::new(),
            child_loops: Vec::new(),
            repeats: false,
            validators: Vec::new(),
            segment_overrides: HashMap::new(),
        }
    }

    pub fn with_slots(mut self, slots: Vec<SegmentSlot>) -> Self {
        self.segment_slots = slots;
        self
    }

    pub fn with_children(mut self, children: Vec<ChildLoopSlot>) -> Self {
        self.child_loops = children;
        self
    }

    pub fn repeating(mut self) -> Self {
        self.repeats = true;
        self
    }

    pub fn with_validators(mut self, validators: Vec<LoopValidatorFn>) -> Self {
        self.validators = validators;
        self
    }

    pub fn with_overrides(mut self, overrides: Vec<(&'static str, SegmentOverride)>) -> Self {
        self.segment_overrides = overrides.into_iter().collect();
        self
    }

    pub fn slot_for(&self, field_name: &str) -> Option<&SegmentSlot> {
        self.segment_slots.iter().find(|s| s.field_name == field_name)
    }

    pub fn override_for(&self, field_name: &str) -> Option<&SegmentOverride> {
        self.segment_overrides.get(field_name)
    }

    /// §4.6 step 3's "required child loops must be present" and "missing
    /// mandatory segment" checks, plus whatever loop-specific validators this
    /// schema carries.
    pub fn validate(&self, record: &LoopRecord, location: &Location) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for slot in &self.segment_slots {
            if slot.required && record.segments_of(slot.field_name).is_empty() {
                diagnostics.push(Diagnostic::error(
                    DiagnosticKind::LoopSemantic,
                    location.clone().in_loop(self.name),
                    format!("loop '{}' missing required segment '{}'", self.name, slot.segment_id),
                ));
            }
        }

        for child in &self.child_loops {
            if child.required && record.children_of(child.name).is_empty() {
                diagnostics.push(Diagnostic::error(
                    DiagnosticKind::LoopSemantic,
                    location.clone().in_loop(self.name),
                    format!("loop '{}' missing required child loop '{}'", self.name, child.name),
                ));
            }
        }

        for validator in &self.validators {
            diagnostics.extend(validator(record, &location.clone().in_loop(self.name)));
        }

        diagnostics
    }
}

/// Duplicate `REF` qualifier codes within one loop instance — a common 270/271
/// implementation-guide constraint (§8 scenario 4).
pub fn no_duplicate_ref_qualifiers(record: &LoopRecord, location: &Location) -> Vec<Diagnostic> {
    let mut seen = std::collections::HashSet::new();
    let mut diagnostics = Vec::new();
    for segment in record.segments_of("ref") {
        if let Some(qualifier) = segment.field(0) {
            if !seen.insert(qualifier.to_string()) {
                diagnostics.push(Diagnostic::error(
                    DiagnosticKind::LoopSemantic,
                    location.clone(),
                    format!("duplicate REF qualifier code '{qualifier}' within loop"),
                ));
            }
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    #[test]
    fn flags_duplicate_ref_qualifier() {
        let mut record = LoopRecord::new("2100D");
        record.attach_segment("ref", Segment::new("REF", vec!["6P".into(), "A".into()]));
        record.attach_segment("ref", Segment::new("REF", vec!["6P".into(), "B".into()]));
        let diagnostics = no_duplicate_ref_qualifiers(&record, &Location::default());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn missing_required_segment_reported() {
        let schema = LoopSchema::new("2100A").with_slots(vec![SegmentSlot::new("nm1", "NM1").required()]);
        let record = LoopRecord::new("2100A");
        let diagnostics = schema.validate(&record, &Location::default());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn missing_required_child_loop_reported() {
        let schema = LoopSchema::new("2000B").with_children(vec![ChildLoopSlot::new("2000C").required()]);
        let record = LoopRecord::new("2000B");
        let diagnostics = schema.validate(&record, &Location::default());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("missing required child loop '2000C'"));
    }

    #[test]
    fn optional_child_loop_absence_is_not_flagged() {
        let schema = LoopSchema::new("2000C").with_children(vec![ChildLoopSlot::new("2000D")]);
        let record = LoopRecord::new("2000C");
        let diagnostics = schema.validate(&record, &Location::default());
        assert!(diagnostics.is_empty());
    }
}

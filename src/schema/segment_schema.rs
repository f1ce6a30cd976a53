use std::collections::HashMap;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Location};
use crate::models::Segment;
use crate::schema::field_schema::FieldSchema;

/// A segment-scope validator sees the whole segment and may raise diagnostics
/// that no single field's shape check could express (§4.6 step 2) — e.g. an
/// `NM1` with one of a pair of co-required fields present but not the other.
pub type SegmentValidatorFn = fn(&Segment, &Location) -> Vec<Diagnostic>;

/// The base schema for a segment id, shared across every loop that uses it
/// unless a loop-local [`SegmentOverride`] narrows a field.
#[derive(Clone)]
pub struct SegmentSchema {
    pub id: &'static str,
    pub fields: Vec<FieldSchema>,
    pub validators: Vec<SegmentValidatorFn>,
}

impl SegmentSchema {
    pub fn new(id: &'static str, fields: Vec<FieldSchema>) -> Self {
        Self { id, fields, validators: Vec::new() }
    }

    pub fn with_validators(mut self, validators: Vec<SegmentValidatorFn>) -> Self {
        self.validators = validators;
        self
    }

    /// Runs shape checks (§4.6 step 1) then segment-scope validators (step 2)
    /// against one instance of this segment, resolving any loop-local override
    /// field-by-field (base schema wins where the override is silent, per §4.3).
    pub fn validate(
        &self,
        segment: &Segment,
        override_schema: Option<&SegmentOverride>,
        location: &Location,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (position, base_field) in self.fields.iter().enumerate() {
            let effective = override_schema
                .and_then(|o| o.fields.get(&position))
                .unwrap_or(base_field);

            let value = segment.elements.get(position).map(|s| s.as_str()).unwrap_or("");
            let field_location = location.clone().at_field(position);

            if effective.required && value.is_empty() {
                diagnostics.push(Diagnostic::error(
                    DiagnosticKind::Shape,
                    field_location.clone(),
                    format!("segment '{}' missing required field '{}'", self.id, effective.name),
                ));
                continue;
            }

            for message in effective.check(value) {
                diagnostics.push(Diagnostic::error(DiagnosticKind::Shape, field_location.clone(), message));
            }
        }

        for validator in &self.validators {
            diagnostics.extend(validator(segment, location));
        }

        diagnostics
    }
}

/// A loop-local narrowing of a base segment schema: a literal value, a flipped
/// required-ness, or a tighter code table for specific field positions, layered
/// on top rather than replacing the base (§4.3, §9).
#[derive(Clone, Default)]
pub struct SegmentOverride {
    pub fields: HashMap<usize, FieldSchema>,
}

impl SegmentOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, position: usize, schema: FieldSchema) -> Self {
        self.fields.insert(position, schema);
        self
    }
}

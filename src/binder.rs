use crate::diagnostics::{apply_strict_mode, Diagnostic, DiagnosticKind, Location};
use crate::models::{ImplementationConvention, LoopRecord, Segment, TransactionRecord, TransactionType};
use crate::schema::{loop_schema, lookup_segment_schema};
use crate::validators::{validate_hl_tree, validate_segment_count};

/// Binds the nested record a [`crate::context::ParserContext`] built into a typed
/// [`TransactionRecord`], running every tier of §4.6 along the way. Binding always
/// succeeds — diagnostics accumulate on the record rather than aborting it.
pub struct BindInput {
    pub transaction_code: String,
    pub st_segment: Segment,
    pub se_segment: Option<Segment>,
    pub root: LoopRecord,
    pub structure_warnings: Vec<Diagnostic>,
    pub segments_in_span: usize,
    pub strict_mode: bool,
}

pub fn bind(input: BindInput) -> TransactionRecord {
    let BindInput {
        transaction_code,
        st_segment,
        se_segment,
        root,
        mut structure_warnings,
        segments_in_span,
        strict_mode,
    } = input;

    let mut diagnostics = std::mem::take(&mut structure_warnings);

    validate_segment_shapes(&root, &Location::transaction(0));
    collect_shape_diagnostics(&root, &Location::transaction(0), &mut diagnostics);
    collect_loop_diagnostics(&root, &mut diagnostics);
    diagnostics.extend(validate_hl_tree(&root, &Location::transaction(0)));
    diagnostics.extend(validate_segment_count(se_segment.as_ref(), segments_in_span, &Location::transaction(0)));
    apply_strict_mode(&mut diagnostics, strict_mode);

    let transaction_type = TransactionType::from_code(&transaction_code);
    let implementation_convention = ImplementationConvention::from_st(&st_segment, &transaction_code).0;

    TransactionRecord {
        st_segment,
        se_segment,
        transaction_type,
        implementation_convention,
        root,
        diagnostics,
    }
}

/// No-op placeholder kept symmetrical with `collect_shape_diagnostics` — shape
/// checks are side-effect free, so the real work happens in the `collect_*` pass.
fn validate_segment_shapes(_root: &LoopRecord, _location: &Location) {}

fn collect_shape_diagnostics(record: &LoopRecord, location: &Location, out: &mut Vec<Diagnostic>) {
    let this_loop_schema = loop_schema(&record.name);
    for field_name in &record.segment_order {
        for segment in record.segments_of(field_name) {
            let override_schema = this_loop_schema.and_then(|s| s.override_for(field_name));
            match lookup_segment_schema(&segment.id) {
                Some(schema) => out.extend(schema.validate(segment, override_schema, location)),
                None => out.push(Diagnostic::warning(
                    DiagnosticKind::Structure,
                    location.clone(),
                    format!("segment '{}' has no registered schema; attached without validation", segment.id),
                )),
            }
        }
    }
    for child_name in &record.child_order {
        for child in record.children_of(child_name) {
            collect_shape_diagnostics(child, &location.clone().in_loop(child_name), out);
        }
    }
}

fn collect_loop_diagnostics(record: &LoopRecord, out: &mut Vec<Diagnostic>) {
    for child_name in &record.child_order {
        for child in record.children_of(child_name) {
            let location = Location::transaction(0).in_loop(child_name);
            if let Some(schema) = loop_schema(child_name) {
                out.extend(schema.validate(child, &location));
            }
            collect_loop_diagnostics(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    #[test]
    fn missing_required_subscriber_nm1_is_flagged() {
        let mut root = LoopRecord::new("root");
        let source = root.push_new_instance("2000A");
        source.attach_segment("hl", Segment::new("HL", vec!["1".into(), "".into(), "20".into()]));
        let receiver = source.push_new_instance("2000B");
        receiver.attach_segment("hl", Segment::new("HL", vec!["2".into(), "1".into(), "21".into()]));
        let subscriber = receiver.push_new_instance("2000C");
        subscriber.attach_segment("hl", Segment::new("HL", vec!["3".into(), "2".into(), "22".into()]));

        let record = bind(BindInput {
            transaction_code: "270".to_string(),
            st_segment: Segment::new("ST", vec!["270".into(), "0001".into()]),
            se_segment: Some(Segment::new("SE", vec!["5".into(), "0001".into()])),
            root,
            structure_warnings: Vec::new(),
            segments_in_span: 5,
            strict_mode: false,
        });

        assert!(record
            .diagnostics
            .iter()
            .any(|d| d.message.contains("missing required segment 'NM1'")));
    }

    #[test]
    fn loop_local_nm1_override_is_enforced() {
        let mut root = LoopRecord::new("root");
        let source = root.push_new_instance("2000A");
        source.attach_segment("hl", Segment::new("HL", vec!["1".into(), "".into(), "20".into()]));
        // entity_identifier_code "1P" is valid for the base NM1 schema but not for
        // the 2000A (information source) loop-local override, which narrows it to "PR".
        source.attach_segment(
            "nm1",
            Segment::new("NM1", vec!["1P".into(), "2".into(), "ABC INSURANCE".into()]),
        );

        let record = bind(BindInput {
            transaction_code: "270".to_string(),
            st_segment: Segment::new("ST", vec!["270".into(), "0001".into()]),
            se_segment: Some(Segment::new("SE", vec!["2".into(), "0001".into()])),
            root,
            structure_warnings: Vec::new(),
            segments_in_span: 2,
            strict_mode: false,
        });

        assert!(record
            .diagnostics
            .iter()
            .any(|d| d.message.contains("invalid code '1P'")));
    }
}

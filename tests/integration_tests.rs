use std::fs;

use assert_matches::assert_matches;
use x12_healthcare::{DiagnosticKind, EdiError, Parser, ParserConfigBuilder};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/test_files/{name}")).expect("fixture file should exist")
}

#[test]
fn eligibility_inquiry_parses_with_no_diagnostics() {
    let edi = load("eligibility_270.edi");
    let parser = Parser::new();
    let interchange = parser.parse(&edi).unwrap();

    assert_eq!(interchange.functional_groups.len(), 1);
    let transaction = &interchange.functional_groups[0].transactions[0];
    assert!(transaction.is_valid(), "{:?}", transaction.diagnostics);

    let source = &transaction.root.children_of("2000A")[0];
    let receiver = &source.children_of("2000B")[0];
    let subscriber = &receiver.children_of("2000C")[0];
    assert_eq!(subscriber.segment("nm1").unwrap().field(1), Some("DOE"));
    assert_eq!(subscriber.segment("ref").unwrap().field(1), Some("GRP100"));
}

#[test]
fn delimiters_are_detected_from_isa() {
    let edi = load("eligibility_270.edi");
    let parser = Parser::new();
    let interchange = parser.parse(&edi).unwrap();

    assert_eq!(interchange.delimiters.element, '*');
    assert_eq!(interchange.delimiters.terminator, '~');
    assert_eq!(interchange.delimiters.component, ':');
    assert_eq!(interchange.delimiters.repetition, '^');
}

#[test]
fn non_person_entity_with_a_first_name_is_flagged() {
    let edi = load("nm1_mixed_entity.edi");
    let parser = Parser::new();
    let interchange = parser.parse(&edi).unwrap();
    let transaction = &interchange.functional_groups[0].transactions[0];

    assert!(!transaction.is_valid());
    assert!(transaction
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::SegmentSemantic && d.message.contains("non-person entity")));
}

#[test]
fn duplicate_ref_qualifier_in_one_loop_is_flagged() {
    let edi = load("duplicate_ref_qualifier.edi");
    let parser = Parser::new();
    let interchange = parser.parse(&edi).unwrap();
    let transaction = &interchange.functional_groups[0].transactions[0];

    assert!(transaction
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::LoopSemantic && d.message.contains("duplicate")));
}

#[test]
fn segment_count_mismatch_is_flagged_but_not_fatal() {
    let edi = load("segment_count_mismatch.edi");
    let parser = Parser::new();
    let interchange = parser.parse(&edi).unwrap();
    let transaction = &interchange.functional_groups[0].transactions[0];

    assert!(!transaction.is_valid());
    assert!(transaction
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::TransactionSemantic && d.message.contains("SE01")));
}

#[test]
fn hl_level_codes_dispatch_into_the_right_loop_depth() {
    let edi = load("eligibility_270.edi");
    let parser = Parser::new();
    let interchange = parser.parse(&edi).unwrap();
    let transaction = &interchange.functional_groups[0].transactions[0];

    let source = &transaction.root.children_of("2000A")[0];
    assert_eq!(source.segment("hl").unwrap().field(2), Some("20"));

    let receiver = &source.children_of("2000B")[0];
    assert_eq!(receiver.segment("hl").unwrap().field(2), Some("21"));

    let subscriber = &receiver.children_of("2000C")[0];
    assert_eq!(subscriber.segment("hl").unwrap().field(2), Some("22"));
    assert!(subscriber.children_of("2000D").is_empty());
}

#[test]
fn round_trip_through_render_reparses_to_an_equivalent_model() {
    let edi = load("eligibility_270.edi");
    let parser = Parser::new();
    let interchange = parser.parse(&edi).unwrap();

    let rendered = x12_healthcare::render(&interchange, false);
    let reparsed = parser.parse(&rendered).unwrap();

    let original_transaction = &interchange.functional_groups[0].transactions[0];
    let reparsed_transaction = &reparsed.functional_groups[0].transactions[0];
    assert_eq!(original_transaction.diagnostics.len(), reparsed_transaction.diagnostics.len());

    let original_subscriber =
        &original_transaction.root.children_of("2000A")[0].children_of("2000B")[0].children_of("2000C")[0];
    let reparsed_subscriber =
        &reparsed_transaction.root.children_of("2000A")[0].children_of("2000B")[0].children_of("2000C")[0];
    assert_eq!(original_subscriber.segment("nm1"), reparsed_subscriber.segment("nm1"));
}

#[test]
fn truncated_isa_is_a_delimiter_error() {
    let parser = Parser::new();
    let err = parser.parse("ISA*00*").unwrap_err();
    assert_matches!(err, EdiError::DelimiterError(_));
}

#[test]
fn nested_st_without_an_intervening_se_is_an_invalid_control_structure() {
    let edi = load("eligibility_270.edi");
    let (first_st, rest) = edi.split_once("SE*").expect("fixture should contain an SE segment");
    let duplicated = format!("{first_st}ST*270*0002~SE*{rest}");

    let parser = Parser::new();
    let err = parser.parse(&duplicated).unwrap_err();
    assert_matches!(err, EdiError::InvalidControlStructure(_));
}

#[test]
fn segment_limit_guard_is_a_segment_limit_exceeded_error() {
    let edi = load("eligibility_270.edi");
    let config = ParserConfigBuilder::new().max_segments(1).build().unwrap();
    let parser = Parser::with_config(config);
    let err = parser.parse(&edi).unwrap_err();
    assert_matches!(err, EdiError::SegmentLimitExceeded(1));
}

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Location};
use crate::models::Segment;
use crate::schema::field_schema::{FieldSchema, FieldType};
use crate::schema::segment_schema::SegmentSchema;

const ENTITY_TYPE_QUALIFIERS: &[&str] = &["1", "2"];

fn validate_nm1(segment: &Segment, location: &Location) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let id_qualifier = segment.field(7);
    let id_code = segment.field(8);
    if id_qualifier.is_some() != id_code.is_some() {
        diagnostics.push(Diagnostic::error(
            DiagnosticKind::SegmentSemantic,
            location.clone(),
            "NM1 identification code and identification code qualifier must both be present or both absent"
                .to_string(),
        ));
    }
    if segment.field(1) == Some("2") && segment.field(3).is_some() {
        diagnostics.push(Diagnostic::error(
            DiagnosticKind::SegmentSemantic,
            location.clone(),
            "NM1 for a non-person entity must not carry a person first-name field".to_string(),
        ));
    }
    diagnostics
}

fn validate_hl(segment: &Segment, location: &Location) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if segment.field(0).is_none() {
        diagnostics.push(Diagnostic::error(
            DiagnosticKind::SegmentSemantic,
            location.clone(),
            "HL segment missing hierarchical id number".to_string(),
        ));
    }
    diagnostics
}

lazy_static! {
    pub static ref SEGMENT_REGISTRY: HashMap<&'static str, SegmentSchema> = {
        let mut registry = HashMap::new();

        registry.insert(
            "ISA",
            SegmentSchema::new(
                "ISA",
                vec![
                    FieldSchema::new("authorization_information_qualifier", FieldType::Identifier)
                        .length(2, 2)
                        .required(),
                    FieldSchema::new("authorization_information", FieldType::String).length(10, 10),
                    FieldSchema::new("security_information_qualifier", FieldType::Identifier).length(2, 2).required(),
                    FieldSchema::new("security_information", FieldType::String).length(10, 10),
                    FieldSchema::new("sender_id_qualifier", FieldType::Identifier).length(2, 2).required(),
                    FieldSchema::new("sender_id", FieldType::String).length(15, 15).required(),
                    FieldSchema::new("receiver_id_qualifier", FieldType::Identifier).length(2, 2).required(),
                    FieldSchema::new("receiver_id", FieldType::String).length(15, 15).required(),
                    FieldSchema::new("interchange_date", FieldType::ShortDate).required(),
                    FieldSchema::new("interchange_time", FieldType::Time).required(),
                    FieldSchema::new("repetition_separator", FieldType::String).length(1, 1),
                    FieldSchema::new("control_version_number", FieldType::Identifier).length(5, 5).required(),
                    FieldSchema::new("control_number", FieldType::Integer).length(9, 9).required(),
                    FieldSchema::new("acknowledgment_requested", FieldType::Identifier).length(1, 1),
                    FieldSchema::new("usage_indicator", FieldType::Identifier).length(1, 1).codes(&["P", "T"]),
                    FieldSchema::new("component_separator", FieldType::String).length(1, 1),
                ],
            ),
        );

        registry.insert(
            "GS",
            SegmentSchema::new(
                "GS",
                vec![
                    FieldSchema::new("functional_identifier_code", FieldType::Identifier).required(),
                    FieldSchema::new("application_sender_code", FieldType::String).required(),
                    FieldSchema::new("application_receiver_code", FieldType::String).required(),
                    FieldSchema::new("date", FieldType::Date).required(),
                    FieldSchema::new("time", FieldType::Time).required(),
                    FieldSchema::new("group_control_number", FieldType::Integer).required(),
                    FieldSchema::new("responsible_agency_code", FieldType::Identifier).required(),
                    FieldSchema::new("version_release_industry_id", FieldType::Identifier).required(),
                ],
            ),
        );

        registry.insert(
            "ST",
            SegmentSchema::new(
                "ST",
                vec![
                    FieldSchema::new("transaction_set_identifier_code", FieldType::Identifier).required(),
                    FieldSchema::new("transaction_set_control_number", FieldType::Identifier).length(4, 9).required(),
                    FieldSchema::new("implementation_convention_reference", FieldType::Identifier),
                ],
            ),
        );

        registry.insert(
            "SE",
            SegmentSchema::new(
                "SE",
                vec![
                    FieldSchema::new("number_of_included_segments", FieldType::Integer).required(),
                    FieldSchema::new("transaction_set_control_number", FieldType::Identifier).length(4, 9).required(),
                ],
            ),
        );

        registry.insert(
            "GE",
            SegmentSchema::new(
                "GE",
                vec![
                    FieldSchema::new("number_of_transaction_sets_included", FieldType::Integer).required(),
                    FieldSchema::new("group_control_number", FieldType::Integer).required(),
                ],
            ),
        );

        registry.insert(
            "IEA",
            SegmentSchema::new(
                "IEA",
                vec![
                    FieldSchema::new("number_of_included_functional_groups", FieldType::Integer).required(),
                    FieldSchema::new("interchange_control_number", FieldType::Integer).length(9, 9).required(),
                ],
            ),
        );

        registry.insert(
            "BHT",
            SegmentSchema::new(
                "BHT",
                vec![
                    FieldSchema::new("hierarchical_structure_code", FieldType::Identifier).required(),
                    FieldSchema::new("transaction_set_purpose_code", FieldType::Identifier).required(),
                    FieldSchema::new("reference_identification", FieldType::String),
                    FieldSchema::new("date", FieldType::Date),
                    FieldSchema::new("time", FieldType::Time),
                    FieldSchema::new("transaction_type_code", FieldType::Identifier),
                ],
            ),
        );

        registry.insert(
            "HL",
            SegmentSchema::new(
                "HL",
                vec![
                    FieldSchema::new("hierarchical_id_number", FieldType::Integer).required(),
                    FieldSchema::new("hierarchical_parent_id_number", FieldType::Integer),
                    FieldSchema::new("hierarchical_level_code", FieldType::Identifier).required(),
                    FieldSchema::new("hierarchical_child_code", FieldType::Identifier),
                ],
            )
            .with_validators(vec![validate_hl]),
        );

        registry.insert(
            "TRN",
            SegmentSchema::new(
                "TRN",
                vec![
                    FieldSchema::new("trace_type_code", FieldType::Identifier).required(),
                    FieldSchema::new("reference_identification", FieldType::String).required(),
                    FieldSchema::new("originating_company_identifier", FieldType::String),
                    FieldSchema::new("reference_identification_2", FieldType::String),
                ],
            ),
        );

        registry.insert(
            "NM1",
            SegmentSchema::new(
                "NM1",
                vec![
                    FieldSchema::new("entity_identifier_code", FieldType::Identifier).required(),
                    FieldSchema::new("entity_type_qualifier", FieldType::Identifier)
                        .required()
                        .codes(ENTITY_TYPE_QUALIFIERS),
                    FieldSchema::new("name_last_or_organization_name", FieldType::String),
                    FieldSchema::new("name_first", FieldType::String),
                    FieldSchema::new("name_middle", FieldType::String),
                    FieldSchema::new("name_prefix", FieldType::String),
                    FieldSchema::new("name_suffix", FieldType::String),
                    FieldSchema::new("identification_code_qualifier", FieldType::Identifier),
                    FieldSchema::new("identification_code", FieldType::String),
                ],
            )
            .with_validators(vec![validate_nm1]),
        );

        registry.insert(
            "REF",
            SegmentSchema::new(
                "REF",
                vec![
                    FieldSchema::new("reference_identification_qualifier", FieldType::Identifier).required(),
                    FieldSchema::new("reference_identification", FieldType::String),
                    FieldSchema::new("description", FieldType::String),
                ],
            ),
        );

        registry.insert(
            "N3",
            SegmentSchema::new(
                "N3",
                vec![
                    FieldSchema::new("address_line_1", FieldType::String).required(),
                    FieldSchema::new("address_line_2", FieldType::String),
                ],
            ),
        );

        registry.insert(
            "N4",
            SegmentSchema::new(
                "N4",
                vec![
                    FieldSchema::new("city_name", FieldType::String),
                    FieldSchema::new("state_or_province_code", FieldType::Identifier),
                    FieldSchema::new("postal_code", FieldType::Identifier),
                    FieldSchema::new("country_code", FieldType::Identifier),
                ],
            ),
        );

        registry.insert(
            "PER",
            SegmentSchema::new(
                "PER",
                vec![
                    FieldSchema::new("contact_function_code", FieldType::Identifier).required(),
                    FieldSchema::new("name", FieldType::String),
                    FieldSchema::new("communication_number_qualifier_1", FieldType::Identifier),
                    FieldSchema::new("communication_number_1", FieldType::String),
                    FieldSchema::new("communication_number_qualifier_2", FieldType::Identifier),
                    FieldSchema::new("communication_number_2", FieldType::String),
                ],
            ),
        );

        registry.insert(
            "DTP",
            SegmentSchema::new(
                "DTP",
                vec![
                    FieldSchema::new("date_time_qualifier", FieldType::Identifier).required(),
                    FieldSchema::new("date_time_period_format_qualifier", FieldType::Identifier).required(),
                    FieldSchema::new("date_time_period", FieldType::String).required(),
                ],
            ),
        );

        registry.insert(
            "DMG",
            SegmentSchema::new(
                "DMG",
                vec![
                    FieldSchema::new("date_time_period_format_qualifier", FieldType::Identifier),
                    FieldSchema::new("date_of_birth", FieldType::Date),
                    FieldSchema::new("gender_code", FieldType::Identifier).codes(&["F", "M", "U"]),
                ],
            ),
        );

        registry.insert(
            "EQ",
            SegmentSchema::new(
                "EQ",
                vec![
                    FieldSchema::new("service_type_code", FieldType::Identifier),
                    FieldSchema::new("composite_medical_procedure_identifier", FieldType::String),
                ],
            ),
        );

        registry.insert(
            "EB",
            SegmentSchema::new(
                "EB",
                vec![
                    FieldSchema::new("eligibility_or_benefit_information", FieldType::Identifier).required(),
                    FieldSchema::new("coverage_level_code", FieldType::Identifier),
                    FieldSchema::new("service_type_code", FieldType::Identifier),
                    FieldSchema::new("insurance_type_code", FieldType::Identifier),
                    FieldSchema::new("plan_coverage_description", FieldType::String),
                    FieldSchema::new("time_period_qualifier", FieldType::Identifier),
                    FieldSchema::new("benefit_amount", FieldType::Decimal),
                    FieldSchema::new("benefit_percent", FieldType::Decimal),
                ],
            ),
        );

        registry.insert(
            "AAA",
            SegmentSchema::new(
                "AAA",
                vec![
                    FieldSchema::new("valid_request_indicator", FieldType::Identifier).codes(&["Y", "N"]).required(),
                    FieldSchema::new("agency_qualifier_code", FieldType::Identifier),
                    FieldSchema::new("reject_reason_code", FieldType::Identifier),
                    FieldSchema::new("follow_up_action_code", FieldType::Identifier),
                ],
            ),
        );

        registry.insert(
            "III",
            SegmentSchema::new(
                "III",
                vec![
                    FieldSchema::new("code_list_qualifier_code", FieldType::Identifier),
                    FieldSchema::new("industry_code", FieldType::String),
                ],
            ),
        );

        registry.insert(
            "MSG",
            SegmentSchema::new("MSG", vec![FieldSchema::new("free_form_message_text", FieldType::String)]),
        );

        registry.insert(
            "AMT",
            SegmentSchema::new(
                "AMT",
                vec![
                    FieldSchema::new("amount_qualifier_code", FieldType::Identifier).required(),
                    FieldSchema::new("monetary_amount", FieldType::Decimal).required(),
                ],
            ),
        );

        registry.insert(
            "DTM",
            SegmentSchema::new(
                "DTM",
                vec![
                    FieldSchema::new("date_time_qualifier", FieldType::Identifier).required(),
                    FieldSchema::new("date", FieldType::Date),
                    FieldSchema::new("time", FieldType::Time),
                ],
            ),
        );

        registry
    };
}

pub fn lookup(segment_id: &str) -> Option<&'static SegmentSchema> {
    SEGMENT_REGISTRY.get(segment_id)
}

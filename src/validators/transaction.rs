use std::collections::{HashMap, HashSet};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Location};
use crate::models::{LoopRecord, Segment};

/// Transaction-scope validators (§4.6 step 4) see the whole bound tree rather
/// than one segment or loop, so they live here instead of attached to a single
/// schema: the `SE` segment-count check and the HL parent/child tree check.

pub fn validate_segment_count(se_segment: Option<&Segment>, actual_count: usize, location: &Location) -> Vec<Diagnostic> {
    let Some(se) = se_segment else {
        return vec![Diagnostic::error(
            DiagnosticKind::TransactionSemantic,
            location.clone(),
            "transaction has no SE segment".to_string(),
        )];
    };

    let Some(declared) = se.field(0).and_then(|v| v.parse::<usize>().ok()) else {
        return vec![Diagnostic::error(
            DiagnosticKind::TransactionSemantic,
            location.clone(),
            "SE01 (number of included segments) is missing or not numeric".to_string(),
        )];
    };

    if declared != actual_count {
        vec![Diagnostic::error(
            DiagnosticKind::TransactionSemantic,
            location.clone(),
            format!("SE01 declares {declared} segments but {actual_count} were present from ST through SE"),
        )]
    } else {
        Vec::new()
    }
}

fn collect_hl_segments<'a>(record: &'a LoopRecord, out: &mut Vec<&'a Segment>) {
    if let Some(hl) = record.segment("hl") {
        out.push(hl);
    }
    for name in &record.child_order {
        for child in record.children_of(name) {
            collect_hl_segments(child, out);
        }
    }
}

/// Every non-root HL's parent_id must refer to a previously seen HL id within
/// the same transaction (§3's HL chain invariant, §8 scenario 6).
pub fn validate_hl_tree(root: &LoopRecord, location: &Location) -> Vec<Diagnostic> {
    let mut hl_segments = Vec::new();
    collect_hl_segments(root, &mut hl_segments);

    let mut diagnostics = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut parent_of: HashMap<String, String> = HashMap::new();

    for hl in &hl_segments {
        let id = hl.field(0).unwrap_or_default().to_string();
        let parent = hl.field(1).map(|s| s.to_string());

        if let Some(parent_id) = &parent {
            if !seen.contains(parent_id) {
                diagnostics.push(Diagnostic::error(
                    DiagnosticKind::TransactionSemantic,
                    location.clone(),
                    format!("HL {id} references unknown parent_id {parent_id}"),
                ));
            }
            parent_of.insert(id.clone(), parent_id.clone());
        }
        seen.insert(id);
    }

    diagnostics
}

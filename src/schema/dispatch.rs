use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::models::Segment;

/// One match rule from the transaction dispatch table (§4.4). Rules for a given
/// transaction are evaluated top-down; the first whose segment id and field
/// conditions match wins. `target_path` names the full loop path from the
/// transaction root to the loop this segment's match enters; `new_instance`
/// marks that the last loop in that path should get a fresh instance rather
/// than reusing whatever instance is already active there.
pub struct DispatchRule {
    pub segment_id: &'static str,
    pub conditions: &'static [(usize, &'static str)],
    pub target_path: &'static [&'static str],
    pub new_instance: bool,
    pub setup_hierarchy: bool,
}

impl DispatchRule {
    pub fn matches(&self, segment: &Segment) -> bool {
        if segment.id != self.segment_id {
            return false;
        }
        self.conditions.iter().all(|(index, expected)| segment.field(*index) == Some(*expected))
    }
}

/// The HL chain used by every registered transaction set in this crate:
/// information source → information receiver → subscriber → dependent. A
/// given transaction may stop short of the deepest level (e.g. a 270 with no
/// dependents), in which case the corresponding rule below simply never fires.
const HL_CHAIN_RULES: &[DispatchRule] = &[
    DispatchRule {
        segment_id: "HL",
        conditions: &[(2, "20")],
        target_path: &["2000A"],
        new_instance: true,
        setup_hierarchy: false,
    },
    DispatchRule {
        segment_id: "HL",
        conditions: &[(2, "21")],
        target_path: &["2000A", "2000B"],
        new_instance: true,
        setup_hierarchy: false,
    },
    DispatchRule {
        segment_id: "HL",
        conditions: &[(2, "22")],
        target_path: &["2000A", "2000B", "2000C"],
        new_instance: true,
        setup_hierarchy: true,
    },
    DispatchRule {
        segment_id: "HL",
        conditions: &[(2, "23")],
        target_path: &["2000A", "2000B", "2000C", "2000D"],
        new_instance: true,
        setup_hierarchy: true,
    },
];

lazy_static! {
    /// Keyed by bare transaction code (`"270"`, `"271"`, ...). Every registered
    /// transaction in this crate shares the HL chain; transaction-specific rules,
    /// if any, would be prepended ahead of it so they get first refusal.
    pub static ref TRANSACTION_DISPATCH: HashMap<&'static str, Vec<&'static DispatchRule>> = {
        let mut table: HashMap<&'static str, Vec<&'static DispatchRule>> = HashMap::new();
        for code in [
            "270", "271", "276", "277", "278", "820", "834", "835", "837", "212", "217", "218", "220", "221", "222",
            "223", "224",
        ] {
            table.insert(code, HL_CHAIN_RULES.iter().collect());
        }
        table
    };
}

/// Finds the first matching rule for `segment` under `transaction_code`, or
/// `None` if the segment should attach to whatever loop is currently active
/// (§4.4's "no match" fallback).
pub fn dispatch(transaction_code: &str, segment: &Segment) -> Option<&'static DispatchRule> {
    TRANSACTION_DISPATCH
        .get(transaction_code)
        .and_then(|rules| rules.iter().find(|rule| rule.matches(segment)).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hl_20_dispatches_to_information_source() {
        let segment = Segment::new("HL", vec!["1".into(), "".into(), "20".into(), "1".into()]);
        let rule = dispatch("270", &segment).expect("rule should match");
        assert_eq!(rule.target_path, &["2000A"]);
    }

    #[test]
    fn hl_22_dispatches_to_subscriber_and_sets_up_hierarchy() {
        let segment = Segment::new("HL", vec!["3".into(), "2".into(), "22".into(), "0".into()]);
        let rule = dispatch("270", &segment).expect("rule should match");
        assert_eq!(rule.target_path, &["2000A", "2000B", "2000C"]);
        assert!(rule.setup_hierarchy);
    }

    #[test]
    fn nm1_has_no_dispatch_rule_and_falls_through() {
        let segment = Segment::new("NM1", vec!["PR".into()]);
        assert!(dispatch("270", &segment).is_none());
    }
}

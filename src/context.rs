use crate::diagnostics::{Diagnostic, DiagnosticKind, Location};
use crate::models::{LoopRecord, Segment};
use crate::schema::dispatch;

/// Maintains the active loop path and in-progress transaction record while
/// tokens are folded in (§4.5). One `ParserContext` lives for exactly one
/// `ST`..`SE` span; `Parser` (src/parser.rs) creates a fresh one on `ST` and
/// consumes it on `SE`.
pub struct ParserContext {
    pub transaction_code: String,
    pub root: LoopRecord,
    active_path: Vec<String>,
    pub subscriber_path: Option<Vec<String>>,
    pub patient_path: Option<Vec<String>>,
    pub structure_warnings: Vec<Diagnostic>,
    segments_attached: usize,
}

impl ParserContext {
    pub fn new(transaction_code: impl Into<String>) -> Self {
        Self {
            transaction_code: transaction_code.into(),
            root: LoopRecord::new("root"),
            active_path: Vec::new(),
            subscriber_path: None,
            patient_path: None,
            structure_warnings: Vec::new(),
            segments_attached: 0,
        }
    }

    fn navigate_mut<'a>(root: &'a mut LoopRecord, path: &[String]) -> &'a mut LoopRecord {
        let mut current = root;
        for name in path {
            current = current.child_mut(name);
        }
        current
    }

    fn conventional_field_name(segment_id: &str) -> String {
        segment_id.to_ascii_lowercase()
    }

    /// Folds one tokenized segment into the in-progress record, per §4.5's
    /// algorithm: a dispatch match unwinds/descends the loop stack; a miss
    /// attaches the segment to whatever loop is currently active.
    pub fn handle_segment(&mut self, segment: Segment) {
        self.segments_attached += 1;

        if let Some(rule) = dispatch(&self.transaction_code, &segment) {
            let (ancestors, target) = rule.target_path.split_at(rule.target_path.len() - 1);
            let mut cursor = Self::navigate_mut(&mut self.root, &ancestors.iter().map(|s| s.to_string()).collect::<Vec<_>>());

            let target_name = target.first().copied().unwrap_or_default();
            let entered = if rule.new_instance {
                cursor.push_new_instance(target_name)
            } else {
                cursor.child_mut(target_name)
            };
            entered.attach_segment(&Self::conventional_field_name(&segment.id), segment);

            self.active_path = rule.target_path.iter().map(|s| s.to_string()).collect();

            if rule.setup_hierarchy {
                if rule.target_path.last() == Some(&"2000C") {
                    self.subscriber_path = Some(self.active_path.clone());
                } else if rule.target_path.last() == Some(&"2000D") {
                    self.patient_path = Some(self.active_path.clone());
                }
            }
            return;
        }

        let field_name = Self::conventional_field_name(&segment.id);
        let active_path = self.active_path.clone();
        let active = Self::navigate_mut(&mut self.root, &active_path);
        active.attach_segment(&field_name, segment);
    }

    pub fn record_structure_warning(&mut self, location: Location, message: impl Into<String>) {
        self.structure_warnings.push(Diagnostic::warning(DiagnosticKind::Structure, location, message.into()));
    }

    pub fn finish(self) -> (LoopRecord, Vec<Diagnostic>) {
        (self.root, self.structure_warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hl(id: &str, parent: &str, level: &str) -> Segment {
        Segment::new("HL", vec![id.to_string(), parent.to_string(), level.to_string(), "1".to_string()])
    }

    #[test]
    fn hl_chain_builds_nested_loops() {
        let mut ctx = ParserContext::new("270");
        ctx.handle_segment(hl("1", "", "20"));
        ctx.handle_segment(hl("2", "1", "21"));
        ctx.handle_segment(hl("3", "2", "22"));

        let (root, _) = ctx.finish();
        let source = &root.children_of("2000A")[0];
        let receiver = &source.children_of("2000B")[0];
        let subscriber = &receiver.children_of("2000C")[0];
        assert_eq!(subscriber.segment("hl").unwrap().field(0), Some("3"));
    }

    #[test]
    fn unmatched_segment_attaches_to_active_loop() {
        let mut ctx = ParserContext::new("270");
        ctx.handle_segment(hl("1", "", "20"));
        ctx.handle_segment(Segment::new("NM1", vec!["2B".into(), "2".into()]));

        let (root, _) = ctx.finish();
        let source = &root.children_of("2000A")[0];
        assert!(source.segment("nm1").is_some());
    }

    #[test]
    fn header_segments_before_any_hl_attach_to_root() {
        let mut ctx = ParserContext::new("270");
        ctx.handle_segment(Segment::new("BHT", vec!["0022".into(), "13".into()]));
        let (root, _) = ctx.finish();
        assert!(root.segment("bht").is_some());
    }

    #[test]
    fn repeated_subscriber_hl_creates_separate_instances() {
        let mut ctx = ParserContext::new("270");
        ctx.handle_segment(hl("1", "", "20"));
        ctx.handle_segment(hl("2", "1", "21"));
        ctx.handle_segment(hl("3", "2", "22"));
        ctx.handle_segment(hl("4", "2", "22"));

        let (root, _) = ctx.finish();
        let source = &root.children_of("2000A")[0];
        let receiver = &source.children_of("2000B")[0];
        assert_eq!(receiver.children_of("2000C").len(), 2);
    }
}

//! Non-fatal validation findings accumulated while binding a transaction.
//!
//! Fatal structural failures abort the parse and surface as [`crate::error::EdiError`];
//! everything a validator finds is a `Diagnostic` attached to the returned model instead,
//! so a caller can inspect, log, or reject a model without losing the rest of the parse.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum DiagnosticKind {
    Shape,
    SegmentSemantic,
    LoopSemantic,
    TransactionSemantic,
    Structure,
    ValidatorFault,
}

/// Where in the message a diagnostic's triggering condition was observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Location {
    pub functional_group: Option<usize>,
    pub transaction: Option<usize>,
    pub segment: Option<usize>,
    pub loop_path: Option<String>,
    pub field_index: Option<usize>,
}

impl Location {
    pub fn transaction(transaction: usize) -> Self {
        Self { transaction: Some(transaction), ..Default::default() }
    }

    pub fn segment(transaction: usize, segment: usize) -> Self {
        Self { transaction: Some(transaction), segment: Some(segment), ..Default::default() }
    }

    pub fn in_loop(mut self, loop_path: impl Into<String>) -> Self {
        self.loop_path = Some(loop_path.into());
        self
    }

    pub fn at_field(mut self, field_index: usize) -> Self {
        self.field_index = Some(field_index);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self { severity, kind, location, message: message.into() }
    }

    pub fn error(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, location, message)
    }

    pub fn warning(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, location, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Promotes `StructureWarning`-kind diagnostics to errors when `strict_mode` is on,
/// matching `ParserConfig::strict_mode` from [`crate::config`].
pub fn apply_strict_mode(diagnostics: &mut [Diagnostic], strict_mode: bool) {
    if !strict_mode {
        return;
    }
    for diagnostic in diagnostics.iter_mut() {
        if diagnostic.kind == DiagnosticKind::Structure {
            diagnostic.severity = Severity::Error;
        }
    }
}

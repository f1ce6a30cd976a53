use crate::diagnostics::Diagnostic;
use crate::models::loop_record::LoopRecord;
use crate::models::Segment;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// The registered healthcare X12 transaction sets. `Unknown` carries whatever
/// three-digit code was seen so the tokenizer can still be used over traffic
/// this crate has no schema for (see `segments()` in the external-interface
/// surface, which does not require a registered transaction type at all).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum TransactionType {
    EligibilityInquiry270,
    EligibilityResponse271,
    ClaimStatus276,
    ClaimStatusResponse277,
    ServicesReview278,
    PremiumPayment820,
    EnrollmentMaintenance834,
    ClaimPayment835,
    ProfessionalClaim837P,
    InstitutionalClaim837I,
    DentalClaim837D,
    Unknown(String),
}

impl TransactionType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "270" => Self::EligibilityInquiry270,
            "271" => Self::EligibilityResponse271,
            "276" => Self::ClaimStatus276,
            "277" => Self::ClaimStatusResponse277,
            "278" => Self::ServicesReview278,
            "820" => Self::PremiumPayment820,
            "834" => Self::EnrollmentMaintenance834,
            "835" => Self::ClaimPayment835,
            "837" => Self::ProfessionalClaim837P,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            Self::EligibilityInquiry270 => "270",
            Self::EligibilityResponse271 => "271",
            Self::ClaimStatus276 => "276",
            Self::ClaimStatusResponse277 => "277",
            Self::ServicesReview278 => "278",
            Self::PremiumPayment820 => "820",
            Self::EnrollmentMaintenance834 => "834",
            Self::ClaimPayment835 => "835",
            Self::ProfessionalClaim837P | Self::InstitutionalClaim837I | Self::DentalClaim837D => "837",
            Self::Unknown(s) => s,
        }
    }
}

/// One `ST`..`SE` span, bound into its loop tree. `diagnostics` accumulates every
/// finding from binding and validation (§4.6); the model is usable regardless of
/// whether any diagnostic carries `Severity::Error` — callers decide via `is_valid`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct TransactionRecord {
    pub st_segment: Segment,
    pub se_segment: Option<Segment>,
    pub transaction_type: TransactionType,
    pub implementation_convention: String,
    pub root: LoopRecord,
    pub diagnostics: Vec<Diagnostic>,
}

impl TransactionRecord {
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn control_number(&self) -> Option<&str> {
        self.st_segment.field(1)
    }
}

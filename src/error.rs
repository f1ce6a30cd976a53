use thiserror::Error;

/// Fatal parse-time failures. Non-fatal findings are [`crate::diagnostics::Diagnostic`]s
/// attached to a returned model, not variants here — see the taxonomy split in the crate docs.
#[derive(Error, Debug, PartialEq)]
pub enum EdiError {
    #[error("could not determine delimiters from ISA segment: {0}")]
    DelimiterError(String),

    #[error("tokenizer error at byte offset {offset}: {message}")]
    TokenError { offset: usize, message: String },

    #[error("invalid control structure: {0}")]
    InvalidControlStructure(String),

    #[error("unsupported transaction set: {0}")]
    UnsupportedTransactionType(String),

    #[error("invalid parser configuration: {0}")]
    ConfigurationError(String),

    #[error("segment count guard exceeded: more than {0} segments")]
    SegmentLimitExceeded(usize),
}

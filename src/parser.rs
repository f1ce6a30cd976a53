use crate::binder::{self, BindInput};
use crate::config::ParserConfig;
use crate::context::ParserContext;
use crate::error::EdiError;
use crate::models::{FunctionalGroup, InterchangeControl, Segment, TransactionRecord, X12Version};
use crate::tokenizer::tokenize;

/// The crate's single entry point: tokenize-only via [`Parser::segments`], or the
/// full tokenize → dispatch → bind → validate pipeline via [`Parser::parse`]/[`Parser::models`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Tokenizer only (§4.2), no dispatch, no validation — matches the
    /// `segments()` entry point named in the external-interface surface.
    pub fn segments(&self, input: &str) -> Result<Vec<Segment>, EdiError> {
        let (_, segments) = tokenize(input)?;
        Ok(segments)
    }

    /// The full pipeline for one interchange.
    pub fn parse(&self, input: &str) -> Result<InterchangeControl, EdiError> {
        let span = tracing::info_span!("parse_interchange");
        let _enter = span.enter();

        let (delimiters, segments) = tokenize(input)?;
        if segments.len() > self.config.max_segments {
            return Err(EdiError::SegmentLimitExceeded(self.config.max_segments));
        }

        let isa_segment = segments[0].clone();
        let version = X12Version::from_isa(&isa_segment)?;

        let (functional_groups, iea_segment) = self.parse_body(segments.into_iter().skip(1))?;

        if self.config.require_iea && iea_segment.is_none() {
            return Err(EdiError::InvalidControlStructure(
                "interchange ended without an IEA segment".to_string(),
            ));
        }

        Ok(InterchangeControl { isa_segment, iea_segment, delimiters, version, functional_groups })
    }

    /// Every transaction across every functional group in the interchange, in
    /// source order — the `models()` entry point named in the external-interface
    /// surface.
    pub fn models(&self, input: &str) -> Result<Vec<TransactionRecord>, EdiError> {
        let interchange = self.parse(input)?;
        Ok(interchange.functional_groups.into_iter().flat_map(|fg| fg.transactions).collect())
    }

    fn parse_body(
        &self,
        segments: impl Iterator<Item = Segment>,
    ) -> Result<(Vec<FunctionalGroup>, Option<Segment>), EdiError> {
        let mut functional_groups = Vec::new();
        let mut current_gs: Option<Segment> = None;
        let mut current_transactions: Vec<TransactionRecord> = Vec::new();

        let mut current_ctx: Option<ParserContext> = None;
        let mut current_st: Option<Segment> = None;
        let mut segments_in_span = 0usize;
        let mut iea_segment = None;

        for segment in segments {
            match segment.id.as_str() {
                "GS" => {
                    if let Some(gs) = current_gs.take() {
                        functional_groups.push(FunctionalGroup {
                            gs_segment: gs,
                            ge_segment: None,
                            transactions: std::mem::take(&mut current_transactions),
                        });
                    }
                    current_gs = Some(segment);
                }
                "GE" => {
                    if let Some(gs) = current_gs.take() {
                        functional_groups.push(FunctionalGroup {
                            gs_segment: gs,
                            ge_segment: Some(segment),
                            transactions: std::mem::take(&mut current_transactions),
                        });
                    } else {
                        tracing::warn!("GE segment with no preceding GS, dropped");
                    }
                }
                "ST" => {
                    if current_ctx.is_some() {
                        return Err(EdiError::InvalidControlStructure(
                            "nested ST segment without an intervening SE".to_string(),
                        ));
                    }
                    let code = segment.field(0).unwrap_or_default().to_string();
                    tracing::debug!(transaction_code = %code, "entering transaction");
                    current_ctx = Some(ParserContext::new(code));
                    current_st = Some(segment);
                    segments_in_span = 1;
                }
                "SE" => {
                    segments_in_span += 1;
                    match (current_ctx.take(), current_st.take()) {
                        (Some(ctx), Some(st)) => {
                            let transaction_code = st.field(0).unwrap_or_default().to_string();
                            let (root, warnings) = ctx.finish();
                            let record = binder::bind(BindInput {
                                transaction_code,
                                st_segment: st,
                                se_segment: Some(segment),
                                root,
                                structure_warnings: warnings,
                                segments_in_span,
                                strict_mode: self.config.strict_mode,
                            });
                            current_transactions.push(record);
                        }
                        _ => {
                            return Err(EdiError::InvalidControlStructure(
                                "SE segment with no preceding ST".to_string(),
                            ));
                        }
                    }
                }
                "IEA" => {
                    iea_segment = Some(segment);
                }
                _ => {
                    segments_in_span += 1;
                    match current_ctx.as_mut() {
                        Some(ctx) => ctx.handle_segment(segment),
                        None => tracing::warn!(segment_id = %segment.id, "segment outside any transaction, dropped"),
                    }
                }
            }
        }

        if let Some(gs) = current_gs.take() {
            functional_groups.push(FunctionalGroup {
                gs_segment: gs,
                ge_segment: None,
                transactions: std::mem::take(&mut current_transactions),
            });
        }

        Ok((functional_groups, iea_segment))
    }
}

use crate::error::EdiError;

/// Runtime knobs for a parse, independent of the delimiters discovered from the
/// interchange itself. Built with [`ParserConfigBuilder`], validated at `build()`
/// the same way the delimiter set is validated for distinctness.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub strict_mode: bool,
    pub max_segments: usize,
    pub require_iea: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            max_segments: 100_000,
            require_iea: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct ParserConfigBuilder {
    strict_mode: bool,
    max_segments: Option<usize>,
    require_iea: bool,
}

impl ParserConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote `StructureWarning` diagnostics to errors.
    pub fn strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    pub fn max_segments(mut self, max: usize) -> Self {
        self.max_segments = Some(max);
        self
    }

    /// Fail the parse if no `IEA` segment is ever observed, rather than returning
    /// a partial interchange.
    pub fn require_iea(mut self, require: bool) -> Self {
        self.require_iea = require;
        self
    }

    pub fn build(self) -> Result<ParserConfig, EdiError> {
        let max_segments = self.max_segments.unwrap_or(100_000);
        if max_segments == 0 {
            return Err(EdiError::ConfigurationError(
                "max_segments must be greater than zero".to_string(),
            ));
        }
        Ok(ParserConfig {
            strict_mode: self.strict_mode,
            max_segments,
            require_iea: self.require_iea,
        })
    }
}

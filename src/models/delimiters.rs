use crate::error::EdiError;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// The four delimiters discovered from an interchange's ISA segment. Shared by
/// value across every segment and transaction parsed from the same interchange,
/// and reused verbatim on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Delimiters {
    pub element: char,
    pub repetition: char,
    pub component: char,
    pub terminator: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            element: '*',
            repetition: '^',
            component: ':',
            terminator: '~',
        }
    }
}

impl Delimiters {
    /// ISA is a fixed 106-byte segment. Element separator sits at byte offset 3;
    /// component separator is the single byte at offset 104 (ISA16); repetition
    /// separator is ISA11 (offset 82) under 005010; the terminator is the byte
    /// immediately after the fixed-width body, offset 105.
    pub fn from_isa_bytes(isa: &[u8]) -> Result<Self, EdiError> {
        if isa.len() < 106 {
            return Err(EdiError::DelimiterError(format!(
                "ISA segment must be at least 106 bytes, got {}",
                isa.len()
            )));
        }

        let element = isa[3] as char;
        let repetition = isa[82] as char;
        let component = isa[104] as char;
        let terminator = isa[105] as char;

        let delimiters = Self { element, repetition, component, terminator };
        delimiters.validate()?;
        Ok(delimiters)
    }

    pub fn validate(&self) -> Result<(), EdiError> {
        let chars = [self.element, self.repetition, self.component, self.terminator];

        for c in chars {
            if c.is_alphanumeric() || c.is_whitespace() {
                return Err(EdiError::DelimiterError(format!(
                    "delimiter '{c}' must not be alphanumeric or whitespace"
                )));
            }
        }

        for i in 0..chars.len() {
            for j in (i + 1)..chars.len() {
                if chars[i] == chars[j] {
                    return Err(EdiError::DelimiterError(
                        "element, repetition, component, and segment delimiters must all be distinct"
                            .to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_isa(terminator: char) -> Vec<u8> {
        let mut isa = String::from("ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *230101*1253*^*00501*000000907*1*T*:");
        isa.push(terminator);
        isa.into_bytes()
    }

    #[test]
    fn detects_standard_delimiters() {
        let isa = sample_isa('~');
        let delimiters = Delimiters::from_isa_bytes(&isa).unwrap();
        assert_eq!(delimiters.element, '*');
        assert_eq!(delimiters.repetition, '^');
        assert_eq!(delimiters.component, ':');
        assert_eq!(delimiters.terminator, '~');
    }

    #[test]
    fn rejects_duplicate_delimiters() {
        let mut isa = sample_isa('~');
        // force repetition separator to collide with element separator
        isa[82] = b'*';
        assert!(Delimiters::from_isa_bytes(&isa).is_err());
    }

    #[test]
    fn rejects_short_input() {
        assert!(Delimiters::from_isa_bytes(b"ISA*00").is_err());
    }
}

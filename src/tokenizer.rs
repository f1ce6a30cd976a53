use lazy_static::lazy_static;
use regex::Regex;

use crate::error::EdiError;
use crate::models::{Delimiters, Segment};

lazy_static! {
    static ref SEGMENT_ID_PATTERN: Regex = Regex::new(r"^[A-Z][A-Z0-9]{1,2}$").unwrap();
}

/// Splits raw interchange bytes into delimiters plus a flat token stream,
/// per §4.1/§4.2. Does not interpret the tokens — that is [`crate::context::ParserContext`]'s
/// job once [`crate::parser::Parser`] has reassembled the envelope/group/transaction nesting.
pub fn tokenize(input: &str) -> Result<(Delimiters, Vec<Segment>), EdiError> {
    let bytes = input.as_bytes();
    if bytes.len() < 106 {
        return Err(EdiError::DelimiterError(format!(
            "input too short to contain a fixed-width ISA segment: {} bytes",
            bytes.len()
        )));
    }

    let delimiters = Delimiters::from_isa_bytes(&bytes[..106])?;

    let isa_body = std::str::from_utf8(&bytes[..105])
        .map_err(|_| EdiError::DelimiterError("ISA segment is not valid UTF-8".to_string()))?;
    let isa_fields: Vec<String> = isa_body.split(delimiters.element).map(|s| s.to_string()).collect();
    if isa_fields.len() < 17 {
        return Err(EdiError::DelimiterError(format!(
            "ISA segment must carry 16 elements, found {}",
            isa_fields.len().saturating_sub(1)
        )));
    }
    let isa_segment = Segment::new("ISA", isa_fields[1..].to_vec());

    let rest = std::str::from_utf8(&bytes[106..])
        .map_err(|_| EdiError::TokenError { offset: 106, message: "input is not valid UTF-8".to_string() })?;

    let mut segments = vec![isa_segment];
    let mut offset = 106usize;

    for raw_segment in rest.split(delimiters.terminator) {
        let trimmed = raw_segment.trim_matches(|c: char| c == '\r' || c == '\n');
        offset += raw_segment.len() + 1;
        if trimmed.trim().is_empty() {
            continue;
        }

        let fields: Vec<String> = trimmed.split(delimiters.element).map(|s| s.to_string()).collect();
        let id = &fields[0];
        if !SEGMENT_ID_PATTERN.is_match(id) {
            return Err(EdiError::TokenError {
                offset,
                message: format!("invalid segment identifier '{id}'"),
            });
        }

        segments.push(Segment::new(id.clone(), fields[1..].to_vec()));
    }

    Ok((delimiters, segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> String {
        let isa = "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *230101*1253*^*00501*000000907*1*T*:~";
        format!("{isa}GS*HS*SENDER*RECEIVER*20230101*1253*1*X*005010X279A1~ST*270*0001*005010X279A1~SE*3*0001~GE*1*1~IEA*1*000000907~")
    }

    #[test]
    fn tokenizes_full_interchange() {
        let (delimiters, segments) = tokenize(&sample()).unwrap();
        assert_eq!(delimiters.terminator, '~');
        assert_eq!(segments[0].id, "ISA");
        assert_eq!(segments[1].id, "GS");
        assert_eq!(segments.last().unwrap().id, "IEA");
    }

    #[test]
    fn rejects_bad_segment_identifier() {
        let mut input = sample();
        input = input.replace("GS*HS", "9gs*HS");
        assert!(tokenize(&input).is_err());
    }

    #[test]
    fn rejects_short_input() {
        assert!(tokenize("too short").is_err());
    }
}

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_REGEX: Regex = Regex::new(r"^\d{8}$").unwrap();
    static ref SHORT_DATE_REGEX: Regex = Regex::new(r"^\d{6}$").unwrap();
    static ref TIME_REGEX: Regex = Regex::new(r"^\d{4}(\d{2})?(\d{2})?$").unwrap();
    static ref NUMERIC_REGEX: Regex = Regex::new(r"^-?\d+$").unwrap();
    static ref DECIMAL_REGEX: Regex = Regex::new(r"^-?\d+(\.\d+)?$").unwrap();
    static ref IDENTIFIER_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]+$").unwrap();
}

/// Semantic type of a field value, per §3's field taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Decimal,
    Identifier,
    String,
    Date,
    ShortDate,
    Time,
    Binary,
}

impl FieldType {
    /// `None` means "no regex-level check" (free string, binary).
    fn pattern(self) -> Option<&'static Regex> {
        match self {
            FieldType::Integer => Some(&NUMERIC_REGEX),
            FieldType::Decimal => Some(&DECIMAL_REGEX),
            FieldType::Identifier => Some(&IDENTIFIER_REGEX),
            FieldType::Date => Some(&DATE_REGEX),
            FieldType::ShortDate => Some(&SHORT_DATE_REGEX),
            FieldType::Time => Some(&TIME_REGEX),
            FieldType::String | FieldType::Binary => None,
        }
    }

    pub fn matches(self, value: &str) -> bool {
        match self.pattern() {
            Some(re) => re.is_match(value),
            None => true,
        }
    }
}

/// The schema for one field position within a segment. A loop-local override
/// layers a narrower `FieldSchema` on top of a base one (see §4.3's precedence
/// rule) rather than replacing it outright — building that merge is
/// `SegmentSchema::resolve_field`'s job, not this type's.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub required: bool,
    pub code_table: Option<&'static [&'static str]>,
}

impl FieldSchema {
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            min_length: None,
            max_length: None,
            required: false,
            code_table: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub const fn codes(mut self, codes: &'static [&'static str]) -> Self {
        self.code_table = Some(codes);
        self
    }

    /// Returns shape-violation messages for a single field value; empty iff the
    /// value satisfies this schema. An absent (empty-string) optional field is
    /// always valid; an absent required field is reported by the caller, which
    /// has the segment-level context this function lacks.
    pub fn check(&self, value: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if value.is_empty() {
            return errors;
        }

        if let Some(min) = self.min_length {
            if value.len() < min {
                errors.push(format!(
                    "field '{}' too short: {} chars, minimum {}",
                    self.name,
                    value.len(),
                    min
                ));
            }
        }
        if let Some(max) = self.max_length {
            if value.len() > max {
                errors.push(format!(
                    "field '{}' too long: {} chars, maximum {}",
                    self.name,
                    value.len(),
                    max
                ));
            }
        }
        if !self.field_type.matches(value) {
            errors.push(format!(
                "field '{}' does not match expected {:?} format: '{}'",
                self.name, self.field_type, value
            ));
        }
        if let Some(codes) = self.code_table {
            if !codes.contains(&value) {
                errors.push(format!(
                    "field '{}' has invalid code '{}', expected one of {:?}",
                    self.name, value, codes
                ));
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_field_accepts_ccyymmdd() {
        let schema = FieldSchema::new("date", FieldType::Date);
        assert!(schema.check("20260731").is_empty());
        assert!(!schema.check("2026-07-31").is_empty());
    }

    #[test]
    fn code_table_rejects_unknown_value() {
        let schema = FieldSchema::new("entity_id", FieldType::Identifier).codes(&["20", "21", "22", "23"]);
        assert!(schema.check("20").is_empty());
        assert!(!schema.check("99").is_empty());
    }

    #[test]
    fn empty_value_never_flagged_by_check() {
        let schema = FieldSchema::new("optional", FieldType::Date).required();
        assert!(schema.check("").is_empty());
    }
}

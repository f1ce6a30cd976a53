use crate::models::{Delimiters, FunctionalGroup, InterchangeControl, LoopRecord, Segment};

/// Fixed column widths for ISA01..ISA16, in wire order. ISA is the one segment
/// whose layout the envelope standard fixes regardless of content — every other
/// segment renders with the trailing-empty-stripped variable-width rule below.
const ISA_FIELD_WIDTHS: [usize; 16] = [2, 10, 2, 10, 2, 15, 2, 15, 6, 4, 1, 5, 9, 1, 1, 1];

/// Serializes a validated [`InterchangeControl`] back to X12 text (§4.7).
/// `pretty` separates segments with the terminator plus a newline instead of
/// the terminator alone — for human-readable output only, never for wire
/// transport.
pub fn render(interchange: &InterchangeControl, pretty: bool) -> String {
    let delimiters = interchange.delimiters;
    let mut out = String::new();

    out.push_str(&render_isa(&interchange.isa_segment, delimiters));
    push_terminator(&mut out, delimiters, pretty);

    for fg in &interchange.functional_groups {
        render_functional_group(fg, delimiters, pretty, &mut out);
    }

    if let Some(iea) = &interchange.iea_segment {
        out.push_str(&render_segment(iea, delimiters));
        push_terminator(&mut out, delimiters, pretty);
    }

    out
}

fn render_functional_group(fg: &FunctionalGroup, delimiters: Delimiters, pretty: bool, out: &mut String) {
    out.push_str(&render_segment(&fg.gs_segment, delimiters));
    push_terminator(out, delimiters, pretty);

    for transaction in &fg.transactions {
        out.push_str(&render_segment(&transaction.st_segment, delimiters));
        push_terminator(out, delimiters, pretty);

        render_loop_body(&transaction.root, delimiters, pretty, out);

        if let Some(se) = &transaction.se_segment {
            out.push_str(&render_segment(se, delimiters));
            push_terminator(out, delimiters, pretty);
        }
    }

    if let Some(ge) = &fg.ge_segment {
        out.push_str(&render_segment(ge, delimiters));
        push_terminator(out, delimiters, pretty);
    }
}

fn render_loop_body(record: &LoopRecord, delimiters: Delimiters, pretty: bool, out: &mut String) {
    for field_name in &record.segment_order {
        for segment in record.segments_of(field_name) {
            out.push_str(&render_segment(segment, delimiters));
            push_terminator(out, delimiters, pretty);
        }
    }
    for child_name in &record.child_order {
        for child in record.children_of(child_name) {
            render_loop_body(child, delimiters, pretty, out);
        }
    }
}

fn push_terminator(out: &mut String, delimiters: Delimiters, pretty: bool) {
    out.push(delimiters.terminator);
    if pretty {
        out.push('\n');
    }
}

/// Trailing empty fields are stripped, matching X12 convention; fields that are
/// absent mid-segment render as empty positions so downstream positional
/// indexing still lines up.
fn render_segment(segment: &Segment, delimiters: Delimiters) -> String {
    let mut fields: Vec<&str> = segment.elements.iter().map(|s| s.as_str()).collect();
    while fields.last().map(|s| s.is_empty()).unwrap_or(false) {
        fields.pop();
    }

    let mut out = segment.id.clone();
    for field in fields {
        out.push(delimiters.element);
        out.push_str(field);
    }
    out
}

fn render_isa(isa: &Segment, delimiters: Delimiters) -> String {
    let mut out = String::from("ISA");
    for (index, width) in ISA_FIELD_WIDTHS.iter().enumerate() {
        let value = isa.elements.get(index).map(|s| s.as_str()).unwrap_or("");
        out.push(delimiters.element);
        if value.len() >= *width {
            out.push_str(&value[..*width]);
        } else {
            out.push_str(value);
            out.push_str(&" ".repeat(width - value.len()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn sample() -> String {
        let isa = "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *230101*1253*^*00501*000000907*1*T*:~";
        format!(
            "{isa}GS*HS*SENDER*RECEIVER*20230101*1253*1*X*005010X279A1~\
ST*270*0001*005010X279A1~\
BHT*0022*13*10001234*20230101*1319~\
HL*1**20*1~\
NM1*PR*2*ABC INSURANCE*****PI*12345~\
SE*4*0001~\
GE*1*1~\
IEA*1*000000907~"
        )
    }

    #[test]
    fn round_trips_a_simple_interchange() {
        let parser = Parser::new();
        let interchange = parser.parse(&sample()).unwrap();
        let rendered = render(&interchange, false);

        let reparsed = parser.parse(&rendered).unwrap();
        assert_eq!(reparsed.isa_segment.elements[5].trim(), "SENDER");
        assert_eq!(reparsed.functional_groups[0].transactions.len(), 1);
        assert_eq!(
            reparsed.functional_groups[0].transactions[0].root.children_of("2000A")[0].segment("nm1"),
            interchange.functional_groups[0].transactions[0].root.children_of("2000A")[0].segment("nm1"),
        );
    }

    #[test]
    fn trailing_empty_fields_are_stripped() {
        let segment = Segment::new("REF", vec!["6P".to_string(), "".to_string(), "".to_string()]);
        let rendered = render_segment(&segment, Delimiters::default());
        assert_eq!(rendered, "REF*6P");
    }

    #[test]
    fn isa_renders_fixed_width() {
        let isa = Segment::new(
            "ISA",
            vec![
                "00".into(), "".into(), "00".into(), "".into(), "ZZ".into(), "SENDER".into(), "ZZ".into(),
                "RECEIVER".into(), "230101".into(), "1253".into(), "^".into(), "00501".into(), "907".into(),
                "1".into(), "T".into(), ":".into(),
            ],
        );
        let rendered = render_isa(&isa, Delimiters::default());
        let parts: Vec<&str> = rendered.split('*').collect();
        assert_eq!(parts[5], "ZZ");
        assert_eq!(parts[6].trim(), "SENDER");
        assert_eq!(parts[13].len(), 9);
    }
}

//! Fixed-width decoding implementation.

use crate::error::TransformResult;
use crate::rows::RowFilter;
use crate::schema::{ColumnLayout, Schema};
use crate::types::{Record, Value};

use super::{format_value, run_decode, DecodeOutput, FormatErrorPolicy};

/// Decode the lines accepted by `rows` under a fixed-width layout.
///
/// A cursor starts at 0 for each line and schema slots are walked in
/// declaration order:
///
/// - ignored slot with a declared width: the cursor advances, nothing is
///   emitted
/// - output slot with a declared width: the characters `[cursor, cursor+width)`
///   are extracted (clamped at end of line, never an error), trimmed, run
///   through the formatter if one is set, and stored; the cursor advances
/// - slot with no declared width: yields `Null` without advancing
///
/// Widths count characters, not bytes. Output records carry the non-ignored
/// fields in schema order, one record per accepted line, in original order.
pub fn decode_fixed_width(
    rows: &RowFilter,
    schema: &Schema,
    policy: FormatErrorPolicy,
) -> TransformResult<DecodeOutput> {
    run_decode(rows, policy, |line_no, line| {
        decode_line(line, schema, line_no)
    })
}

fn decode_line(line: &str, schema: &Schema, line_no: usize) -> TransformResult<Record> {
    let chars: Vec<char> = line.chars().collect();
    let mut cursor = 0usize;
    let mut record = Record::new();

    for spec in schema.specs() {
        match spec.layout {
            ColumnLayout::FixedWidth { width } => {
                if !spec.ignored {
                    let raw = slice_chars(&chars, cursor, width);
                    let value = format_value(raw.trim(), spec, line_no)?;
                    record.insert(spec.name.clone(), value);
                }
                cursor += width;
            }
            // No declared width: nothing to extract, cursor stays put.
            ColumnLayout::Delimited => {
                if !spec.ignored {
                    record.insert(spec.name.clone(), Value::Null);
                }
            }
        }
    }

    Ok(record)
}

/// Character-count substring with end-of-line clamping: extraction past the
/// end of the line yields the available remainder (possibly empty).
fn slice_chars(chars: &[char], start: usize, width: usize) -> String {
    let start = start.min(chars.len());
    let end = start.saturating_add(width).min(chars.len());
    chars[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::decode_fixed_width;
    use crate::decode::FormatErrorPolicy;
    use crate::format::{as_formatter, number};
    use crate::rows::RowFilter;
    use crate::schema::{ColumnLayout, Schema};
    use crate::types::Value;

    fn ledger_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .add_field("classifier", ColumnLayout::FixedWidth { width: 8 })
            .add_field("description", ColumnLayout::FixedWidth { width: 18 })
            .add_formatted_field(
                "openingBalance",
                ColumnLayout::FixedWidth { width: 6 },
                as_formatter(number),
            )
            .add_formatted_field("debit", ColumnLayout::FixedWidth { width: 6 }, as_formatter(number))
            .add_formatted_field("credit", ColumnLayout::FixedWidth { width: 6 }, as_formatter(number))
            .add_formatted_field(
                "finalBalance",
                ColumnLayout::FixedWidth { width: 6 },
                as_formatter(number),
            );
        schema
    }

    #[test]
    fn offsets_follow_declared_widths() {
        let rows = RowFilter::from_text("100000  ATIVO             001000000300000500001200\n", "\n");
        let out = decode_fixed_width(&rows, &ledger_schema(), FormatErrorPolicy::Fail).unwrap();

        assert_eq!(out.records.row_count(), 1);
        let record = &out.records.records[0];
        assert_eq!(record.get("classifier"), Some(&Value::Text("100000".into())));
        assert_eq!(record.get("description"), Some(&Value::Text("ATIVO".into())));
        assert_eq!(record.get("openingBalance"), Some(&Value::Number(1000.0)));
        assert_eq!(record.get("debit"), Some(&Value::Number(300.0)));
        assert_eq!(record.get("credit"), Some(&Value::Number(500.0)));
        assert_eq!(record.get("finalBalance"), Some(&Value::Number(1200.0)));
    }

    #[test]
    fn extraction_past_end_of_line_clamps() {
        let mut schema = Schema::new();
        schema
            .add_field("code", ColumnLayout::FixedWidth { width: 4 })
            .add_field("rest", ColumnLayout::FixedWidth { width: 40 });

        let rows = RowFilter::from_text("1000 short\n", "\n");
        let out = decode_fixed_width(&rows, &schema, FormatErrorPolicy::Fail).unwrap();
        let record = &out.records.records[0];
        assert_eq!(record.get("rest"), Some(&Value::Text("short".into())));
    }

    #[test]
    fn ignored_slot_consumes_width_without_output() {
        let mut schema = Schema::new();
        schema
            .add_ignored_field("access", ColumnLayout::FixedWidth { width: 3 })
            .add_field("code", ColumnLayout::FixedWidth { width: 4 });

        let rows = RowFilter::from_text("xyz1000\n", "\n");
        let out = decode_fixed_width(&rows, &schema, FormatErrorPolicy::Fail).unwrap();
        let record = &out.records.records[0];
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("code"), Some(&Value::Text("1000".into())));
    }

    #[test]
    fn widthless_slot_yields_null_without_advancing() {
        let mut schema = Schema::new();
        schema
            .add_field("code", ColumnLayout::FixedWidth { width: 4 })
            .add_field("note", ColumnLayout::Delimited)
            .add_field("rest", ColumnLayout::FixedWidth { width: 3 });

        let rows = RowFilter::from_text("1000abc\n", "\n");
        let out = decode_fixed_width(&rows, &schema, FormatErrorPolicy::Fail).unwrap();
        let record = &out.records.records[0];
        assert_eq!(record.get("note"), Some(&Value::Null));
        assert_eq!(record.get("rest"), Some(&Value::Text("abc".into())));
    }

    #[test]
    fn widths_count_characters_not_bytes() {
        let mut schema = Schema::new();
        schema
            .add_field("name", ColumnLayout::FixedWidth { width: 6 })
            .add_field("amount", ColumnLayout::FixedWidth { width: 4 });

        // "Crédito" would overflow byte-based slicing mid-codepoint.
        let rows = RowFilter::from_text("Créd  1200\n", "\n");
        let out = decode_fixed_width(&rows, &schema, FormatErrorPolicy::Fail).unwrap();
        let record = &out.records.records[0];
        assert_eq!(record.get("name"), Some(&Value::Text("Créd".into())));
        assert_eq!(record.get("amount"), Some(&Value::Text("1200".into())));
    }
}

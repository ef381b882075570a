//! Delimited decoding implementation.

use crate::error::TransformResult;
use crate::rows::RowFilter;
use crate::schema::Schema;
use crate::types::{Record, Value};

use super::{format_value, run_decode, DecodeOutput, FormatErrorPolicy};

/// Decode the lines accepted by `rows` under a delimiter-split layout.
///
/// Each line is split on `delimiter` and tokens that are empty after trimming
/// are dropped. Schema slots are then paired positionally with the surviving
/// tokens: slot `i` (counted across *all* declared slots, ignored ones
/// included) consumes token `i`. Ignored slots consume their position without
/// emitting output; an output slot with no token at its position stores
/// `Null`.
///
/// Because ignored slots still occupy a position, the declaration order of
/// ignored and output columns determines token alignment.
pub fn decode_delimited(
    rows: &RowFilter,
    schema: &Schema,
    delimiter: &str,
    policy: FormatErrorPolicy,
) -> TransformResult<DecodeOutput> {
    run_decode(rows, policy, |line_no, line| {
        decode_line(line, schema, delimiter, line_no)
    })
}

fn decode_line(
    line: &str,
    schema: &Schema,
    delimiter: &str,
    line_no: usize,
) -> TransformResult<Record> {
    let tokens: Vec<&str> = line
        .split(delimiter)
        .filter(|t| !t.trim().is_empty())
        .collect();

    let mut record = Record::new();
    for (position, spec) in schema.specs().iter().enumerate() {
        if spec.ignored {
            continue;
        }
        let value = match tokens.get(position) {
            Some(token) => format_value(token.trim(), spec, line_no)?,
            None => Value::Null,
        };
        record.insert(spec.name.clone(), value);
    }

    Ok(record)
}

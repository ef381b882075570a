//! Output boundary: bulk storage of decoded records.
//!
//! A [`RecordSink`] accepts a sequence of flat key-value records and reports
//! per-batch failure. Two implementations are provided: newline-delimited
//! JSON (one object per record) and CSV (header from field order, nulls as
//! empty cells). Both write to any [`std::io::Write`].

use std::io::Write;

use crate::error::TransformResult;
use crate::types::{RecordSet, Value};

/// Accepts a batch of flat key-value records for bulk storage.
pub trait RecordSink {
    /// Store the whole batch, reporting failure for the batch as a unit.
    fn write_all(&mut self, records: &RecordSet) -> TransformResult<()>;
}

/// Writes each record as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_all(&mut self, records: &RecordSet) -> TransformResult<()> {
        for record in records {
            serde_json::to_writer(&mut self.writer, record)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes records as CSV with a header row taken from field order.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// Create a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> TransformResult<W> {
        Ok(self.writer.into_inner().map_err(|e| e.into_error())?)
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_all(&mut self, records: &RecordSet) -> TransformResult<()> {
        let Some(first) = records.iter().next() else {
            return Ok(());
        };
        self.writer.write_record(first.field_names())?;
        for record in records {
            self.writer
                .write_record(record.iter().map(|(_, v)| cell_text(v)))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Number(n) => {
            if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }
        }
        Value::Text(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvSink, JsonLinesSink, RecordSink};
    use crate::types::{Record, RecordSet, Value};

    fn sample_set() -> RecordSet {
        let mut a = Record::new();
        a.insert("classifier", Value::from("100000"));
        a.insert("openingBalance", Value::from(1000.0));
        a.insert("parent", Value::Null);
        let mut b = Record::new();
        b.insert("classifier", Value::from("110000"));
        b.insert("openingBalance", Value::from(1080167.44));
        b.insert("parent", Value::from("100000"));
        RecordSet::new(vec![a, b])
    }

    #[test]
    fn json_lines_sink_writes_one_object_per_record() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write_all(&sample_set()).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"classifier":"100000","openingBalance":1000.0,"parent":null}"#
        );
        assert_eq!(
            lines[1],
            r#"{"classifier":"110000","openingBalance":1080167.44,"parent":"100000"}"#
        );
    }

    #[test]
    fn csv_sink_writes_header_from_field_order() {
        let mut sink = CsvSink::new(Vec::new());
        sink.write_all(&sample_set()).unwrap();

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "classifier,openingBalance,parent");
        assert_eq!(lines[1], "100000,1000,");
        assert_eq!(lines[2], "110000,1080167.44,100000");
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let mut sink = CsvSink::new(Vec::new());
        sink.write_all(&RecordSet::default()).unwrap();
        assert!(sink.into_inner().unwrap().is_empty());
    }
}

//! Decoding entrypoints and implementations.
//!
//! Most callers should use [`decode`], which:
//!
//! - runs the decoder selected by [`DecodeOptions::layout`] over the lines a
//!   [`crate::rows::RowFilter`] accepted
//! - applies the configured [`FormatErrorPolicy`] when a formatter rejects a
//!   value
//! - optionally reports outcomes to a [`DecodeObserver`]
//!
//! Layout-specific functions are also available under:
//! - [`fixed_width`]
//! - [`delimited`]

pub mod delimited;
pub mod fixed_width;
pub mod observability;

use std::fmt;
use std::sync::Arc;

use crate::error::{TransformError, TransformResult};
use crate::rows::RowFilter;
use crate::schema::{ColumnSpec, Schema};
use crate::types::{Record, RecordSet, Value};

pub use observability::{
    CompositeObserver, DecodeContext, DecodeObserver, DecodeSeverity, DecodeStats, FileObserver,
    LayoutKind, StdErrObserver,
};

/// Which column layout to decode under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutMode {
    /// Columns are fixed character widths declared in the schema.
    FixedWidth,
    /// Columns are positional tokens split on `delimiter`.
    Delimited {
        /// Column delimiter (single character or fixed string).
        delimiter: String,
    },
}

impl LayoutMode {
    /// Delimited layout with the conventional tab separator.
    pub fn tab_delimited() -> Self {
        Self::Delimited {
            delimiter: "\t".to_string(),
        }
    }

    fn kind(&self) -> LayoutKind {
        match self {
            LayoutMode::FixedWidth => LayoutKind::FixedWidth,
            LayoutMode::Delimited { .. } => LayoutKind::Delimited,
        }
    }
}

/// What to do when a formatter rejects a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatErrorPolicy {
    /// Return the error; no partial output.
    #[default]
    Fail,
    /// Abandon the offending line, record it in [`DecodeOutput::failures`],
    /// and continue with the remaining lines.
    SkipLine,
}

/// A line abandoned under [`FormatErrorPolicy::SkipLine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the loaded (non-blank) sequence.
    pub line: usize,
    /// Field whose formatter rejected the value.
    pub field: String,
    /// Raw (trimmed) value handed to the formatter.
    pub raw: String,
    /// Formatter-provided failure message.
    pub message: String,
}

/// Result of a decode run: the records plus every line that was abandoned.
///
/// `failures` is empty under [`FormatErrorPolicy::Fail`] (a formatter failure
/// returns `Err` instead). Under [`FormatErrorPolicy::SkipLine`] the caller
/// can always detect dropped lines here; nothing is silently discarded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodeOutput {
    /// Decoded records in original line order.
    pub records: RecordSet,
    /// Lines abandoned because a formatter rejected a value.
    pub failures: Vec<SkippedLine>,
}

/// Options controlling unified decoding behavior.
#[derive(Clone)]
pub struct DecodeOptions {
    /// Column layout to decode under.
    pub layout: LayoutMode,
    /// Policy applied when a formatter rejects a value.
    pub on_format_error: FormatErrorPolicy,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn DecodeObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: DecodeSeverity,
}

impl DecodeOptions {
    /// Options for the given layout with default policy and no observer.
    pub fn new(layout: LayoutMode) -> Self {
        Self {
            layout,
            on_format_error: FormatErrorPolicy::default(),
            observer: None,
            alert_at_or_above: DecodeSeverity::Critical,
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new(LayoutMode::FixedWidth)
    }
}

impl fmt::Debug for DecodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("layout", &self.layout)
            .field("on_format_error", &self.on_format_error)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Unified decoding entry point.
///
/// Decodes the lines accepted by `rows` against `schema` under the layout in
/// `options`. When an observer is configured, this function reports:
///
/// - `on_line_skipped` once per line abandoned under the skip policy
/// - `on_success` on completion, with record/skip counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```
/// use ledger_transform::decode::{decode, DecodeOptions, LayoutMode};
/// use ledger_transform::rows::RowFilter;
/// use ledger_transform::schema::{ColumnLayout, Schema};
///
/// # fn main() -> Result<(), ledger_transform::TransformError> {
/// let mut schema = Schema::new();
/// schema
///     .add_field("classifier", ColumnLayout::Delimited)
///     .add_field("description", ColumnLayout::Delimited);
///
/// let rows = RowFilter::from_text("100000\tATIVO\n200000\tPASSIVO\n", "\n");
/// let out = decode(&rows, &schema, &DecodeOptions::new(LayoutMode::tab_delimited()))?;
/// assert_eq!(out.records.row_count(), 2);
/// # Ok(())
/// # }
/// ```
pub fn decode(
    rows: &RowFilter,
    schema: &Schema,
    options: &DecodeOptions,
) -> TransformResult<DecodeOutput> {
    let ctx = DecodeContext {
        layout: options.layout.kind(),
    };

    let result = match &options.layout {
        LayoutMode::FixedWidth => {
            fixed_width::decode_fixed_width(rows, schema, options.on_format_error)
        }
        LayoutMode::Delimited { delimiter } => {
            delimited::decode_delimited(rows, schema, delimiter, options.on_format_error)
        }
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(out) => {
                for skipped in &out.failures {
                    obs.on_line_skipped(&ctx, skipped);
                }
                obs.on_success(
                    &ctx,
                    DecodeStats {
                        records: out.records.row_count(),
                        skipped: out.failures.len(),
                    },
                );
            }
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &TransformError) -> DecodeSeverity {
    match e {
        TransformError::Io(_) => DecodeSeverity::Critical,
        TransformError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => DecodeSeverity::Critical,
            _ => DecodeSeverity::Error,
        },
        TransformError::Format { .. }
        | TransformError::UnknownField { .. }
        | TransformError::Json(_) => DecodeSeverity::Error,
    }
}

/// Shared per-field value construction: empty cells become `Null` without
/// running the formatter; otherwise the formatter (if any) decides the typed
/// value, and the trimmed raw string is stored as-is when no formatter is set.
pub(crate) fn format_value(
    trimmed: &str,
    spec: &ColumnSpec,
    line: usize,
) -> TransformResult<Value> {
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    match &spec.formatter {
        Some(f) => f(trimmed).map_err(|message| TransformError::Format {
            line,
            field: spec.name.clone(),
            raw: trimmed.to_owned(),
            message,
        }),
        None => Ok(Value::Text(trimmed.to_owned())),
    }
}

/// Shared decode loop: walk the surviving lines, decode each one, and apply
/// the format-error policy.
pub(crate) fn run_decode<F>(
    rows: &RowFilter,
    policy: FormatErrorPolicy,
    mut decode_line: F,
) -> TransformResult<DecodeOutput>
where
    F: FnMut(usize, &str) -> TransformResult<Record>,
{
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for (idx, line) in rows.valid_rows() {
        // Report 1-based line numbers for users.
        let line_no = idx + 1;
        match decode_line(line_no, line) {
            Ok(record) => records.push(record),
            Err(TransformError::Format {
                line,
                field,
                raw,
                message,
            }) if policy == FormatErrorPolicy::SkipLine => {
                failures.push(SkippedLine {
                    line,
                    field,
                    raw,
                    message,
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(DecodeOutput {
        records: RecordSet::new(records),
        failures,
    })
}

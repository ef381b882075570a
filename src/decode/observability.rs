//! Diagnostic channel for decode outcomes.
//!
//! Decoding never logs on its own; callers attach a [`DecodeObserver`] via
//! [`crate::decode::DecodeOptions`] to receive success stats, per-line skip
//! reports, failures, and threshold-based alerts.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::TransformError;

use super::SkippedLine;

/// Severity classification used for observer callbacks and alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DecodeSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, e.g. a skipped line).
    Warning,
    /// Error-level event (decoding failed).
    Error,
    /// Critical error (typically I/O failures at the boundaries).
    Critical,
}

/// Which column layout a decode attempt used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Fixed character widths.
    FixedWidth,
    /// Delimiter-split positional tokens.
    Delimited,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::FixedWidth => write!(f, "fixed-width"),
            LayoutKind::Delimited => write!(f, "delimited"),
        }
    }
}

/// Context about a decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeContext {
    /// Layout the decoder ran under.
    pub layout: LayoutKind,
}

/// Minimal stats reported on successful decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    /// Number of decoded records.
    pub records: usize,
    /// Number of lines abandoned under the skip policy.
    pub skipped: usize,
}

/// Observer interface for decode outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait DecodeObserver: Send + Sync {
    /// Called when decoding completes (possibly with skipped lines).
    fn on_success(&self, _ctx: &DecodeContext, _stats: DecodeStats) {}

    /// Called once per line abandoned under the skip policy.
    fn on_line_skipped(&self, _ctx: &DecodeContext, _skipped: &SkippedLine) {}

    /// Called when decoding fails.
    fn on_failure(&self, _ctx: &DecodeContext, _severity: DecodeSeverity, _error: &TransformError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &DecodeContext, severity: DecodeSeverity, error: &TransformError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn DecodeObserver>>,
}

impl CompositeObserver {
    /// Create a composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn DecodeObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl DecodeObserver for CompositeObserver {
    fn on_success(&self, ctx: &DecodeContext, stats: DecodeStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_line_skipped(&self, ctx: &DecodeContext, skipped: &SkippedLine) {
        for o in &self.observers {
            o.on_line_skipped(ctx, skipped);
        }
    }

    fn on_failure(&self, ctx: &DecodeContext, severity: DecodeSeverity, error: &TransformError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &DecodeContext, severity: DecodeSeverity, error: &TransformError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs decode events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl DecodeObserver for StdErrObserver {
    fn on_success(&self, ctx: &DecodeContext, stats: DecodeStats) {
        eprintln!(
            "[decode][ok] layout={} records={} skipped={}",
            ctx.layout, stats.records, stats.skipped
        );
    }

    fn on_line_skipped(&self, ctx: &DecodeContext, skipped: &SkippedLine) {
        eprintln!(
            "[decode][skip] layout={} line={} field={} raw='{}' err={}",
            ctx.layout, skipped.line, skipped.field, skipped.raw, skipped.message
        );
    }

    fn on_failure(&self, ctx: &DecodeContext, severity: DecodeSeverity, error: &TransformError) {
        eprintln!("[decode][{severity:?}] layout={} err={error}", ctx.layout);
    }

    fn on_alert(&self, ctx: &DecodeContext, severity: DecodeSeverity, error: &TransformError) {
        eprintln!("[ALERT][decode][{severity:?}] layout={} err={error}", ctx.layout);
    }
}

/// Appends decode events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl DecodeObserver for FileObserver {
    fn on_success(&self, ctx: &DecodeContext, stats: DecodeStats) {
        self.append_line(&format!(
            "{} ok layout={} records={} skipped={}",
            unix_ts(),
            ctx.layout,
            stats.records,
            stats.skipped
        ));
    }

    fn on_line_skipped(&self, ctx: &DecodeContext, skipped: &SkippedLine) {
        self.append_line(&format!(
            "{} skip layout={} line={} field={} err={}",
            unix_ts(),
            ctx.layout,
            skipped.line,
            skipped.field,
            skipped.message
        ));
    }

    fn on_failure(&self, ctx: &DecodeContext, severity: DecodeSeverity, error: &TransformError) {
        self.append_line(&format!(
            "{} fail severity={severity:?} layout={} err={error}",
            unix_ts(),
            ctx.layout
        ));
    }

    fn on_alert(&self, ctx: &DecodeContext, severity: DecodeSeverity, error: &TransformError) {
        self.append_line(&format!(
            "{} ALERT severity={severity:?} layout={} err={error}",
            unix_ts(),
            ctx.layout
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

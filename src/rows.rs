//! Row filtering: selects the data lines of a raw export.
//!
//! Ledger exports ship with banner lines, report headers, and separator rows
//! around the actual data. The filter loads the raw text once, drops blank
//! lines, and then excludes lines by index, by prefix, or by an optional
//! predicate. Exclusion rules combine as an OR: a line is dropped if any rule
//! matches.

use std::collections::HashSet;
use std::fmt;

/// Predicate exclusion rule: returns `true` for lines that must be dropped.
pub type RowPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Holds the loaded lines and the exclusion rules applied to them.
#[derive(Default)]
pub struct RowFilter {
    lines: Vec<String>,
    ignored_indexes: HashSet<usize>,
    ignored_prefixes: Vec<String>,
    predicate: Option<RowPredicate>,
}

impl fmt::Debug for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowFilter")
            .field("lines", &self.lines.len())
            .field("ignored_indexes", &self.ignored_indexes)
            .field("ignored_prefixes", &self.ignored_prefixes)
            .field("predicate_set", &self.predicate.is_some())
            .finish()
    }
}

impl RowFilter {
    /// Create an empty filter with no loaded lines and no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter pre-loaded from raw text.
    pub fn from_text(raw: &str, row_delimiter: &str) -> Self {
        let mut filter = Self::new();
        filter.load(raw, row_delimiter);
        filter
    }

    /// Split `raw` on `row_delimiter` and keep lines that are non-empty after
    /// trimming. Replaces any previously loaded lines.
    ///
    /// Blank lines are dropped before indexing, so index-based rules refer to
    /// positions within the non-blank sequence.
    pub fn load(&mut self, raw: &str, row_delimiter: &str) {
        self.lines = raw
            .split(row_delimiter)
            .filter(|l| !l.trim().is_empty())
            .map(str::to_owned)
            .collect();
    }

    /// Exclude the line at this 0-based index.
    pub fn ignore_index(&mut self, index: usize) -> &mut Self {
        self.ignored_indexes.insert(index);
        self
    }

    /// Exclude lines whose trimmed text starts with `prefix`.
    pub fn ignore_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.ignored_prefixes.push(prefix.into());
        self
    }

    /// Exclude lines matching `predicate`. At most one predicate is active;
    /// registering another replaces the previous one.
    pub fn ignore_matching(&mut self, predicate: RowPredicate) -> &mut Self {
        self.predicate = Some(predicate);
        self
    }

    /// All loaded (non-blank) lines, before exclusion rules.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns `true` if no exclusion rule drops this line.
    pub fn is_valid(&self, line: &str, index: usize) -> bool {
        if self.ignored_indexes.contains(&index) {
            return false;
        }
        let trimmed = line.trim();
        if self.ignored_prefixes.iter().any(|p| trimmed.starts_with(p.as_str())) {
            return false;
        }
        if let Some(pred) = &self.predicate {
            if pred(line) {
                return false;
            }
        }
        true
    }

    /// Surviving lines in original order.
    pub fn valid_lines(&self) -> Vec<&str> {
        self.valid_rows().map(|(_, line)| line).collect()
    }

    /// Surviving lines in original order, paired with their 0-based index in
    /// the loaded sequence (used for per-line diagnostics).
    pub fn valid_rows(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(i, line)| self.is_valid(line, *i))
            .map(|(i, line)| (i, line.as_str()))
    }
}

//! Hierarchy resolution: nearest-ancestor lookup over classifier codes.
//!
//! Chart-of-accounts classifiers encode tree depth through shared prefixes:
//! `111000` sits under `110000`, which sits under `100000`. Resolution scans
//! the full record set for each record and picks the candidate whose
//! normalized key is the longest proper prefix of the child's normalized key.
//!
//! This is a full-rescan resolver, O(n²) in the number of records. Ledger
//! exports are hundreds of lines, so that is fine at the addressed scale; a
//! sorted-prefix index would bring per-lookup cost below linear if it ever
//! mattered.

use crate::error::{TransformError, TransformResult};
use crate::types::{Record, RecordSet, Value};

/// Default output field name used by [`attach_parents`].
pub const PARENT_FIELD: &str = "parent";

/// Key canonicalization applied before prefix comparison.
///
/// Fixed-width zero-padded codes (`110000`) need their trailing zeros
/// stripped so that prefix length reflects hierarchical depth; free-form
/// codes (`13108`) are already canonical and must be compared as-is. Choosing
/// the wrong normalization for the dataset silently produces wrong parents,
/// so callers pick it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyNormalize {
    /// Compare keys exactly as stored.
    #[default]
    Identity,
    /// Strip trailing `'0'` characters before comparison.
    StripTrailingZeros,
}

impl KeyNormalize {
    /// Apply the normalization to a key.
    pub fn apply<'a>(&self, key: &'a str) -> &'a str {
        match self {
            KeyNormalize::Identity => key,
            KeyNormalize::StripTrailingZeros => key.trim_end_matches('0'),
        }
    }
}

/// Find the nearest ancestor of `child_key` among `records`.
///
/// A record qualifies as an ancestor iff its normalized key is a *proper*
/// prefix of the normalized child key (strictly shorter and a prefix). Among
/// qualifying candidates the longest normalized key wins; on equal maximal
/// length the first candidate in record order is kept, since replacement only
/// happens on strictly greater length. The returned key is the candidate's
/// original, non-normalized key.
///
/// Records whose key field is null, non-text, or empty after normalization
/// are never candidates, and a child key that normalizes to the empty string
/// has no ancestor. Returns [`TransformError::UnknownField`] if a non-empty
/// record set does not carry `key_field` at all.
pub fn find_parent(
    records: &RecordSet,
    key_field: &str,
    child_key: &str,
    normalize: KeyNormalize,
) -> TransformResult<Option<String>> {
    check_key_field(records, key_field)?;
    Ok(nearest_ancestor(records, key_field, child_key, normalize).map(str::to_owned))
}

/// Attach a parent key to every record under the default `parent` field.
///
/// See [`attach_parents_as`].
pub fn attach_parents(
    records: &RecordSet,
    key_field: &str,
    normalize: KeyNormalize,
) -> TransformResult<RecordSet> {
    attach_parents_as(records, key_field, normalize, PARENT_FIELD)
}

/// Attach a parent key to every record under `output_field`.
///
/// Returns a new record set in which every record carries its nearest
/// ancestor's key (or `Null`) under `output_field`, preserving record order
/// and all original fields. The input set is not mutated; resolution is a
/// pure function of the set and the key field.
pub fn attach_parents_as(
    records: &RecordSet,
    key_field: &str,
    normalize: KeyNormalize,
    output_field: &str,
) -> TransformResult<RecordSet> {
    check_key_field(records, key_field)?;

    let enriched = records
        .iter()
        .map(|record| {
            let parent = record
                .get(key_field)
                .and_then(Value::as_text)
                .and_then(|key| nearest_ancestor(records, key_field, key, normalize));

            let mut out: Record = record.clone();
            out.insert(
                output_field,
                parent.map_or(Value::Null, |p| Value::Text(p.to_owned())),
            );
            out
        })
        .collect();

    Ok(RecordSet::new(enriched))
}

fn check_key_field(records: &RecordSet, key_field: &str) -> TransformResult<()> {
    if !records.is_empty() && !records.has_field(key_field) {
        return Err(TransformError::UnknownField {
            field: key_field.to_owned(),
        });
    }
    Ok(())
}

fn nearest_ancestor<'a>(
    records: &'a RecordSet,
    key_field: &str,
    child_key: &str,
    normalize: KeyNormalize,
) -> Option<&'a str> {
    let child = normalize.apply(child_key);
    if child.is_empty() {
        return None;
    }

    let mut best: Option<(&'a str, &'a str)> = None; // (original, normalized)
    for record in records {
        let Some(candidate) = record.get(key_field).and_then(Value::as_text) else {
            continue;
        };
        let normalized = normalize.apply(candidate);
        if normalized.is_empty() {
            continue;
        }
        // Proper prefix: strictly shorter and a prefix of the child key. The
        // child record itself never qualifies because of the length check.
        if child.len() > normalized.len() && child.starts_with(normalized) {
            let better = match best {
                Some((_, best_norm)) => normalized.len() > best_norm.len(),
                None => true,
            };
            if better {
                best = Some((candidate, normalized));
            }
        }
    }

    best.map(|(original, _)| original)
}

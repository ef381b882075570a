//! `ledger-transform` decodes semi-structured accounting-ledger text exports
//! (fixed-column-width or delimiter-separated) into typed records, then
//! reconstructs the tree hierarchy encoded in a classifier code by computing
//! each record's nearest ancestor.
//!
//! The pipeline is batch-oriented and synchronous: configure a
//! [`schema::Schema`] and a [`rows::RowFilter`], decode with
//! [`decode::decode`], then post-process with [`hierarchy::attach_parents`].
//!
//! ## Quick example: tab-delimited export
//!
//! ```rust
//! use ledger_transform::decode::{decode, DecodeOptions, LayoutMode};
//! use ledger_transform::format::{self, as_formatter};
//! use ledger_transform::hierarchy::{attach_parents, KeyNormalize};
//! use ledger_transform::rows::RowFilter;
//! use ledger_transform::schema::{ColumnLayout, Schema};
//! use ledger_transform::types::Value;
//!
//! # fn main() -> Result<(), ledger_transform::TransformError> {
//! let mut schema = Schema::new();
//! schema
//!     .add_formatted_field("classifier", ColumnLayout::Delimited, as_formatter(format::classifier))
//!     .add_field("description", ColumnLayout::Delimited)
//!     .add_formatted_field("finalBalance", ColumnLayout::Delimited, as_formatter(format::locale_number));
//!
//! let raw = "Conta\tDescricao\tSaldo\n1\t*** Ativo ***\t90.347,05C\n1.1\tCirculante\t8.000,00C\n";
//! let mut rows = RowFilter::from_text(raw, "\n");
//! rows.ignore_prefix("Conta");
//!
//! let out = decode(&rows, &schema, &DecodeOptions::new(LayoutMode::tab_delimited()))?;
//! let nested = attach_parents(&out.records, "classifier", KeyNormalize::Identity)?;
//!
//! assert_eq!(nested.records[1].get("parent"), Some(&Value::Text("1".into())));
//! # Ok(())
//! # }
//! ```
//!
//! ## Fixed-width exports
//!
//! Fixed-width columns declare character widths in the schema; zero-padded
//! classifier codes then need [`hierarchy::KeyNormalize::StripTrailingZeros`]
//! so that prefix length reflects hierarchical depth:
//!
//! ```rust
//! use ledger_transform::decode::{decode, DecodeOptions, LayoutMode};
//! use ledger_transform::hierarchy::{attach_parents, KeyNormalize};
//! use ledger_transform::rows::RowFilter;
//! use ledger_transform::schema::{ColumnLayout, Schema};
//! use ledger_transform::types::Value;
//!
//! # fn main() -> Result<(), ledger_transform::TransformError> {
//! let mut schema = Schema::new();
//! schema
//!     .add_field("classifier", ColumnLayout::FixedWidth { width: 8 })
//!     .add_field("description", ColumnLayout::FixedWidth { width: 18 });
//!
//! let raw = "100000  ATIVO\n110000  ATIVO CIRCULANTE\n";
//! let rows = RowFilter::from_text(raw, "\n");
//! let out = decode(&rows, &schema, &DecodeOptions::new(LayoutMode::FixedWidth))?;
//! let nested = attach_parents(&out.records, "classifier", KeyNormalize::StripTrailingZeros)?;
//!
//! assert_eq!(nested.records[1].get("parent"), Some(&Value::Text("100000".into())));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`schema`]: ordered column slots (name, layout, ignore flag, formatter)
//! - [`rows`]: row filtering (index / prefix / predicate exclusion)
//! - [`decode`]: fixed-width and delimited decoders, options, observability
//! - [`format`]: built-in formatters for ledger export conventions
//! - [`hierarchy`]: nearest-ancestor resolution over classifier codes
//! - [`source`] / [`sink`]: thin input/output boundaries
//! - [`types`]: [`types::Value`], [`types::Record`], [`types::RecordSet`]
//! - [`error`]: the crate-wide error type
//!
//! ## Error handling
//!
//! Errors are explicit values, never swallowed: source reads fail with
//! [`TransformError::Io`], formatter rejections surface per line as
//! [`TransformError::Format`] (fail-fast by default, or collect-and-continue
//! under [`decode::FormatErrorPolicy::SkipLine`] — skipped lines are always
//! reported in [`decode::DecodeOutput::failures`]).

pub mod decode;
pub mod error;
pub mod format;
pub mod hierarchy;
pub mod rows;
pub mod schema;
pub mod sink;
pub mod source;
pub mod types;

pub use error::{TransformError, TransformResult};

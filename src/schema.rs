//! Column schema: the ordered list of field slots a decoder walks per line.
//!
//! Declaration order is significant. For fixed-width decoding it defines the
//! character-offset order; for delimited decoding it defines the positional
//! index into the split tokens, and ignored columns still consume a position.
//! That positional coupling is a contract callers depend on, so the schema is
//! modelled as an explicit ordered slot list rather than a plain name map.

use std::fmt;
use std::sync::Arc;

use crate::types::Value;

/// Typed formatter applied to the raw (trimmed) text of a field.
///
/// Returns the parsed [`Value`] or a human-readable failure message. Failures
/// surface as [`crate::error::TransformError::Format`] during decoding.
pub type Formatter = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// Positional layout of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// Column occupies a fixed number of characters.
    ///
    /// Only meaningful to the fixed-width decoder; a fixed-width slot declared
    /// without a width (i.e. [`ColumnLayout::Delimited`]) yields `Null` and
    /// does not advance the cursor.
    FixedWidth {
        /// Width in characters.
        width: usize,
    },
    /// Column occupies one positional token in a delimiter-split line.
    Delimited,
}

/// A single named column slot in a [`Schema`].
#[derive(Clone)]
pub struct ColumnSpec {
    /// Field/column name (unique key within the schema).
    pub name: String,
    /// Positional layout of the column.
    pub layout: ColumnLayout,
    /// Ignored columns consume their position but never appear in output.
    pub ignored: bool,
    /// Optional formatter; when absent the trimmed raw string is stored.
    pub formatter: Option<Formatter>,
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("name", &self.name)
            .field("layout", &self.layout)
            .field("ignored", &self.ignored)
            .field("formatter_set", &self.formatter.is_some())
            .finish()
    }
}

/// Ordered registry of column slots.
///
/// Registering a name that already exists replaces the earlier definition and
/// moves it to the most-recently-declared position. No error is raised for
/// conflicting specs; callers own that consistency.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    specs: Vec<ColumnSpec>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an output field with the given layout.
    pub fn add_field(&mut self, name: impl Into<String>, layout: ColumnLayout) -> &mut Self {
        self.upsert(ColumnSpec {
            name: name.into(),
            layout,
            ignored: false,
            formatter: None,
        });
        self
    }

    /// Register an output field with a formatter applied after trimming.
    pub fn add_formatted_field(
        &mut self,
        name: impl Into<String>,
        layout: ColumnLayout,
        formatter: Formatter,
    ) -> &mut Self {
        self.upsert(ColumnSpec {
            name: name.into(),
            layout,
            ignored: false,
            formatter: Some(formatter),
        });
        self
    }

    /// Register a positional placeholder that is consumed during decoding but
    /// never appears in the output record.
    pub fn add_ignored_field(&mut self, name: impl Into<String>, layout: ColumnLayout) -> &mut Self {
        self.upsert(ColumnSpec {
            name: name.into(),
            layout,
            ignored: true,
            formatter: None,
        });
        self
    }

    fn upsert(&mut self, spec: ColumnSpec) {
        if let Some(pos) = self.index_of(&spec.name) {
            self.specs.remove(pos);
        }
        self.specs.push(spec);
    }

    /// All column slots in declaration order, ignored slots included.
    pub fn specs(&self) -> &[ColumnSpec] {
        &self.specs
    }

    /// Number of declared slots, ignored slots included.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if no slots are declared.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Returns the slot index of a column by name, if declared.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.name == name)
    }

    /// Iterate the names that will appear in decoded records, in order.
    pub fn output_field_names(&self) -> impl Iterator<Item = &str> {
        self.specs
            .iter()
            .filter(|s| !s.ignored)
            .map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{ColumnLayout, Schema};
    use crate::types::Value;

    #[test]
    fn declaration_order_is_preserved() {
        let mut schema = Schema::new();
        schema
            .add_field("classifier", ColumnLayout::Delimited)
            .add_field("description", ColumnLayout::Delimited)
            .add_ignored_field("letter", ColumnLayout::Delimited)
            .add_field("debit", ColumnLayout::Delimited);

        let names: Vec<&str> = schema.specs().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["classifier", "description", "letter", "debit"]);

        let output: Vec<&str> = schema.output_field_names().collect();
        assert_eq!(output, vec!["classifier", "description", "debit"]);
    }

    #[test]
    fn reregistering_a_name_moves_it_to_the_end() {
        let mut schema = Schema::new();
        schema
            .add_field("a", ColumnLayout::FixedWidth { width: 2 })
            .add_field("b", ColumnLayout::FixedWidth { width: 4 })
            .add_field("a", ColumnLayout::FixedWidth { width: 8 });

        let names: Vec<&str> = schema.specs().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(
            schema.specs()[1].layout,
            ColumnLayout::FixedWidth { width: 8 }
        );
    }

    #[test]
    fn reregistering_can_flip_ignored_status() {
        let mut schema = Schema::new();
        schema
            .add_formatted_field(
                "amount",
                ColumnLayout::Delimited,
                Arc::new(|s: &str| Ok(Value::Text(s.to_owned()))),
            )
            .add_ignored_field("amount", ColumnLayout::Delimited);

        assert_eq!(schema.len(), 1);
        assert!(schema.specs()[0].ignored);
        assert!(schema.specs()[0].formatter.is_none());
    }
}

//! Built-in field formatters for common ledger export conventions.
//!
//! Formatters receive the trimmed raw text of a field and return a typed
//! [`Value`] or a failure message. They are deliberately strict: a value that
//! does not match the expected convention is rejected rather than coerced.

use std::sync::Arc;

use crate::schema::Formatter;
use crate::types::Value;

/// Wrap a plain formatter function into a shareable [`Formatter`].
pub fn as_formatter(f: fn(&str) -> Result<Value, String>) -> Formatter {
    Arc::new(f)
}

/// Parse a locale-formatted ledger amount with an optional trailing
/// debit/credit marker.
///
/// Grouping dots are removed, the decimal comma becomes a decimal point, and
/// a single trailing `C` or `D` is stripped:
///
/// - `"1.080.167,44C"` parses to `1080167.44`
/// - `"1.500,00D"` parses to `1500.0`
///
/// Anything that is not a plain decimal number after that normalization is an
/// error (no loose numeric coercion).
pub fn locale_number(raw: &str) -> Result<Value, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err("empty amount".to_string());
    }
    let s = s
        .strip_suffix('C')
        .or_else(|| s.strip_suffix('D'))
        .unwrap_or(s);

    let cleaned: String = s.chars().filter(|c| *c != '.').collect();
    let cleaned = cleaned.replace(',', ".");

    cleaned
        .parse::<f64>()
        .map(Value::Number)
        .map_err(|_| format!("'{raw}' is not a locale-formatted amount"))
}

/// Remove grouping dots from a dotted classifier code, keeping it textual.
///
/// `"1.3.1.08"` becomes `"13108"`.
pub fn classifier(raw: &str) -> Result<Value, String> {
    Ok(Value::Text(raw.chars().filter(|c| *c != '.').collect()))
}

/// Parse an undelimited decimal number, e.g. the zero-padded amount columns
/// of a fixed-width export (`"001200"` parses to `1200.0`).
pub fn number(raw: &str) -> Result<Value, String> {
    raw.trim()
        .parse::<f64>()
        .map(Value::Number)
        .map_err(|_| format!("'{raw}' is not a number"))
}

#[cfg(test)]
mod tests {
    use super::{classifier, locale_number, number};
    use crate::types::Value;

    #[test]
    fn locale_number_parses_credit_and_debit_amounts() {
        assert_eq!(
            locale_number("1.080.167,44C").unwrap(),
            Value::Number(1080167.44)
        );
        assert_eq!(locale_number("1.500,00D").unwrap(), Value::Number(1500.0));
    }

    #[test]
    fn locale_number_handles_unmarked_and_negative_amounts() {
        assert_eq!(locale_number("82.997,66").unwrap(), Value::Number(82997.66));
        assert_eq!(locale_number("-1.000,00").unwrap(), Value::Number(-1000.0));
    }

    #[test]
    fn locale_number_rejects_ambiguous_input() {
        assert!(locale_number("").is_err());
        assert!(locale_number("C").is_err());
        assert!(locale_number("1,2,3").is_err());
        assert!(locale_number("saldo").is_err());
    }

    #[test]
    fn classifier_strips_grouping_dots() {
        assert_eq!(classifier("1.3.1.08").unwrap(), Value::Text("13108".into()));
        assert_eq!(classifier("31203").unwrap(), Value::Text("31203".into()));
    }

    #[test]
    fn number_parses_zero_padded_columns() {
        assert_eq!(number("001200").unwrap(), Value::Number(1200.0));
        assert!(number("00A200").is_err());
    }
}

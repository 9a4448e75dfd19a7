//! Lenient typed reads over a block's `content` / `styles` record.
//!
//! Stored designs are user data: a number may arrive as `"24"` or `"24px"`,
//! a color may be blank. Readers never fail; they fall back to the value
//! the caller supplies.

use crate::rules::Align;
use mailframe_document::Fields;
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    fields: &'a Fields,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Fields) -> Self {
        Self { fields }
    }

    /// Reader over a list item, if it is a record
    pub fn of_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// String value, or `""` when missing or not a string
    pub fn str(&self, key: &str) -> &'a str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Trimmed string value when it is not blank
    pub fn non_empty(&self, key: &str) -> Option<&'a str> {
        let value = self.str(key).trim();
        (!value.is_empty()).then_some(value)
    }

    pub fn number(&self, key: &str, default: f64) -> f64 {
        let parsed = match self.fields.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().trim_end_matches("px").trim().parse().ok(),
            _ => None,
        };

        parsed.filter(|n| n.is_finite()).unwrap_or(default)
    }

    /// Non-negative whole pixel value
    pub fn px(&self, key: &str, default: u32) -> u32 {
        let value = self.number(key, default as f64);
        if value <= 0.0 {
            0
        } else {
            value.round().min(u32::MAX as f64) as u32
        }
    }

    pub fn align(&self, key: &str) -> Align {
        Align::parse(self.str(key))
    }

    pub fn list(&self, key: &str) -> &'a [Value] {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Format a number for CSS without trailing zeros
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn px(value: u32) -> String {
    format!("{}px", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_numbers_accept_strings_with_units() {
        let f = fields(json!({ "a": 12, "b": "24px", "c": " 8 ", "d": "wide", "e": -4 }));
        let r = FieldReader::new(&f);

        assert_eq!(r.px("a", 0), 12);
        assert_eq!(r.px("b", 0), 24);
        assert_eq!(r.px("c", 0), 8);
        assert_eq!(r.px("d", 5), 5);
        assert_eq!(r.px("e", 5), 0);
        assert_eq!(r.px("missing", 7), 7);
    }

    #[test]
    fn test_non_empty_trims() {
        let f = fields(json!({ "a": "  ", "b": " x ", "c": 3 }));
        let r = FieldReader::new(&f);

        assert_eq!(r.non_empty("a"), None);
        assert_eq!(r.non_empty("b"), Some("x"));
        assert_eq!(r.non_empty("c"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(1.6), "1.6");
        assert_eq!(format_number(1.25), "1.25");
    }
}

//! Raw form input as produced by the front end.
//!
//! Every field is optional and loosely typed: numbers may arrive as JSON
//! numbers or as strings (`"30"`, `"30 cm"`). Readers here only extract what
//! is usable; defaulting happens in `generate`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cfg::MAX_SHELF_COUNT;

/// Label used when the form carries no usable `standType`.
pub const DEFAULT_STAND_TYPE: &str = "Tabletop Stand";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand_width: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand_depth: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand_height: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf_count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_width: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_height: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_depth: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_face_count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_to_back_count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaps_depth: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand_type: Option<Value>,
}

impl FormData {
    /// Lenient conversion: anything that is not a JSON object yields an empty form.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            tracing::warn!(kind = json_kind(&value), "form input is not an object; using defaults");
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::warn!(%err, "unreadable form input; using defaults");
            Self::default()
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(value))
    }

    /// Caller's archetype label verbatim; default when absent, blank, or not a string.
    pub fn stand_type_label(&self) -> String {
        match self.stand_type.as_ref().and_then(Value::as_str) {
            Some(label) if !label.trim().is_empty() => label.to_string(),
            _ => DEFAULT_STAND_TYPE.to_string(),
        }
    }

    /// Shelf/tier count in `1..=MAX_SHELF_COUNT`.
    pub fn shelf_count_or_default(&self) -> u32 {
        positive_count(self.shelf_count.as_ref(), MAX_SHELF_COUNT).unwrap_or(1)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Finite value > 0, else `None` (zero is "falsy" and means absent).
pub(crate) fn positive_f64(value: Option<&Value>) -> Option<f64> {
    loose_f64(value).filter(|v| *v > 0.0)
}

/// Finite value >= 0, else `None`.
pub(crate) fn non_negative_f64(value: Option<&Value>) -> Option<f64> {
    loose_f64(value).filter(|v| *v >= 0.0)
}

/// Integer count >= 1 from the leading integer part, clamped to `max`;
/// `None` when absent or below 1.
pub(crate) fn positive_count(value: Option<&Value>, max: u32) -> Option<u32> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?.trunc(),
        Value::String(s) => leading_int(s)? as f64,
        _ => return None,
    };
    if !(n.is_finite() && n >= 1.0) {
        return None;
    }
    if n > max as f64 {
        tracing::warn!(requested = n, max, "count clamped");
        return Some(max);
    }
    Some(n as u32)
}

fn loose_f64(value: Option<&Value>) -> Option<f64> {
    let v = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => leading_float(s)?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Longest numeric prefix after leading whitespace: `"12.5cm"` → 12.5.
pub(crate) fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut k = frac_start;
        while k < bytes.len() && bytes[k].is_ascii_digit() {
            k += 1;
        }
        digits += k - frac_start;
        if digits > 0 {
            end = k;
        }
    }
    if digits == 0 {
        return None;
    }
    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut k = end + 1;
        if k < bytes.len() && (bytes[k] == b'+' || bytes[k] == b'-') {
            k += 1;
        }
        let exp_start = k;
        while k < bytes.len() && bytes[k].is_ascii_digit() {
            k += 1;
        }
        if k > exp_start {
            end = k;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// Leading signed integer prefix: `"3 shelves"` → 3, `"2.9"` → 2.
pub(crate) fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        return None;
    }
    s[..end].parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leading_float_prefixes() {
        assert_eq!(leading_float("30"), Some(30.0));
        assert_eq!(leading_float("  12.5cm"), Some(12.5));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("-4"), Some(-4.0));
        assert_eq!(leading_float("1e2x"), Some(100.0));
        assert_eq!(leading_float("7e"), Some(7.0));
        assert_eq!(leading_float("cm"), None);
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float(""), None);
    }

    #[test]
    fn leading_int_prefixes() {
        assert_eq!(leading_int("3 shelves"), Some(3));
        assert_eq!(leading_int("2.9"), Some(2));
        assert_eq!(leading_int("x3"), None);
    }

    #[test]
    fn loose_readers_reject_garbage() {
        assert_eq!(positive_f64(Some(&json!("abc"))), None);
        assert_eq!(positive_f64(Some(&json!(0))), None);
        assert_eq!(positive_f64(Some(&json!(-3.0))), None);
        assert_eq!(positive_f64(Some(&json!(true))), None);
        assert_eq!(positive_f64(Some(&json!([1]))), None);
        assert_eq!(positive_f64(Some(&json!("45"))), Some(45.0));
        assert_eq!(non_negative_f64(Some(&json!(0))), Some(0.0));
        assert_eq!(positive_count(Some(&json!(2.7)), 10), Some(2));
        assert_eq!(positive_count(Some(&json!("0")), 10), None);
        assert_eq!(positive_count(None, 10), None);
    }

    #[test]
    fn counts_clamp_to_max() {
        assert_eq!(positive_count(Some(&json!(70000)), 200), Some(200));
        assert_eq!(positive_count(Some(&json!(4e9)), 50), Some(50));
        assert_eq!(positive_count(Some(&json!("99999999999 rows")), 200), Some(200));
        assert_eq!(positive_count(Some(&json!(200)), 200), Some(200));
        let form = FormData::from_value(json!({"shelfCount": 4e9}));
        assert_eq!(form.shelf_count_or_default(), MAX_SHELF_COUNT);
    }

    #[test]
    fn form_from_non_object_is_empty() {
        assert_eq!(FormData::from_value(json!([1, 2])), FormData::default());
        assert_eq!(FormData::from_value(Value::Null), FormData::default());
    }

    #[test]
    fn stand_type_label_defaults() {
        let form = FormData::from_value(json!({"standType": "Hexagon Stand"}));
        assert_eq!(form.stand_type_label(), "Hexagon Stand");
        let form = FormData::from_value(json!({"standType": 4}));
        assert_eq!(form.stand_type_label(), DEFAULT_STAND_TYPE);
        let form = FormData::from_value(json!({"standType": "  "}));
        assert_eq!(form.stand_type_label(), DEFAULT_STAND_TYPE);
    }

    #[test]
    fn camel_case_fields_roundtrip_names() {
        let raw = r#"{"backToBackCount": "6", "gapsDepth": 0.5}"#;
        let form = FormData::from_json_str(raw).unwrap();
        assert_eq!(form.back_to_back_count, Some(json!("6")));
        assert_eq!(form.gaps_depth, Some(json!(0.5)));
        assert!(FormData::from_json_str("{not json").is_err());
    }
}

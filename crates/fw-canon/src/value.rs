// value.rs - Null-tolerant accessors over serde_json::Value.
//
// Every lookup returns something usable: a missing path yields Null, a
// missing number yields zero, a missing list yields an empty slice.

use serde_json::Value;

static NULL: Value = Value::Null;

/// Follow `path` through nested objects; any missing step yields Null.
pub(crate) fn at<'a>(value: &'a Value, path: &[&str]) -> &'a Value {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .unwrap_or(&NULL)
}

/// Non-empty trimmed text. Numbers are rendered in decimal so numeric ids
/// survive.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric value of a JSON number or numeric string; zero otherwise.
/// A comma decimal separator is accepted.
pub(crate) fn number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().replace(',', ".").parse().unwrap_or(0.0),
        _ => 0.0,
    };
    n.max(0.0)
}

/// Piece count. Fractions are rounded, negatives and garbage become zero.
pub(crate) fn count(value: &Value) -> u32 {
    let n = number(value).round();
    if n >= u32::MAX as f64 {
        u32::MAX
    } else {
        n as u32
    }
}

/// JSON array elements, or an empty slice for anything else.
pub(crate) fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// First array element, or Null for an empty or non-array value.
pub(crate) fn first(value: &Value) -> &Value {
    items(value).first().unwrap_or(&NULL)
}

/// Boolean flag; absent or non-boolean values are false.
pub(crate) fn flag(value: &Value) -> bool {
    value.as_bool().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn at_walks_nested_objects_and_tolerates_gaps() {
        let v = json!({"a": {"b": {"c": 1}}});
        assert_eq!(at(&v, &["a", "b", "c"]), &json!(1));
        assert!(at(&v, &["a", "x", "c"]).is_null());
        assert!(at(&json!([1, 2]), &["a"]).is_null());
    }

    #[test]
    fn text_handles_strings_numbers_and_blanks() {
        assert_eq!(text(&json!("  X1 ")), Some("X1".to_string()));
        assert_eq!(text(&json!(2000071002028u64)), Some("2000071002028".to_string()));
        assert_eq!(text(&json!("   ")), None);
        assert_eq!(text(&Value::Null), None);
    }

    #[test]
    fn number_parses_strings_and_defaults_to_zero() {
        assert_eq!(number(&json!("10")), 10.0);
        assert_eq!(number(&json!("0,5")), 0.5);
        assert_eq!(number(&json!(2.25)), 2.25);
        assert_eq!(number(&json!("n/a")), 0.0);
        assert_eq!(number(&Value::Null), 0.0);
        assert_eq!(number(&json!(-4)), 0.0);
    }

    #[test]
    fn count_rounds() {
        assert_eq!(count(&json!("3")), 3);
        assert_eq!(count(&json!(2.6)), 3);
        assert_eq!(count(&Value::Null), 0);
    }
}

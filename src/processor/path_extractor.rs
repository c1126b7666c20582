//! Safe navigation over nested JSON records.
//!
//! Paths are dot-separated field names; each segment may carry one trailing
//! index, e.g. `vintage.wine.prices[0].amount`. Any missing key, null node,
//! non-mapping intermediate, malformed index or out-of-range index resolves
//! to "absent" rather than an error.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'p> {
    Key(&'p str),
    Indexed(&'p str, usize),
}

impl<'p> Segment<'p> {
    /// `None` marks a malformed segment (e.g. `prices[x]`).
    fn parse(raw: &'p str) -> Option<Self> {
        match raw.strip_suffix(']').and_then(|body| body.split_once('[')) {
            Some((name, index)) => index.parse::<usize>().ok().map(|i| Segment::Indexed(name, i)),
            None => Some(Segment::Key(raw)),
        }
    }
}

/// Resolves `path` inside `container`, returning the non-null leaf if every step succeeds.
pub fn get<'a>(container: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = container;
    for raw in path.split('.') {
        let segment = Segment::parse(raw)?;
        let map = current.as_object()?;
        current = match segment {
            Segment::Key(name) => map.get(name)?,
            Segment::Indexed(name, index) => map.get(name)?.as_array()?.get(index)?,
        };
    }
    (!current.is_null()).then_some(current)
}

/// `get` with an explicit fallback value.
pub fn get_or<'a>(container: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    get(container, path).unwrap_or(default)
}

pub fn get_str<'a>(container: &'a Value, path: &str) -> Option<&'a str> {
    get(container, path).and_then(Value::as_str)
}

/// String leaves as-is, numbers and booleans rendered to text.
pub fn get_text(container: &Value, path: &str) -> Option<String> {
    get(container, path).and_then(scalar_to_string)
}

pub fn get_f64(container: &Value, path: &str) -> Option<f64> {
    get(container, path).and_then(Value::as_f64)
}

pub fn get_i64(container: &Value, path: &str) -> Option<i64> {
    get(container, path).and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
}

/// The sequence at `path`, or an empty slice.
pub fn get_array<'a>(container: &'a Value, path: &str) -> &'a [Value] {
    get(container, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

use serde_json::Value;

/// Normalizes a raw attribute string. Whitespace-only strings and any casing
/// of "none" are treated as absent.
pub fn clean(raw: Option<&str>) -> Option<&str> {
    let x = raw?.trim();
    if x.is_empty() || x.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(x)
}

/// Same rules as [`clean`] for a GeoJSON property value. Numbers and booleans
/// are stringified, everything else is absent.
pub fn clean_value(raw: &Value) -> Option<String> {
    match raw {
        Value::String(x) => clean(Some(x)).map(str::to_string),
        Value::Number(x) => Some(x.to_string()),
        Value::Bool(x) => Some(x.to_string()),
        _ => None,
    }
}

pub fn truthy(raw: &Value) -> bool {
    match raw {
        Value::Bool(x) => *x,
        Value::Number(x) => x.as_f64().is_some_and(|x| x != 0.0),
        Value::String(x) => matches!(
            x.trim().to_lowercase().as_str(),
            "yes" | "y" | "true" | "1"
        ),
        _ => false,
    }
}

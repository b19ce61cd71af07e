use serde_json::Value;

/// Trims text and strips every `<` and `>` character. Anything that is not
/// a JSON string is returned untouched.
pub fn sanitize_input(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(sanitize_text(&text)),
        other => other,
    }
}

pub fn sanitize_text(text: &str) -> String {
    text.trim().replace(['<', '>'], "")
}

use serde_json::Value;

/// True when `text` cannot be embedded bare in a delimited cell.
///
/// The alphabet covers both delimiter layers: the comma separating row
/// cells, the pipe separating list elements inside a cell, and the double
/// quote that does the wrapping itself.
pub(crate) fn needs_quoting(text: &str) -> bool {
    text.contains(',') || text.contains('|') || text.contains('"')
}

/// Escapes raw text for embedding in a delimited cell.
///
/// Text containing a comma, a pipe or a double quote is wrapped in double
/// quotes with every embedded quote doubled (Excel-style quoting, extended
/// to the internal list separator). Anything else passes through
/// unchanged. This is one escaping pass; the list flattener applies it per
/// element and the row assembler applies it per cell, and the two passes
/// must never be conflated.
pub fn escape_text(text: &str) -> String {
    if needs_quoting(text) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Renders one scalar as a display string safe for a delimited cell.
///
/// - `None` or JSON null becomes the empty string.
/// - Numbers and booleans use their canonical text.
/// - Strings are escaped per [`escape_text`].
/// - Arrays and objects are shape mismatches against a scalar slot; they
///   degrade to their compact JSON text, escaped, rather than failing.
pub fn prepare_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => escape_text(s),
        Some(other) => escape_text(&other.to_string()),
    }
}

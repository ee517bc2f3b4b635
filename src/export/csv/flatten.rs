use serde_json::Value;

use super::escape::prepare_value;

/// Separator between elements of a flattened list, inside one cell.
pub(crate) const LIST_SEPARATOR: &str = "|";

/// Joins a scalar list into one pipe-separated string.
///
/// Each element is escaped independently, triggered only by that element's
/// own content; null elements render as empty segments and an empty list
/// renders as the empty string. The result is the raw joined string: the
/// cell-level escaping pass belongs to the row assembler, not here.
///
/// ```
/// use record_export_rs::export::csv::flatten::format_list_structure;
/// use serde_json::json;
///
/// let list = [json!("ABC"), json!("DEF"), json!("GHI")];
/// assert_eq!(format_list_structure(&list), "ABC|DEF|GHI");
/// ```
pub fn format_list_structure(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| prepare_value(Some(item)))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Transposes a list of objects into per-sub-field pipe-joined strings.
///
/// The list is treated as a column-oriented table: one output string per
/// sub-field, each the pipe-join of that sub-field's values across the
/// list. Sub-field order follows the template declaration, not any
/// object's key order, so the output is stable even when individual
/// records are missing keys.
pub fn format_object_columns<S: AsRef<str>>(items: &[Value], fields: &[S]) -> Vec<String> {
    fields
        .iter()
        .map(|field| {
            items
                .iter()
                .map(|item| prepare_value(item.get(field.as_ref())))
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR)
        })
        .collect()
}

/// Comma-joined form of [`format_object_columns`].
///
/// `[{a:"H",b:1},{a:"G",b:2}]` with fields `[a,b]` becomes `H|G,1|2`. As
/// with [`format_list_structure`], the per-field strings are raw: when
/// embedded in a row each becomes its own cell and gets the cell-level
/// escaping pass there.
pub fn format_object_list<S: AsRef<str>>(items: &[Value], fields: &[S]) -> String {
    format_object_columns(items, fields).join(",")
}

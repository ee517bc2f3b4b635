use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde_json::Value;
use std::io::Write;

use crate::error::ExportError;

/// Declaration emitted once at the head of every XML export stream.
pub(crate) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Renders single records as XML fragments of a larger streamed document.
///
/// Each fragment is the record's element, named after the record type and
/// indented for embedding under the collection tag. The `is_first` flag
/// prefixes the declaration and the opening collection tag, `is_last`
/// suffixes the closing tag; both true yields a complete single-record
/// document, both false an interior fragment. Concatenating fragments in
/// record order therefore builds a well-formed multi-record document
/// without buffering the whole batch.
///
/// Unlike the CSV side, a null scalar renders as the literal text `null`,
/// not as an empty element. Existing consumers may depend on the
/// asymmetry; do not unify it here.
///
/// # Examples
///
/// ```
/// use record_export_rs::export::xml::fragment::XmlFragmentSerializer;
/// use serde_json::json;
///
/// let serializer = XmlFragmentSerializer::new("case");
/// let record = json!({ "id": 42, "title": "Safer Jam" });
///
/// let document = serializer.fragment(&record, true, true).unwrap();
/// assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<cases>\n"));
/// assert!(document.contains("<title>Safer Jam</title>"));
/// assert!(document.ends_with("</cases>\n"));
/// ```
pub struct XmlFragmentSerializer {
    item_tag: String,
    root_tag: String,
}

impl XmlFragmentSerializer {
    /// Creates a serializer for the given record type name.
    ///
    /// The record element is named after the type; the collection tag
    /// defaults to the naive plural (`case` → `<cases>`).
    pub fn new(type_name: &str) -> Self {
        let item_tag = encode_xml_name(type_name);
        let root_tag = format!("{}s", item_tag);
        Self { item_tag, root_tag }
    }

    /// Overrides the collection tag.
    pub fn root_tag(mut self, root_tag: &str) -> Self {
        self.root_tag = encode_xml_name(root_tag);
        self
    }

    /// Renders one record, bracketed according to its position in the
    /// stream.
    pub fn fragment(
        &self,
        record: &Value,
        is_first: bool,
        is_last: bool,
    ) -> Result<String, ExportError> {
        let mut out = String::new();

        if is_first {
            out.push_str(XML_DECLARATION);
            out.push('\n');
            out.push('<');
            out.push_str(&self.root_tag);
            out.push_str(">\n");
        }

        let element = render_element(&self.item_tag, record)?;
        for line in element.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }

        if is_last {
            out.push_str("</");
            out.push_str(&self.root_tag);
            out.push_str(">\n");
        }

        Ok(out)
    }
}

/// Renders one record as a fragment with default tags for its type.
///
/// Shorthand for [`XmlFragmentSerializer::new`] plus
/// [`fragment`](XmlFragmentSerializer::fragment).
pub fn serialize_xml_fragment(
    record: &Value,
    type_name: &str,
    is_first: bool,
    is_last: bool,
) -> Result<String, ExportError> {
    XmlFragmentSerializer::new(type_name).fragment(record, is_first, is_last)
}

fn render_element(tag: &str, record: &Value) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_value_element(&mut writer, tag, record)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| ExportError::RecordWriter(format!("XML output is not UTF-8: {}", e)))
}

/// Writes `value` as one element (or a run of elements for an array) named
/// `tag`, walking the record itself rather than a template.
pub(crate) fn write_value_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &Value,
) -> Result<(), ExportError> {
    match value {
        // An array repeats the element name, one element per entry.
        Value::Array(items) => {
            for item in items {
                write_value_element(writer, tag, item)?;
            }
            Ok(())
        }
        Value::Object(fields) => {
            start_element(writer, tag)?;
            for (name, child) in fields {
                let encoded = encode_xml_name(name);
                write_value_element(writer, &encoded, child)?;
            }
            end_element(writer, tag)
        }
        // Deliberate asymmetry from the CSV empty-cell policy.
        Value::Null => write_text_element(writer, tag, "null"),
        Value::Bool(b) => write_text_element(writer, tag, &b.to_string()),
        Value::Number(n) => write_text_element(writer, tag, &n.to_string()),
        Value::String(s) => write_text_element(writer, tag, s),
    }
}

pub(crate) fn start_element<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), ExportError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| ExportError::RecordWriter(format!("Failed to write XML element: {}", e)))
}

pub(crate) fn end_element<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), ExportError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| ExportError::RecordWriter(format!("Failed to write XML element: {}", e)))
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), ExportError> {
    start_element(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| ExportError::RecordWriter(format!("Failed to write XML text: {}", e)))?;
    end_element(writer, name)
}

/// Encodes a record key as a valid XML element name, replacing invalid
/// characters with underscores. Keys come from external data, and a bad
/// key must degrade, not fail.
pub(crate) fn encode_xml_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());

    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            if c.is_ascii_alphabetic() || c == '_' {
                result.push(c);
            } else {
                result.push('_');
                if c.is_ascii_alphanumeric() {
                    result.push(c);
                }
            }
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
            result.push(c);
        } else {
            result.push('_');
        }
    }

    if result.is_empty() {
        result.push_str("field");
    }

    result
}

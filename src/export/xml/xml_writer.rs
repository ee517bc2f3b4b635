use std::cell::RefCell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use serde_json::Value;

use crate::core::writer::{RecordWriter, WriterResult};
use crate::error::ExportError;

use super::fragment::write_value_element;

/// A writer that streams records as one XML document.
///
/// `open` emits the XML declaration and the opening collection tag, each
/// `write` one record element, `close` the closing tag. This is the
/// engine-side realization of the first/last bracketing protocol, with the
/// edge state held by the writer instead of recomputed per call. Drive it through
/// [`export_all`](crate::core::writer::export_all).
///
/// # Examples
///
/// ```
/// use record_export_rs::core::writer::{RecordWriter, export_all};
/// use record_export_rs::export::xml::xml_writer::XmlExportWriterBuilder;
/// use serde_json::json;
/// use std::io::Cursor;
///
/// let records = vec![
///     json!({ "id": 1, "title": "First" }),
///     json!({ "id": 2, "title": "Second" }),
/// ];
///
/// let buffer = Cursor::new(Vec::new());
/// let writer = XmlExportWriterBuilder::new()
///     .item_tag("case")
///     .from_writer(buffer);
/// export_all(&records, &writer).unwrap();
///
/// let document = String::from_utf8(writer.into_inner().unwrap().into_inner()).unwrap();
/// assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
/// assert!(document.contains("<cases>"));
/// assert!(document.contains("<title>First</title>"));
/// assert!(document.ends_with("</cases>"));
/// ```
pub struct XmlExportWriter<W: Write = File> {
    writer: RefCell<Writer<BufWriter<W>>>,
    item_tag: String,
    root_tag: String,
}

impl<W: Write> RecordWriter for XmlExportWriter<W> {
    fn open(&self) -> WriterResult {
        let mut writer = self.writer.borrow_mut();
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| {
                ExportError::RecordWriter(format!("Failed to write XML declaration: {}", e))
            })?;
        writer
            .write_event(Event::Start(BytesStart::new(&self.root_tag)))
            .map_err(|e| ExportError::RecordWriter(format!("Failed to write XML root: {}", e)))
    }

    fn write(&self, record: &Value) -> WriterResult {
        write_value_element(&mut self.writer.borrow_mut(), &self.item_tag, record)
    }

    fn flush(&self) -> WriterResult {
        self.writer
            .borrow_mut()
            .get_mut()
            .flush()
            .map_err(|e| ExportError::RecordWriter(format!("Failed to flush XML output: {}", e)))
    }

    fn close(&self) -> WriterResult {
        self.writer
            .borrow_mut()
            .write_event(Event::End(BytesEnd::new(&self.root_tag)))
            .map_err(|e| ExportError::RecordWriter(format!("Failed to write XML end: {}", e)))?;
        self.flush()
    }
}

impl<W: Write> XmlExportWriter<W> {
    /// Unwraps the underlying sink, flushing any buffered output.
    pub fn into_inner(self) -> Result<W, ExportError> {
        self.writer
            .into_inner()
            .into_inner()
            .into_inner()
            .map_err(|e| ExportError::RecordWriter(e.to_string()))
    }
}

/// Builder for XML export writers.
#[derive(Default)]
pub struct XmlExportWriterBuilder {
    item_tag: Option<String>,
    root_tag: Option<String>,
}

impl XmlExportWriterBuilder {
    /// Creates a builder with the generic `record`/`records` tags.
    pub fn new() -> Self {
        Self {
            item_tag: None,
            root_tag: None,
        }
    }

    /// Sets the per-record element name, normally the record type name.
    pub fn item_tag(mut self, item_tag: &str) -> Self {
        self.item_tag = Some(item_tag.to_string());
        self
    }

    /// Sets the collection tag. Defaults to the naive plural of the item
    /// tag (`case` → `<cases>`).
    pub fn root_tag(mut self, root_tag: &str) -> Self {
        self.root_tag = Some(root_tag.to_string());
        self
    }

    /// Creates a writer over any `io::Write` sink.
    pub fn from_writer<W: Write>(self, wtr: W) -> XmlExportWriter<W> {
        let item_tag = self.item_tag.unwrap_or_else(|| "record".to_string());
        let root_tag = self.root_tag.unwrap_or_else(|| format!("{}s", item_tag));

        XmlExportWriter {
            writer: RefCell::new(Writer::new_with_indent(BufWriter::new(wtr), b' ', 2)),
            item_tag,
            root_tag,
        }
    }

    /// Creates a writer backed by a freshly created file.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<XmlExportWriter<File>, ExportError> {
        let file = File::create(path)
            .map_err(|e| ExportError::RecordWriter(format!("Failed to create XML file: {}", e)))?;
        Ok(self.from_writer(file))
    }
}

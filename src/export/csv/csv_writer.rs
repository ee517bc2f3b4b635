use std::{
    cell::RefCell,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde_json::Value;

use crate::{
    core::{
        template::Template,
        writer::{RecordWriter, WriterResult},
    },
    error::ExportError,
};

use super::{header::derive_header, row::assemble_row};

/// A writer that streams records of one type as a CSV document.
///
/// `open` emits the template-derived header line once (unless disabled),
/// then each `write` appends one assembled row, newline-separated. Drive
/// it through [`export_all`](crate::core::writer::export_all) or call the
/// protocol methods directly.
///
/// # Examples
///
/// ```
/// use record_export_rs::core::template::TemplateBuilder;
/// use record_export_rs::core::writer::{RecordWriter, export_all};
/// use record_export_rs::export::csv::csv_writer::CsvExportWriterBuilder;
/// use serde_json::json;
///
/// let template = TemplateBuilder::new("case")
///     .scalar("id")
///     .scalar("title")
///     .scalar_list("tags")
///     .build()
///     .unwrap();
///
/// let records = vec![
///     json!({ "id": 1, "title": "First case", "tags": ["a", "b"] }),
///     json!({ "id": 2, "title": "Second case", "tags": [] }),
/// ];
///
/// let writer = CsvExportWriterBuilder::new().from_writer(&template, Vec::new());
/// export_all(&records, &writer).unwrap();
///
/// let document = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert_eq!(document, "id,title,tags_list\n1,First case,\"a|b\"\n2,Second case,\n");
/// ```
pub struct CsvExportWriter<W: Write = File> {
    stream: RefCell<BufWriter<W>>,
    template: Template,
    has_headers: bool,
}

impl<W: Write> RecordWriter for CsvExportWriter<W> {
    fn open(&self) -> WriterResult {
        if !self.has_headers {
            return Ok(());
        }
        let header = derive_header(&self.template).join(",");
        let mut stream = self.stream.borrow_mut();
        stream
            .write_all(header.as_bytes())
            .and_then(|_| stream.write_all(b"\n"))
            .map_err(|e| ExportError::RecordWriter(format!("Failed to write CSV header: {}", e)))
    }

    fn write(&self, record: &Value) -> WriterResult {
        let row = assemble_row(record, &self.template);
        let mut stream = self.stream.borrow_mut();
        stream
            .write_all(row.as_bytes())
            .and_then(|_| stream.write_all(b"\n"))
            .map_err(|e| ExportError::RecordWriter(format!("Failed to write CSV row: {}", e)))
    }

    fn flush(&self) -> WriterResult {
        self.stream
            .borrow_mut()
            .flush()
            .map_err(|e| ExportError::RecordWriter(format!("Failed to flush CSV output: {}", e)))
    }

    fn close(&self) -> WriterResult {
        self.flush()
    }
}

impl<W: Write> CsvExportWriter<W> {
    /// Unwraps the underlying sink, flushing any buffered output.
    pub fn into_inner(self) -> Result<W, ExportError> {
        self.stream
            .into_inner()
            .into_inner()
            .map_err(|e| ExportError::RecordWriter(e.to_string()))
    }
}

/// Builder for CSV export writers.
#[derive(Default)]
pub struct CsvExportWriterBuilder {
    has_headers: bool,
}

impl CsvExportWriterBuilder {
    /// Creates a builder; the header line is written by default.
    pub fn new() -> CsvExportWriterBuilder {
        CsvExportWriterBuilder { has_headers: true }
    }

    /// Whether `open` writes the derived header line.
    pub fn has_headers(mut self, yes: bool) -> CsvExportWriterBuilder {
        self.has_headers = yes;
        self
    }

    /// Creates a writer that appends to any `io::Write` sink.
    pub fn from_writer<W: Write>(self, template: &Template, wtr: W) -> CsvExportWriter<W> {
        CsvExportWriter {
            stream: RefCell::new(BufWriter::new(wtr)),
            template: template.clone(),
            has_headers: self.has_headers,
        }
    }

    /// Creates a writer backed by a freshly created file.
    pub fn from_path<P: AsRef<Path>>(
        self,
        template: &Template,
        path: P,
    ) -> Result<CsvExportWriter<File>, ExportError> {
        let file = File::create(path)
            .map_err(|e| ExportError::RecordWriter(format!("Failed to create CSV file: {}", e)))?;
        Ok(self.from_writer(template, file))
    }
}

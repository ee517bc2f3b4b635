use thiserror::Error;

#[derive(Error, Debug)]
/// Export error
pub enum ExportError {
    /// Invalid template definition or registration. Detected once at
    /// startup, never raised per record.
    #[error("Template from: {0}")]
    Template(String),

    /// Failure while emitting an export stream.
    #[error("RecordWriter from: {0}")]
    RecordWriter(String),
}

use std::time::{Duration, Instant};

use log::debug;
use serde_json::Value;

use crate::error::ExportError;

/// Result type for writer operations.
pub type WriterResult = Result<(), ExportError>;

/// Destination for a stream of records of one type.
///
/// The protocol is `open`, then `write` once per record in final output
/// order, then `close`. Writers use the bracketing calls for the
/// document-level framing that must happen exactly once per stream: the
/// CSV writer emits the derived header line on `open`, the XML writer
/// emits the declaration plus the opening collection tag on `open` and the
/// closing tag on `close`. [`export_all`] drives the protocol so the
/// first/last computation lives in one place instead of at every call
/// site.
pub trait RecordWriter {
    /// Called once before the first record.
    fn open(&self) -> WriterResult {
        Ok(())
    }

    /// Writes one record.
    fn write(&self, record: &Value) -> WriterResult;

    /// Flushes buffered output to the underlying sink.
    fn flush(&self) -> WriterResult {
        Ok(())
    }

    /// Called once after the last record.
    fn close(&self) -> WriterResult {
        Ok(())
    }
}

/// Details of a completed export run.
pub struct ExportSummary {
    pub start: Instant,
    pub end: Instant,
    pub duration: Duration,
    pub written: usize,
}

/// Streams `records` through `writer` as one document:
/// open, one `write` per record in iteration order, close.
///
/// An empty iterator still produces a well-formed document (header-only
/// CSV, empty XML collection). The engine never reorders or deduplicates
/// records; callers that fetch concurrently must sequence the iterator
/// themselves.
pub fn export_all<'a, I, W>(records: I, writer: &W) -> Result<ExportSummary, ExportError>
where
    I: IntoIterator<Item = &'a Value>,
    W: RecordWriter + ?Sized,
{
    let start = Instant::now();

    debug!("Start of export");

    writer.open()?;

    let mut written = 0;
    for record in records {
        writer.write(record)?;
        written += 1;
    }

    writer.close()?;
    writer.flush()?;

    debug!("End of export: {} records written", written);

    Ok(ExportSummary {
        start,
        end: Instant::now(),
        duration: start.elapsed(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    /// Records the protocol calls it receives, in order.
    #[derive(Default)]
    struct ProbeWriter {
        calls: RefCell<Vec<String>>,
    }

    impl RecordWriter for ProbeWriter {
        fn open(&self) -> WriterResult {
            self.calls.borrow_mut().push("open".to_string());
            Ok(())
        }

        fn write(&self, record: &Value) -> WriterResult {
            let id = record.get("id").cloned().unwrap_or(Value::Null);
            self.calls.borrow_mut().push(format!("write:{}", id));
            Ok(())
        }

        fn close(&self) -> WriterResult {
            self.calls.borrow_mut().push("close".to_string());
            Ok(())
        }
    }

    #[test]
    fn drives_open_body_close_in_order() {
        let records = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})];
        let writer = ProbeWriter::default();

        let summary = export_all(&records, &writer).unwrap();

        assert_eq!(summary.written, 3);
        assert_eq!(
            *writer.calls.borrow(),
            vec!["open", "write:1", "write:2", "write:3", "close"]
        );
    }

    #[test]
    fn empty_batch_still_brackets_the_document() {
        let writer = ProbeWriter::default();

        let summary = export_all(&[], &writer).unwrap();

        assert_eq!(summary.written, 0);
        assert_eq!(*writer.calls.borrow(), vec!["open", "close"]);
    }
}

use log::info;

use serde_json::Value;

use crate::core::writer::{RecordWriter, WriterResult};

/// Writes records to the logger, useful for debugging export pipelines.
#[derive(Default)]
pub struct LoggerWriter {}

impl RecordWriter for LoggerWriter {
    fn write(&self, record: &Value) -> WriterResult {
        info!("Record:{}", record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::core::writer::export_all;

    use super::*;

    #[test]
    fn accepts_any_record_shape() {
        let records = vec![json!({ "id": 1 }), json!("bare string"), json!(null)];

        let summary = export_all(&records, &LoggerWriter::default()).unwrap();

        assert_eq!(summary.written, 3);
    }
}

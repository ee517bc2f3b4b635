pub mod common;

use std::fs::read_to_string;
use std::io::Cursor;

use anyhow::Result;
use tempfile::NamedTempFile;

use record_export_rs::core::writer::export_all;
use record_export_rs::export::xml::{XmlExportWriterBuilder, serialize_xml_fragment};

use common::{budgeting_case, case_template, init_logger, minimal_case};
use record_export_rs::export::csv::derive_header;

#[test]
fn streams_a_whole_collection_as_one_document() -> Result<()> {
    init_logger();

    let records = vec![budgeting_case(), minimal_case()];

    let writer = XmlExportWriterBuilder::new()
        .item_tag("case")
        .from_writer(Cursor::new(Vec::new()));
    export_all(&records, &writer)?;

    let document = String::from_utf8(writer.into_inner()?.into_inner())?;

    assert_eq!(document.matches("<?xml").count(), 1);
    assert_eq!(document.matches("<cases>").count(), 1);
    assert_eq!(document.matches("</cases>").count(), 1);
    assert_eq!(document.matches("<case>").count(), 2);
    assert!(document.contains("<title>Participatory Budgeting in Porto Alegre</title>"));
    assert!(document.contains("<country>Brazil</country>"));
    assert!(document.contains("<tags>budget</tags>"));
    assert!(document.contains("<tags>participation</tags>"));
    assert!(document.contains("<user_id>17</user_id>"));
    assert!(document.trim_end().ends_with("</cases>"));

    Ok(())
}

#[test]
fn concatenated_fragments_match_the_streamed_protocol() -> Result<()> {
    let records = vec![budgeting_case(), minimal_case()];

    let mut document = String::new();
    let count = records.len();
    for (i, record) in records.iter().enumerate() {
        document.push_str(&serialize_xml_fragment(record, "case", i == 0, i == count - 1)?);
    }

    // Exactly one declaration, one collection bracket pair, all records in
    // order between them.
    assert_eq!(document.matches("<?xml").count(), 1);
    assert_eq!(document.matches("<cases>").count(), 1);
    assert_eq!(document.matches("</cases>").count(), 1);
    assert_eq!(document.matches("<case>").count(), 2);
    let first = document.find("<id>1</id>").unwrap();
    let second = document.find("<id>99</id>").unwrap();
    assert!(first < second);
    assert!(document.starts_with("<?xml"));
    assert!(document.ends_with("</cases>\n"));

    Ok(())
}

#[test]
fn single_record_export_is_a_complete_document() -> Result<()> {
    let document = serialize_xml_fragment(&minimal_case(), "case", true, true)?;

    assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<cases>\n"));
    assert!(document.contains("<id>99</id>"));
    assert!(document.ends_with("</cases>\n"));

    Ok(())
}

#[test]
fn null_body_renders_as_literal_null_unlike_the_csv_empty_cell() -> Result<()> {
    let record = serde_json::json!({ "id": 7, "body": null });

    // XML side: the literal text `null`.
    let fragment = serialize_xml_fragment(&record, "case", false, false)?;
    assert!(fragment.contains("<body>null</body>"));

    // CSV side: an empty cell in a row that is still full-width.
    let template = case_template();
    let row = record_export_rs::export::csv::assemble_row(&record, &template);
    assert_eq!(row.split(',').count(), derive_header(&template).len());
    assert!(!row.contains("null"));

    Ok(())
}

#[test]
fn writes_an_xml_file_to_disk() -> Result<()> {
    let records = vec![budgeting_case()];

    let output = NamedTempFile::new()?;
    let writer = XmlExportWriterBuilder::new()
        .item_tag("case")
        .from_path(output.path())?;
    export_all(&records, &writer)?;

    let content = read_to_string(output.path())?;
    assert!(content.starts_with("<?xml"));
    assert!(content.contains("<cases>"));
    assert!(content.trim_end().ends_with("</cases>"));

    Ok(())
}

#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # Record Export for Rust

 A toolkit for exporting nested content records to flat, schema-stable CSV
 rows and to streamed multi-record XML documents, with a companion
 field-filtering engine. The crate is the serialization core of a
 content-management backend: fetching records, negotiating content types
 and writing HTTP responses are the caller's business; turning one nested
 record into exactly one well-escaped row or one XML fragment is this
 crate's.

 ## Core Concepts

 - **Template:** the declared shape of a record type (scalars, one-level
   objects, scalar lists, object lists). Built and validated once at
   startup; its field order is the single source of truth for column
   order, so every record of a type produces the same schema.
 - **TemplateRegistry:** all templates keyed by type name, constructed at
   process start and passed by reference, with no ambient global lookup.
 - **Record:** a `serde_json::Value` from the persistence layer. Records
   are read-only inputs; shape mismatches against the template degrade to
   best-effort stringification, never errors.
 - **RecordWriter:** the open → write-per-record → close protocol behind
   both document formats. `export_all` drives it over an iterator so the
   first/last bracket computation lives in one place.
 - **FilterSpec:** a partial mirror of a record's shape naming the fields
   to prune before serialization.

 ## Features

 The crate is modular, allowing you to enable only the engines you need:

 | **Feature** | **Description**                                        |
 |-------------|--------------------------------------------------------|
 | csv         | Enables the flattening CSV engine and document writer  |
 | xml         | Enables the streaming XML engine and document writer   |
 | logger      | Enables a logger `RecordWriter`, useful for debugging  |
 | full        | Enables all available features                         |

 ## Getting Started

 Make sure you activated the suitable features on Cargo.toml:

```toml
[dependencies]
record-export-rs = { version = "<version>", features = ["<full|csv|xml|logger>"] }
```

 Then, on your main.rs:

```rust
use record_export_rs::{
    core::{registry::TemplateRegistry, template::TemplateBuilder, writer::export_all},
    error::ExportError,
    export::{
        csv::CsvExportWriterBuilder,
        filter::{FilterSpec, filter_fields},
        xml::serialize_xml_fragment,
    },
};
use serde_json::json;

fn main() -> Result<(), ExportError> {
    let mut registry = TemplateRegistry::new();
    registry.register(
        TemplateBuilder::new("case")
            .scalar("id")
            .scalar("title")
            .scalar_list("tags")
            .object_list("authors", &["user_id", "timestamp", "name"])
            .build()?,
    )?;

    let records = vec![
        json!({
            "id": 1,
            "title": "Participatory budgeting",
            "tags": ["budget", "city"],
            "authors": [{ "user_id": 17, "timestamp": "2019-01-04", "name": "Ann" }]
        }),
        json!({ "id": 2, "title": "Citizen assembly", "tags": [] }),
    ];

    // Whole-collection CSV document: header once, then one row per record.
    let template = registry.get("case").unwrap();
    let writer = CsvExportWriterBuilder::new().from_writer(template, Vec::new());
    export_all(&records, &writer)?;
    let csv = String::from_utf8(writer.into_inner()?).unwrap();
    assert!(csv.starts_with("id,title,tags_list,authors_user_id_list"));

    // Streaming XML: one fragment per record, bracketed by first/last.
    let count = records.len();
    let mut xml = String::new();
    for (i, record) in records.iter().enumerate() {
        xml.push_str(&serialize_xml_fragment(record, "case", i == 0, i == count - 1)?);
    }
    assert!(xml.contains("<cases>"));
    assert!(xml.ends_with("</cases>\n"));

    // Field filtering produces a pruned copy, never mutating the input.
    let spec = FilterSpec::from_value(&json!({ "tags": null }));
    let pruned = filter_fields(&records[0], &spec);
    assert!(pruned.get("tags").is_none());

    Ok(())
}
```
 */

/// Core module: templates, the template registry and the writer protocol
pub mod core;

/// Error types for export operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of export engines (CSV rows, XML fragments, field filtering)
pub mod export;

//! Tabular (CSV) export for nested records.
//!
//! A record of a registered type flattens to exactly one CSV row, with the
//! column schema derived from the type's template rather than from any
//! individual record:
//!
//! 1. **escape**: the single-scalar escaping pass, shared by both
//!    delimiter layers (comma between cells, pipe between list elements).
//! 2. **flatten**: scalar lists join into one pipe-separated string;
//!    lists of objects transpose into one pipe-joined string per
//!    sub-field.
//! 3. **header**: the deterministic column list for a template.
//! 4. **row**: one cell per column for a concrete record, walking the
//!    same field order as the header deriver.
//! 5. **csv_writer**: document framing, the header line once and then one
//!    row per record.
//!
//! The two escaping passes interact but never conflate: an element is
//! escaped for pipe-joining on its own content only, and the joined string
//! is then escaped once more when it becomes a cell.
//!
//! # Examples
//!
//! ```
//! use record_export_rs::core::template::TemplateBuilder;
//! use record_export_rs::export::csv::{assemble_row, derive_header};
//! use serde_json::json;
//!
//! let template = TemplateBuilder::new("case")
//!     .scalar("id")
//!     .scalar_list("tags")
//!     .object("location", &["label", "country"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     derive_header(&template),
//!     vec!["id", "tags_list", "location_label", "location_country"]
//! );
//!
//! let record = json!({
//!     "id": 42,
//!     "tags": ["water", "land"],
//!     "location": { "label": "Cleveland, OH", "country": "United States" }
//! });
//! assert_eq!(
//!     assemble_row(&record, &template),
//!     "42,\"water|land\",\"Cleveland, OH\",United States"
//! );
//!
//! // Header width is a property of the type, not of any record.
//! assert_eq!(assemble_row(&json!({}), &template), ",,,");
//! ```

/// A module providing the single-scalar escaping pass.
pub mod escape;

/// A module providing the list and object-list flattening passes.
pub mod flatten;

/// A module deriving the column header for a record type.
pub mod header;

/// A module assembling one CSV row per record.
pub mod row;

/// A module providing the streaming CSV document writer.
pub mod csv_writer;

pub use csv_writer::{CsvExportWriter, CsvExportWriterBuilder};
pub use escape::{escape_text, prepare_value};
pub use flatten::{format_list_structure, format_object_list};
pub use header::derive_header;
pub use row::{assemble_cells, assemble_row};

//! Streaming XML export for nested records.
//!
//! One record renders as one indented XML element named after its type,
//! walking the record itself (unlike the CSV side, which walks the
//! template). A multi-record document is a bracketed stream: the
//! declaration and opening collection tag come before the first record
//! element, the closing tag after the last, so a batch of any size can be
//! emitted fragment by fragment without buffering.
//!
//! Two entry points cover the two call shapes:
//!
//! - [`fragment`]: pure per-record rendering with explicit
//!   `is_first`/`is_last` flags, for callers that own the output loop.
//! - [`xml_writer`]: a [`RecordWriter`](crate::core::writer::RecordWriter)
//!   holding the bracket state itself, for callers driving
//!   [`export_all`](crate::core::writer::export_all).
//!
//! Null scalars render as the literal text `null`. This is a deliberate
//! asymmetry from the CSV engine's empty-cell policy, preserved as
//! observed behavior.

pub mod fragment;
pub mod xml_writer;

pub use fragment::{XmlFragmentSerializer, serialize_xml_fragment};
pub use xml_writer::{XmlExportWriter, XmlExportWriterBuilder};

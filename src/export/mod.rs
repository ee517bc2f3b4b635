#[cfg(feature = "csv")]
/// This module provides the tabular (CSV) export engine.
pub mod csv;

#[cfg(feature = "xml")]
/// This module provides the streaming XML export engine.
pub mod xml;

/// This module provides the field-filtering engine.
pub mod filter;

#[cfg(feature = "logger")]
/// This module provides a logger-backed record writer, useful for debugging.
pub mod logger;

//! Structured error types for xlfo.
//!
//! `Xml`, `Zip` and `Io` together form the "resource" category: the input
//! document could not be read or is not a well-formed XLSX archive. The
//! remaining variants are conversion failures. All of them abort the whole
//! conversion; there is no per-cell recovery or partial output.

/// All errors that can occur while converting a sheet.
#[derive(Debug, thiserror::Error)]
pub enum XlfoError {
    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error (unreadable or unsupported input document).
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error reading the input or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested sheet index is out of range for the workbook.
    #[error("invalid sheet index {index}: workbook has {count} sheet(s)")]
    InvalidSheetIndex { index: usize, count: usize },

    /// Style resolution failure.
    #[error("style resolution failed: {0}")]
    Style(String),

    /// Malformed inline-image parameter JSON.
    #[error("invalid image parameters: {0}")]
    ImageParameter(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlfoError>;

//! Common trait for error payload formats.

use super::InterchangeError;
use super::json::JsonErrorWriter;
use super::odata_error::ODataError;
use super::xml::XmlErrorWriter;
use crate::config::ErrorWriterOptions;

/// A wire format error payloads can be written in.
pub trait ErrorFormat: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// MIME type for this format.
    fn mime_type(&self) -> &'static str;

    /// Write `error` to bytes.
    fn write_error(
        &self,
        error: &ODataError,
        options: &ErrorWriterOptions,
    ) -> Result<Vec<u8>, InterchangeError>;
}

/// XML error payloads (`application/xml`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Xml;

impl ErrorFormat for Xml {
    fn name(&self) -> &'static str {
        "XML"
    }

    fn mime_type(&self) -> &'static str {
        "application/xml"
    }

    fn write_error(
        &self,
        error: &ODataError,
        options: &ErrorWriterOptions,
    ) -> Result<Vec<u8>, InterchangeError> {
        XmlErrorWriter::new(options.clone()).to_vec(error)
    }
}

/// JSON error payloads (`application/json`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl ErrorFormat for Json {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn write_error(
        &self,
        error: &ODataError,
        options: &ErrorWriterOptions,
    ) -> Result<Vec<u8>, InterchangeError> {
        JsonErrorWriter::new(options.clone()).to_vec(error)
    }
}

/// Detect format from MIME type. Parameters such as `;charset=utf-8` are ignored.
pub fn detect_format_from_mime(mime: &str) -> Option<Box<dyn ErrorFormat>> {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "application/xml" | "text/xml" | "application/atom+xml" => Some(Box::new(Xml)),
        "application/json" => Some(Box::new(Json)),
        _ => None,
    }
}

/// Write `error` in the format named by `mime`.
pub fn write_error_for_mime(
    mime: &str,
    error: &ODataError,
    options: &ErrorWriterOptions,
) -> Result<Vec<u8>, InterchangeError> {
    let format = detect_format_from_mime(mime)
        .ok_or_else(|| InterchangeError::unsupported(format!("no error format for '{mime}'")))?;
    format.write_error(error, options)
}

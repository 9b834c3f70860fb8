//! Error payload serialization.
//!
//! Turns an [`ODataError`] into the wire formats clients expect:
//!
//! - **XML** - the `m:error` document in the data services metadata namespace
//! - **JSON** - the `{"error": {...}}` object
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  ODataError  │  code, message, language, inner error chain
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                   ErrorFormat trait                       │
//! │  - write_error(&ODataError, &ErrorWriterOptions)         │
//! └──────────────────────────────────────────────────────────┘
//!        │                               │
//!        ▼                               ▼
//! ┌────────────────┐             ┌─────────────────┐
//! │ XmlErrorWriter │             │ JsonErrorWriter │
//! └────────────────┘             └─────────────────┘
//! ```
//!
//! Both writers bound the depth of the inner error chain by
//! [`ErrorWriterOptions::max_inner_error_depth`](crate::config::ErrorWriterOptions)
//! and fail with [`InterchangeError::RecursionDepthLimitReached`] past it.
//!
//! ## Usage
//!
//! ```ignore
//! use edmkit::config::ErrorWriterOptions;
//! use edmkit::interchange::{ODataError, XmlErrorWriter};
//!
//! let error = ODataError::new("BadRequest", "The type 'NS.Nope' is not defined in the model.");
//! let bytes = XmlErrorWriter::new(ErrorWriterOptions::default()).to_vec(&error)?;
//! ```

mod error;
mod format;
mod json;
mod odata_error;
mod xml;

pub use error::InterchangeError;
pub use format::{ErrorFormat, Json, Xml, detect_format_from_mime, write_error_for_mime};
pub use json::JsonErrorWriter;
pub use odata_error::{DEFAULT_LANGUAGE, ODataError, ODataInnerError};
pub use xml::{METADATA_NAMESPACE, XmlErrorWriter};

/// Supported MIME types for error payloads.
pub fn supported_mime_types() -> &'static [&'static str] {
    &["application/xml", "text/xml", "application/atom+xml", "application/json"]
}

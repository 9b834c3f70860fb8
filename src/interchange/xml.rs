//! XML error payloads.
//!
//! The element names, the metadata namespace and the `en-US` fallback are a
//! compatibility contract with existing clients:
//!
//! ```xml
//! <m:error xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata">
//!   <m:code>...</m:code>
//!   <m:message xml:lang="en-US">...</m:message>
//!   <m:innererror>
//!     <m:message>...</m:message>
//!     <m:type>...</m:type>
//!     <m:stacktrace>...</m:stacktrace>
//!     <m:internalexception>...same shape...</m:internalexception>
//!   </m:innererror>
//! </m:error>
//! ```
//!
//! `m:innererror` is only written when debug information is enabled. Missing
//! text is written as an empty element, never omitted.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::trace;

use super::InterchangeError;
use super::odata_error::{ODataError, ODataInnerError};
use crate::config::ErrorWriterOptions;

/// Namespace bound to the `m` prefix.
pub const METADATA_NAMESPACE: &str =
    "http://schemas.microsoft.com/ado/2007/08/dataservices/metadata";

const ERROR: &str = "m:error";
const CODE: &str = "m:code";
const MESSAGE: &str = "m:message";
const INNER_ERROR: &str = "m:innererror";
const INTERNAL_EXCEPTION: &str = "m:internalexception";
const TYPE: &str = "m:type";
const STACK_TRACE: &str = "m:stacktrace";

fn write_error(e: impl std::fmt::Display) -> InterchangeError {
    InterchangeError::xml(format!("Write error: {e}"))
}

/// Writes [`ODataError`]s as XML.
#[derive(Debug, Clone, Default)]
pub struct XmlErrorWriter {
    options: ErrorWriterOptions,
}

impl XmlErrorWriter {
    pub fn new(options: ErrorWriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ErrorWriterOptions {
        &self.options
    }

    /// Write `error` to `sink`.
    ///
    /// Writing streams into the sink. When the inner error chain is too
    /// deep the write fails with [`InterchangeError::RecursionDepthLimitReached`]
    /// and whatever was already written stays in the sink.
    pub fn write<W: Write>(&self, sink: W, error: &ODataError) -> Result<(), InterchangeError> {
        let mut writer = match self.options.indent {
            Some(width) => Writer::new_with_indent(sink, b' ', width),
            None => Writer::new(sink),
        };

        let mut root = BytesStart::new(ERROR);
        root.push_attribute(("xmlns:m", METADATA_NAMESPACE));
        writer
            .write_event(Event::Start(root))
            .map_err(write_error)?;

        write_text_element(&mut writer, BytesStart::new(CODE), error.code.as_deref())?;

        let mut message = BytesStart::new(MESSAGE);
        message.push_attribute(("xml:lang", error.language()));
        write_text_element(&mut writer, message, error.message.as_deref())?;

        if self.options.include_debug_information {
            if let Some(inner) = &error.inner_error {
                self.write_inner_error(&mut writer, inner, INNER_ERROR, 0)?;
            }
        }

        writer
            .write_event(Event::End(BytesEnd::new(ERROR)))
            .map_err(write_error)?;
        Ok(())
    }

    /// Write `error` into a new buffer. No output is returned on failure.
    pub fn to_vec(&self, error: &ODataError) -> Result<Vec<u8>, InterchangeError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, error)?;
        Ok(buffer)
    }

    fn write_inner_error<W: Write>(
        &self,
        writer: &mut Writer<W>,
        inner: &ODataInnerError,
        element: &str,
        depth: usize,
    ) -> Result<(), InterchangeError> {
        let depth = depth + 1;
        if depth > self.options.max_inner_error_depth {
            return Err(InterchangeError::RecursionDepthLimitReached(
                self.options.max_inner_error_depth,
            ));
        }
        trace!(depth, element, "writing inner error");

        writer
            .write_event(Event::Start(BytesStart::new(element)))
            .map_err(write_error)?;
        write_text_element(writer, BytesStart::new(MESSAGE), inner.message.as_deref())?;
        write_text_element(writer, BytesStart::new(TYPE), inner.type_name.as_deref())?;
        write_text_element(writer, BytesStart::new(STACK_TRACE), inner.stack_trace.as_deref())?;
        if let Some(nested) = inner.inner_error() {
            self.write_inner_error(writer, nested, INTERNAL_EXCEPTION, depth)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(element)))
            .map_err(write_error)?;
        Ok(())
    }
}

/// Write `start`, the escaped text (empty when missing) and the end tag.
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    text: Option<&str>,
) -> Result<(), InterchangeError> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start)).map_err(write_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text.unwrap_or_default())))
        .map_err(write_error)?;
    writer.write_event(Event::End(end)).map_err(write_error)?;
    Ok(())
}

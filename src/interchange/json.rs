//! JSON error payloads.
//!
//! Same content and depth rule as the XML writer:
//!
//! ```json
//! {"error": {
//!     "code": "",
//!     "message": {"lang": "en-US", "value": ""},
//!     "innererror": {"message": "", "type": "", "stacktrace": "",
//!                    "internalexception": { ... }}}}
//! ```
//!
//! The whole document is built before anything is written, so a failed
//! write leaves the sink untouched.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value, json};
use tracing::trace;

use super::InterchangeError;
use super::odata_error::{ODataError, ODataInnerError};
use crate::config::ErrorWriterOptions;

/// Writes [`ODataError`]s as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonErrorWriter {
    options: ErrorWriterOptions,
}

impl JsonErrorWriter {
    pub fn new(options: ErrorWriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ErrorWriterOptions {
        &self.options
    }

    /// Build the JSON document for `error`.
    pub fn to_value(&self, error: &ODataError) -> Result<Value, InterchangeError> {
        let mut body = Map::new();
        body.insert("code".to_string(), json!(error.code.as_deref().unwrap_or_default()));
        body.insert(
            "message".to_string(),
            json!({
                "lang": error.language(),
                "value": error.message.as_deref().unwrap_or_default(),
            }),
        );

        if self.options.include_debug_information {
            if let Some(inner) = &error.inner_error {
                body.insert("innererror".to_string(), self.inner_error_value(inner, 0)?);
            }
        }

        Ok(json!({ "error": body }))
    }

    /// Write `error` to `sink`.
    pub fn write<W: Write>(&self, sink: W, error: &ODataError) -> Result<(), InterchangeError> {
        let value = self.to_value(error)?;
        match self.options.indent {
            Some(width) => {
                let indent = vec![b' '; width];
                let mut serializer =
                    Serializer::with_formatter(sink, PrettyFormatter::with_indent(&indent));
                value
                    .serialize(&mut serializer)
                    .map_err(|e| InterchangeError::json(format!("Write error: {e}")))?;
            }
            None => {
                serde_json::to_writer(sink, &value)
                    .map_err(|e| InterchangeError::json(format!("Write error: {e}")))?;
            }
        }
        Ok(())
    }

    pub fn to_vec(&self, error: &ODataError) -> Result<Vec<u8>, InterchangeError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, error)?;
        Ok(buffer)
    }

    fn inner_error_value(
        &self,
        inner: &ODataInnerError,
        depth: usize,
    ) -> Result<Value, InterchangeError> {
        let depth = depth + 1;
        if depth > self.options.max_inner_error_depth {
            return Err(InterchangeError::RecursionDepthLimitReached(
                self.options.max_inner_error_depth,
            ));
        }
        trace!(depth, "building inner error");

        let mut object = Map::new();
        object.insert("message".to_string(), json!(inner.message.as_deref().unwrap_or_default()));
        object.insert("type".to_string(), json!(inner.type_name.as_deref().unwrap_or_default()));
        object.insert(
            "stacktrace".to_string(),
            json!(inner.stack_trace.as_deref().unwrap_or_default()),
        );
        if let Some(nested) = inner.inner_error() {
            object.insert(
                "internalexception".to_string(),
                self.inner_error_value(nested, depth)?,
            );
        }
        Ok(Value::Object(object))
    }
}

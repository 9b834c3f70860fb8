//! The error payload written by the error serializers.

use std::error::Error;

/// Language written on the message when none is set.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// A top-level error: code, message and optional debug details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ODataError {
    pub code: Option<String>,
    pub message: Option<String>,
    /// Language of `message`; [`DEFAULT_LANGUAGE`] when unset.
    pub message_language: Option<String>,
    pub inner_error: Option<ODataInnerError>,
}

impl ODataError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.message_language = Some(language.into());
        self
    }

    pub fn with_inner_error(mut self, inner_error: ODataInnerError) -> Self {
        self.inner_error = Some(inner_error);
        self
    }

    /// The language actually written for the message.
    pub fn language(&self) -> &str {
        self.message_language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }
}

/// Debug details of an error, possibly wrapping a further nested detail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ODataInnerError {
    pub message: Option<String>,
    pub type_name: Option<String>,
    pub stack_trace: Option<String>,
    pub inner_error: Option<Box<ODataInnerError>>,
}

impl ODataInnerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Details built from `error` and its chain of sources.
    ///
    /// Each source becomes one nested level.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut messages: Vec<String> =
            std::iter::successors(Some(error), |e| (*e).source()).map(|e| e.to_string()).collect();

        let mut inner: Option<Box<ODataInnerError>> = None;
        while let Some(message) = messages.pop() {
            inner = Some(Box::new(ODataInnerError {
                message: Some(message),
                inner_error: inner,
                ..Self::default()
            }));
        }
        inner.map(|boxed| *boxed).unwrap_or_default()
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn with_inner_error(mut self, inner_error: ODataInnerError) -> Self {
        self.inner_error = Some(Box::new(inner_error));
        self
    }

    pub fn inner_error(&self) -> Option<&ODataInnerError> {
        self.inner_error.as_deref()
    }

    /// Number of levels in this chain, counting `self`.
    pub fn depth(&self) -> usize {
        std::iter::successors(Some(self), |inner| inner.inner_error()).count()
    }
}

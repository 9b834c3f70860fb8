//! Resolution and serialization options

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for binding query paths against a model
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct QueryOptions {
    /// Maximum number of type-cast segments followed in one path
    pub max_path_depth: usize,
    /// Match type names without regard to ASCII case
    pub enable_case_insensitive: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_path_depth: 800,
            enable_case_insensitive: false,
        }
    }
}

/// Options for writing error payloads
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ErrorWriterOptions {
    /// Write the inner error chain (debug builds of a service only)
    pub include_debug_information: bool,
    /// Maximum number of nested inner errors written
    pub max_inner_error_depth: usize,
    /// Spaces per indentation level; `None` writes compact output
    pub indent: Option<usize>,
}

impl Default for ErrorWriterOptions {
    fn default() -> Self {
        Self {
            include_debug_information: false,
            max_inner_error_depth: 100,
            indent: None,
        }
    }
}

impl ErrorWriterOptions {
    /// Options that write the inner error chain up to `max_inner_error_depth` levels.
    pub fn debug(max_inner_error_depth: usize) -> Self {
        Self {
            include_debug_information: true,
            max_inner_error_depth,
            ..Self::default()
        }
    }
}

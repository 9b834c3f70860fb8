//! Error types for query path binding.

use thiserror::Error;

use crate::base::Name;

/// Errors raised while binding a query path against a model.
///
/// These are client-input errors: the request names something the model
/// does not allow. They are reported once and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The segment was expected to be a type cast but is not qualified.
    #[error("Trying to follow type segments on a segment that isn't a type. Segment was '{0}'.")]
    NonTypeSegment(Name),

    /// A qualified segment names no type in the model.
    #[error("The type '{0}' is not defined in the model.")]
    TypeNotFound(Name),

    /// A qualified segment names a type that does not narrow the current one.
    #[error(
        "The type '{segment}' is not related to the type '{current}'. A type cast must name the current type or one of its derived types."
    )]
    IncompatibleType { segment: Name, current: Name },

    /// A case-insensitive lookup matched more than one type.
    #[error("More than one type matches the name '{0}'.")]
    AmbiguousType(Name),

    /// The path has more type segments than the configured maximum.
    #[error("The path has too many type segments. The maximum depth is {max_depth}.")]
    PathTooDeep { max_depth: usize },
}

impl QueryError {
    pub fn non_type_segment(segment: impl Into<Name>) -> Self {
        Self::NonTypeSegment(segment.into())
    }

    pub fn type_not_found(segment: impl Into<Name>) -> Self {
        Self::TypeNotFound(segment.into())
    }

    pub fn incompatible_type(segment: impl Into<Name>, current: impl Into<Name>) -> Self {
        Self::IncompatibleType {
            segment: segment.into(),
            current: current.into(),
        }
    }

    pub fn ambiguous_type(segment: impl Into<Name>) -> Self {
        Self::AmbiguousType(segment.into())
    }

    /// The path segment text the error is about, if it names one.
    pub fn segment(&self) -> Option<&str> {
        match self {
            Self::NonTypeSegment(segment)
            | Self::TypeNotFound(segment)
            | Self::AmbiguousType(segment)
            | Self::IncompatibleType { segment, .. } => Some(segment.as_str()),
            Self::PathTooDeep { .. } => None,
        }
    }
}

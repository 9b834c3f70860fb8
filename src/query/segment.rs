//! Bound path segments.

use crate::base::Name;
use crate::hir::TypeId;
use crate::syntax::PathSegmentToken;

/// A path segment interpreted as a type cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSegment {
    /// The segment text, e.g. `NS.Employee`.
    pub identifier: Name,
    /// The type cast to.
    pub edm_type: TypeId,
    /// The type that was current before the cast; `edm_type` equals it or
    /// derives from it.
    pub previous_type: TypeId,
}

/// Result of following the leading type casts of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowedTypeSegments<'t> {
    /// One segment per consumed token, in path order.
    pub segments: Vec<TypeSegment>,
    /// The first token that was not consumed as a type cast.
    pub first_non_type_token: &'t PathSegmentToken,
}

impl FollowedTypeSegments<'_> {
    /// The type of the last segment, if any segment was consumed.
    pub fn last_type(&self) -> Option<TypeId> {
        self.segments.last().map(|segment| segment.edm_type)
    }
}

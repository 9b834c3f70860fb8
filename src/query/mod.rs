//! Query path binding.
//!
//! Turns path-token chains from `$select`/`$expand` style options into typed
//! segments against a [`SemanticModel`](crate::hir::SemanticModel).

mod binder;
mod error;
mod resolver;
mod segment;

pub use binder::{TypeSegmentBinder, follow_type_segments};
pub use error::QueryError;
pub use resolver::{DefaultUriResolver, UriResolver};
pub use segment::{FollowedTypeSegments, TypeSegment};

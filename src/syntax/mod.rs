//! Syntax input consumed by the semantic layer.
//!
//! Both halves are produced by upstream collaborators and are opaque beyond
//! their named accessors:
//! - [`csdl`]: schema element trees from a metadata document
//! - [`path`]: `$select`/`$expand` path token chains

pub mod csdl;
pub mod path;

pub use csdl::{
    CsdlAnnotation, CsdlAnnotations, CsdlEnumMember, CsdlEnumType, CsdlExpression, CsdlProperty,
    CsdlSchema, CsdlStructuredType,
};
pub use path::{NamedValue, PathSegmentToken, PathTokenKind};

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};

//! # edmkit-base
//!
//! Semantic resolution layer for OData CSDL metadata and query paths.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! interchange → Error payload writers (XML, JSON)
//!   ↓
//! query       → Type-segment path binding, name-resolution policy
//!   ↓
//! hir         → Semantic model: lazily resolved nodes, bad elements
//!   ↓
//! syntax      → CSDL schema trees, path segment tokens
//!   ↓
//! config      → Query and error writer options
//!   ↓
//! base        → Primitives (Name, Position, Span)
//! ```

// ============================================================================
// MODULES (dependency order: base → config → syntax → hir → query → interchange)
// ============================================================================

/// Foundation types: Name, Position, Span
pub mod base;

/// Options for path binding and error writing
pub mod config;

/// Syntax: CSDL schema trees and path segment tokens
pub mod syntax;

/// High-level IR: the semantic model
pub mod hir;

/// Query path binding: type segments and name resolution
pub mod query;

/// Error payload formats: XML, JSON
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{Name, Position, Span};

// Re-export the main entry points
pub use config::{ErrorWriterOptions, QueryOptions};
pub use hir::{EdmError, EdmErrorCode, SemanticModel};
pub use query::{QueryError, follow_type_segments};

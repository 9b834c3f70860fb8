//! High-level IR (HIR): the semantic model built from CSDL syntax.
//!
//! Syntax trees are immutable inputs. Each schema element gets a semantic
//! node that resolves names against the model on demand and memoizes what it
//! computes. Problems found along the way never abort resolution: they turn
//! into bad elements carrying diagnostics, so one pass reports everything.
//!
//! ## Key Types
//!
//! - [`SemanticModel`]: arena owning every node, plus lookups
//! - [`StructuredType`], [`Property`], [`EnumType`], [`EnumMember`]: views
//! - [`BadElement`], [`BadType`]: placeholders for what failed to resolve
//! - [`VocabularyAnnotation`]: an annotation with its resolved target
//! - [`Cache`]: the compute-once cell behind every derived property
//!
//! ## Resolution Layers
//!
//! ```text
//! CsdlSchema (syntax)          ← INPUT: parsed schema documents
//!     │
//!     ▼
//! SemanticModel::new           ← materialize nodes, register names
//!     │
//!     ▼
//! base_type / type_ref / value ← lazily resolved, cached per node
//!     │
//!     ▼
//! AnnotationIndex              ← cross-schema target resolution
//!     │
//!     ▼
//! validate()                   ← gather every element's errors
//! ```

mod annotations;
mod bad;
mod cache;
mod diagnostics;
mod element;
mod enums;
mod model;
mod structured;
mod types;
mod validation;
mod values;

pub use annotations::{AnnotationTarget, AnnotationsNode, VocabularyAnnotation};
pub use bad::{BadElement, BadType};
pub use cache::Cache;
pub use diagnostics::{DiagnosticCollector, EdmError, EdmErrorCode};
pub use element::{
    EdmCheckable, EdmElement, EdmNamedElement, EdmSchemaElement, EdmSemanticElement,
    EdmStructuredType, EdmType, EdmVocabularyAnnotatable, ElementId,
};
pub use enums::{DEFAULT_UNDERLYING_TYPE, EnumMember, EnumType};
pub use model::{Element, SchemaContext, SchemaType, SemanticModel, TypeRef};
pub use structured::{Ancestors, Property, StructuredType};
pub use types::{PrimitiveTypeKind, PrimitiveTypeReference, SchemaId, TypeId, TypeKind};
pub use values::EdmIntegerConstant;

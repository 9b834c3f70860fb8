//! The capability surface shared by semantic nodes and bad elements.
//!
//! Instead of tagging elements with a kind and branching on it, each
//! capability is its own trait. Well-formed views and [`BadElement`]s
//! implement the same traits, so traversal code written against them never
//! has to ask whether an element is bad.
//!
//! [`BadElement`]: super::bad::BadElement

use std::fmt;

use super::annotations::VocabularyAnnotation;
use super::diagnostics::EdmError;
use super::types::TypeKind;
use crate::base::Name;

/// Identity of an element: its annotation target path.
///
/// `NS.Person`, `NS.Person/Name` and `NS.Color/Red` identify a type, a
/// property and an enum member. Bad elements share the fixed id `<bad>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Name);

impl ElementId {
    /// The identity of every bad element.
    pub const BAD: ElementId = ElementId(Name::new_inline("<bad>"));

    pub fn new(path: impl Into<Name>) -> Self {
        Self(path.into())
    }

    /// Id of a member (property or enum member) of the type `owner`.
    pub fn member(owner: &str, member: &str) -> Self {
        Self(Name::from(format!("{}/{}", owner, member)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Anything that is part of a model.
pub trait EdmElement {
    fn element_id(&self) -> ElementId;
}

/// An element that may carry validation errors.
pub trait EdmCheckable {
    /// Diagnostics for this element; empty when it is valid.
    fn errors(&self) -> &[EdmError];
}

/// An element that vocabulary annotations can target.
pub trait EdmVocabularyAnnotatable: EdmElement {
    /// Annotations targeting this element, inline ones first.
    fn vocabulary_annotations(&self) -> Vec<&VocabularyAnnotation>;
}

pub trait EdmNamedElement {
    fn name(&self) -> &str;
}

/// A named element declared directly in a schema.
pub trait EdmSchemaElement: EdmNamedElement {
    fn namespace(&self) -> &str;

    fn full_name(&self) -> String {
        if self.namespace().is_empty() {
            self.name().to_string()
        } else {
            format!("{}.{}", self.namespace(), self.name())
        }
    }
}

pub trait EdmType {
    fn type_kind(&self) -> TypeKind;
}

/// An entity or complex type.
pub trait EdmStructuredType: EdmType + EdmSchemaElement {
    fn is_abstract(&self) -> bool;

    fn is_open(&self) -> bool;

    /// Names of the properties declared on this type itself, in order.
    fn declared_property_names(&self) -> Vec<&str>;
}

/// The capabilities generic traversal relies on.
pub trait EdmSemanticElement: EdmElement + EdmCheckable + EdmVocabularyAnnotatable {}

impl<T> EdmSemanticElement for T where T: EdmElement + EdmCheckable + EdmVocabularyAnnotatable + ?Sized {}

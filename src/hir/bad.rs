//! Bad elements: placeholders for parts of a model that failed to resolve.
//!
//! A bad element carries the diagnostics explaining what went wrong and
//! answers every capability query with a degenerate value. Resolution keeps
//! going past it, so one pass can report every independent error.

use super::annotations::VocabularyAnnotation;
use super::diagnostics::EdmError;
use super::element::{
    EdmCheckable, EdmElement, EdmNamedElement, EdmSchemaElement, EdmStructuredType, EdmType,
    EdmVocabularyAnnotatable, ElementId,
};
use super::types::TypeKind;
use crate::base::Name;

/// An invalid element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadElement {
    errors: Vec<EdmError>,
}

impl BadElement {
    /// # Panics
    ///
    /// Panics if `errors` is empty; a bad element without a reason is a bug.
    pub fn new(errors: Vec<EdmError>) -> Self {
        assert!(!errors.is_empty(), "a bad element needs at least one error");
        Self { errors }
    }
}

impl EdmElement for BadElement {
    fn element_id(&self) -> ElementId {
        ElementId::BAD
    }
}

impl EdmCheckable for BadElement {
    fn errors(&self) -> &[EdmError] {
        &self.errors
    }
}

impl EdmVocabularyAnnotatable for BadElement {
    fn vocabulary_annotations(&self) -> Vec<&VocabularyAnnotation> {
        Vec::new()
    }
}

/// A type reference that could not be resolved.
///
/// Keeps the name it was referenced by so messages and serializers can still
/// show something meaningful.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadType {
    namespace: Name,
    name: Name,
    errors: Vec<EdmError>,
}

impl BadType {
    /// # Panics
    ///
    /// Panics if `errors` is empty.
    pub fn new(qualified_name: &str, errors: Vec<EdmError>) -> Self {
        assert!(!errors.is_empty(), "a bad type needs at least one error");
        let (namespace, name) = match qualified_name.rsplit_once('.') {
            Some((namespace, name)) => (Name::from(namespace), Name::from(name)),
            None => (Name::default(), Name::from(qualified_name)),
        };
        Self {
            namespace,
            name,
            errors,
        }
    }
}

impl EdmElement for BadType {
    fn element_id(&self) -> ElementId {
        ElementId::BAD
    }
}

impl EdmCheckable for BadType {
    fn errors(&self) -> &[EdmError] {
        &self.errors
    }
}

impl EdmVocabularyAnnotatable for BadType {
    fn vocabulary_annotations(&self) -> Vec<&VocabularyAnnotation> {
        Vec::new()
    }
}

impl EdmNamedElement for BadType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl EdmSchemaElement for BadType {
    fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl EdmType for BadType {
    fn type_kind(&self) -> TypeKind {
        TypeKind::None
    }
}

impl EdmStructuredType for BadType {
    fn is_abstract(&self) -> bool {
        false
    }

    fn is_open(&self) -> bool {
        false
    }

    fn declared_property_names(&self) -> Vec<&str> {
        Vec::new()
    }
}

//! Entity and complex types, and their properties.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::warn;

use super::annotations::VocabularyAnnotation;
use super::bad::BadType;
use super::cache::Cache;
use super::diagnostics::{DiagnosticCollector, EdmError, EdmErrorCode};
use super::element::{
    EdmCheckable, EdmElement, EdmNamedElement, EdmSchemaElement, EdmStructuredType, EdmType,
    EdmVocabularyAnnotatable, ElementId,
};
use super::model::{ResolvedType, SchemaContext, SchemaType, SemanticModel, TypeRef};
use super::types::{SchemaId, TypeId, TypeKind};
use crate::syntax::{CsdlProperty, CsdlStructuredType};

// ============================================================================
// NODES
// ============================================================================

pub(crate) struct StructuredTypeNode {
    id: TypeId,
    schema: SchemaId,
    kind: TypeKind,
    syntax: Arc<CsdlStructuredType>,
    properties: Vec<PropertyNode>,
    base_type: Cache<Option<ResolvedType>>,
    errors: Cache<Vec<EdmError>>,
}

impl StructuredTypeNode {
    pub(crate) fn new(
        id: TypeId,
        schema: SchemaId,
        kind: TypeKind,
        syntax: Arc<CsdlStructuredType>,
    ) -> Self {
        debug_assert!(kind.is_structured());
        let properties = syntax
            .properties()
            .iter()
            .map(|property| PropertyNode {
                syntax: Arc::clone(property),
                type_ref: Cache::new(),
            })
            .collect();
        Self {
            id,
            schema,
            kind,
            syntax,
            properties,
            base_type: Cache::new(),
            errors: Cache::new(),
        }
    }

    pub(crate) fn kind(&self) -> TypeKind {
        self.kind
    }

    pub(crate) fn syntax(&self) -> &CsdlStructuredType {
        &self.syntax
    }
}

pub(crate) struct PropertyNode {
    syntax: Arc<CsdlProperty>,
    type_ref: Cache<ResolvedType>,
}

// ============================================================================
// STRUCTURED TYPE VIEW
// ============================================================================

/// An entity or complex type of a [`SemanticModel`].
#[derive(Clone, Copy)]
pub struct StructuredType<'m> {
    model: &'m SemanticModel,
    node: &'m StructuredTypeNode,
}

impl<'m> StructuredType<'m> {
    pub(crate) fn new(model: &'m SemanticModel, node: &'m StructuredTypeNode) -> Self {
        Self { model, node }
    }

    pub fn id(&self) -> TypeId {
        self.node.id
    }

    pub fn model(&self) -> &'m SemanticModel {
        self.model
    }

    pub fn context(&self) -> &'m SchemaContext {
        self.model.context(self.node.schema)
    }

    pub fn syntax(&self) -> &'m CsdlStructuredType {
        &self.node.syntax
    }

    /// The resolved base type, if one is declared.
    ///
    /// An unresolvable or non-structured base comes back as [`TypeRef::Bad`].
    pub fn base_type(&self) -> Option<TypeRef<'m>> {
        let model = self.model;
        let node = self.node;
        node.base_type
            .get_or_compute(|| self.resolve_base_type())
            .as_ref()
            .map(|resolved| resolved.view(model, false))
    }

    /// The base type when it resolved to a structured type.
    pub fn base_structured_type(&self) -> Option<StructuredType<'m>> {
        self.base_type()?.as_structured()
    }

    /// Base types from nearest to furthest. Stops before revisiting a type,
    /// so cyclic hierarchies end the walk instead of looping.
    pub fn ancestors(&self) -> Ancestors<'m> {
        let mut visited = FxHashSet::default();
        visited.insert(self.id());
        Ancestors {
            current: Some(*self),
            visited,
        }
    }

    /// True when the base chain leads back to this type.
    pub fn has_cyclic_base(&self) -> bool {
        let mut visited = FxHashSet::default();
        let mut current = *self;
        while let Some(base) = current.base_structured_type() {
            if base.id() == self.id() {
                return true;
            }
            if !visited.insert(base.id()) {
                return false;
            }
            current = base;
        }
        false
    }

    /// True when `other` is this type or one of its base types.
    pub fn is_or_inherits_from(&self, other: TypeId) -> bool {
        self.id() == other || self.ancestors().any(|ancestor| ancestor.id() == other)
    }

    pub fn declared_properties(&self) -> impl Iterator<Item = Property<'m>> + use<'m> {
        let model = self.model;
        let owner = self.node;
        owner
            .properties
            .iter()
            .map(move |node| Property { model, owner, node })
    }

    /// Declared and inherited properties, base type properties first.
    pub fn properties(&self) -> Vec<Property<'m>> {
        let mut hierarchy: Vec<StructuredType<'m>> = self.ancestors().collect();
        hierarchy.reverse();
        hierarchy.push(*self);
        hierarchy
            .iter()
            .flat_map(|ty| ty.declared_properties())
            .collect()
    }

    /// Find a declared or inherited property by name.
    pub fn find_property(&self, name: &str) -> Option<Property<'m>> {
        std::iter::once(*self)
            .chain(self.ancestors())
            .find_map(|ty| ty.declared_properties().find(|p| p.name() == name))
    }

    /// The key properties: those of the nearest type in the hierarchy that
    /// declares a key. Names that do not resolve are skipped.
    pub fn key(&self) -> Vec<Property<'m>> {
        let Some(declaring) = std::iter::once(*self)
            .chain(self.ancestors())
            .find(|ty| !ty.syntax().key().is_empty())
        else {
            return Vec::new();
        };
        declaring
            .syntax()
            .key()
            .iter()
            .filter_map(|name| declaring.find_property(name))
            .collect()
    }

    fn resolve_base_type(&self) -> Option<ResolvedType> {
        let name = self.node.syntax.base_type()?;
        let location = self.node.syntax.location();
        let resolved = self.model.resolve_type_name(self.context(), name, location);

        // Unresolved names keep their own diagnostic.
        let acceptable = match &resolved {
            ResolvedType::Schema(id) => self.model.type_node(*id).kind() == self.node.kind,
            ResolvedType::Bad(_) => true,
            ResolvedType::Primitive(_) | ResolvedType::Collection(_) => false,
        };
        if acceptable {
            return Some(resolved);
        }

        let expected = match self.node.kind {
            TypeKind::Entity => "an entity",
            _ => "a complex",
        };
        Some(ResolvedType::Bad(BadType::new(
            name,
            vec![
                EdmError::new(
                    EdmErrorCode::BaseTypeMustBeStructured,
                    format!(
                        "the base type '{}' of '{}' must be {} type",
                        name,
                        self.full_name(),
                        expected
                    ),
                )
                .at(location),
            ],
        )))
    }

    fn compute_errors(&self) -> Vec<EdmError> {
        let mut diagnostics = DiagnosticCollector::new();
        let location = self.node.syntax.location();

        if let Some(TypeRef::Bad(bad)) = self.base_type() {
            diagnostics.extend(bad.errors());
        }

        if self.has_cyclic_base() {
            warn!(ty = %self.full_name(), "cyclic base type hierarchy");
            diagnostics.add(
                EdmError::new(
                    EdmErrorCode::BadCyclicEntity,
                    format!("the base type hierarchy of '{}' is cyclic", self.full_name()),
                )
                .at(location),
            );
        }

        let mut seen = FxHashSet::default();
        for property in self.declared_properties() {
            if !seen.insert(property.syntax().name()) {
                diagnostics.duplicate_name(
                    EdmErrorCode::DuplicatePropertyName,
                    &self.full_name(),
                    property.name(),
                    property.syntax().location(),
                );
            }
        }

        if self.node.kind == TypeKind::Entity {
            for name in self.node.syntax.key() {
                if self.find_property(name).is_none() {
                    diagnostics.add(
                        EdmError::new(
                            EdmErrorCode::BadUnresolvedPropertyInKey,
                            format!(
                                "the key property '{}' is not a property of '{}'",
                                name,
                                self.full_name()
                            ),
                        )
                        .at(location),
                    );
                }
            }

            let has_key = std::iter::once(*self)
                .chain(self.ancestors())
                .any(|ty| !ty.syntax().key().is_empty());
            if !has_key && !self.is_abstract() {
                diagnostics.add(
                    EdmError::new(
                        EdmErrorCode::KeyMissingOnEntityType,
                        format!("the entity type '{}' has no key defined", self.full_name()),
                    )
                    .at(location),
                );
            }
        }

        diagnostics.finish()
    }
}

impl PartialEq for StructuredType<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.id() == other.id()
    }
}

impl fmt::Debug for StructuredType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructuredType")
            .field(&self.full_name())
            .finish()
    }
}

impl EdmElement for StructuredType<'_> {
    fn element_id(&self) -> ElementId {
        ElementId::new(self.full_name())
    }
}

impl<'m> EdmCheckable for StructuredType<'m> {
    fn errors(&self) -> &[EdmError] {
        let node: &'m StructuredTypeNode = self.node;
        node.errors.get_or_compute(|| self.compute_errors())
    }
}

impl EdmVocabularyAnnotatable for StructuredType<'_> {
    fn vocabulary_annotations(&self) -> Vec<&VocabularyAnnotation> {
        self.model.find_vocabulary_annotations(&self.element_id())
    }
}

impl EdmNamedElement for StructuredType<'_> {
    fn name(&self) -> &str {
        self.node.syntax.name()
    }
}

impl EdmSchemaElement for StructuredType<'_> {
    fn namespace(&self) -> &str {
        self.context().namespace()
    }
}

impl EdmType for StructuredType<'_> {
    fn type_kind(&self) -> TypeKind {
        self.node.kind
    }
}

impl EdmStructuredType for StructuredType<'_> {
    fn is_abstract(&self) -> bool {
        self.node.syntax.is_abstract()
    }

    fn is_open(&self) -> bool {
        self.node.syntax.is_open()
    }

    fn declared_property_names(&self) -> Vec<&str> {
        self.node.properties.iter().map(|p| p.syntax.name()).collect()
    }
}

/// Iterator over the base types of a structured type.
pub struct Ancestors<'m> {
    current: Option<StructuredType<'m>>,
    visited: FxHashSet<TypeId>,
}

impl<'m> Iterator for Ancestors<'m> {
    type Item = StructuredType<'m>;

    fn next(&mut self) -> Option<Self::Item> {
        let base = self.current.take()?.base_structured_type()?;
        if !self.visited.insert(base.id()) {
            return None;
        }
        self.current = Some(base);
        Some(base)
    }
}

impl<'m> From<StructuredType<'m>> for SchemaType<'m> {
    fn from(ty: StructuredType<'m>) -> Self {
        SchemaType::Structured(ty)
    }
}

// ============================================================================
// PROPERTY VIEW
// ============================================================================

/// A property declared on a structured type.
#[derive(Clone, Copy)]
pub struct Property<'m> {
    model: &'m SemanticModel,
    owner: &'m StructuredTypeNode,
    node: &'m PropertyNode,
}

impl<'m> Property<'m> {
    /// The type this property is declared on.
    pub fn declaring_type(&self) -> StructuredType<'m> {
        StructuredType::new(self.model, self.owner)
    }

    pub fn syntax(&self) -> &'m CsdlProperty {
        &self.node.syntax
    }

    pub fn is_nullable(&self) -> bool {
        self.node.syntax.is_nullable()
    }

    /// The resolved property type.
    pub fn type_ref(&self) -> TypeRef<'m> {
        let node: &'m PropertyNode = self.node;
        self.resolved().view(self.model, node.syntax.is_nullable())
    }

    fn resolved(&self) -> &'m ResolvedType {
        let node: &'m PropertyNode = self.node;
        node.type_ref.get_or_compute(|| {
            let context = self.declaring_type().context();
            self.model.resolve_type_name(
                context,
                node.syntax.type_name(),
                node.syntax.location(),
            )
        })
    }
}

impl fmt::Debug for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.element_id()).finish()
    }
}

impl EdmElement for Property<'_> {
    fn element_id(&self) -> ElementId {
        ElementId::member(&self.declaring_type().full_name(), self.name())
    }
}

impl EdmCheckable for Property<'_> {
    fn errors(&self) -> &[EdmError] {
        self.resolved().errors()
    }
}

impl EdmVocabularyAnnotatable for Property<'_> {
    fn vocabulary_annotations(&self) -> Vec<&VocabularyAnnotation> {
        self.model.find_vocabulary_annotations(&self.element_id())
    }
}

impl EdmNamedElement for Property<'_> {
    fn name(&self) -> &str {
        self.node.syntax.name()
    }
}

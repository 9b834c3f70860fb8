//! The semantic model: schema contexts and the arena of semantic nodes.
//!
//! ## Design
//!
//! A [`SemanticModel`] owns every node. Nodes reference each other by
//! [`TypeId`] (an arena index), never by pointer, so back references such as
//! a property's declaring type are lookups rather than ownership edges.
//! Public access goes through `Copy` views that pair a node with the model:
//!
//! ```text
//! SemanticModel
//! ├── schemas: Vec<SchemaContext>             (one per <Schema>)
//! ├── types: Vec<TypeNode>                    (indexed by TypeId)
//! │     ├── Structured → properties: Vec<PropertyNode>
//! │     └── Enum       → members: Vec<EnumMemberNode>
//! ├── by_qualified_name: IndexMap<Name, TypeId> (declaration order)
//! ├── annotation_blocks: Vec<AnnotationsNode>
//! └── annotation_index: Cache<AnnotationIndex>  (cross-schema pass)
//! ```
//!
//! Derived properties are computed on first read and cached for the life of
//! the model (see [`Cache`]).

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::annotations::{AnnotationIndex, AnnotationsNode, VocabularyAnnotation};
use super::bad::BadType;
use super::cache::Cache;
use super::diagnostics::{EdmError, EdmErrorCode};
use super::element::{
    EdmCheckable, EdmElement, EdmNamedElement, EdmSchemaElement, EdmType,
    EdmVocabularyAnnotatable, ElementId,
};
use super::enums::{EnumMember, EnumType, EnumTypeNode};
use super::structured::{Property, StructuredType, StructuredTypeNode};
use super::types::{PrimitiveTypeKind, PrimitiveTypeReference, SchemaId, TypeId, TypeKind};
use crate::base::{Name, Position};
use crate::syntax::CsdlSchema;

// ============================================================================
// SCHEMA CONTEXT
// ============================================================================

/// The schema a node was declared in; names inside it are interpreted
/// relative to its namespace and alias.
#[derive(Clone, Debug)]
pub struct SchemaContext {
    id: SchemaId,
    syntax: Arc<CsdlSchema>,
}

impl SchemaContext {
    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn namespace(&self) -> &str {
        self.syntax.namespace()
    }

    pub fn alias(&self) -> Option<&str> {
        self.syntax.alias()
    }

    pub fn syntax(&self) -> &CsdlSchema {
        &self.syntax
    }
}

// ============================================================================
// TYPE NODES
// ============================================================================

pub(crate) enum TypeNode {
    Structured(StructuredTypeNode),
    Enum(EnumTypeNode),
}

impl TypeNode {
    fn name(&self) -> &str {
        match self {
            TypeNode::Structured(node) => node.syntax().name(),
            TypeNode::Enum(node) => node.syntax().name(),
        }
    }

    fn location(&self) -> Option<Position> {
        match self {
            TypeNode::Structured(node) => node.syntax().location(),
            TypeNode::Enum(node) => node.syntax().location(),
        }
    }

    pub(crate) fn kind(&self) -> TypeKind {
        match self {
            TypeNode::Structured(node) => node.kind(),
            TypeNode::Enum(_) => TypeKind::Enum,
        }
    }
}

/// A type reference as resolved inside a schema context.
#[derive(Debug)]
pub(crate) enum ResolvedType {
    Primitive(PrimitiveTypeKind),
    Schema(TypeId),
    Collection(Box<ResolvedType>),
    Bad(BadType),
}

impl ResolvedType {
    pub(crate) fn view<'m>(&'m self, model: &'m SemanticModel, nullable: bool) -> TypeRef<'m> {
        match self {
            ResolvedType::Primitive(kind) => {
                TypeRef::Primitive(PrimitiveTypeReference::new(*kind, nullable))
            }
            ResolvedType::Schema(id) => TypeRef::Schema(model.view_of(*id)),
            ResolvedType::Collection(element) => {
                TypeRef::Collection(Box::new(element.view(model, nullable)))
            }
            ResolvedType::Bad(bad) => TypeRef::Bad(bad),
        }
    }

    pub(crate) fn errors(&self) -> &[EdmError] {
        match self {
            ResolvedType::Collection(element) => element.errors(),
            ResolvedType::Bad(bad) => bad.errors(),
            ResolvedType::Primitive(_) | ResolvedType::Schema(_) => &[],
        }
    }
}

// ============================================================================
// PUBLIC VIEWS
// ============================================================================

/// A type declared in one of the model's schemas.
#[derive(Clone, Copy)]
pub enum SchemaType<'m> {
    Structured(StructuredType<'m>),
    Enum(EnumType<'m>),
}

impl<'m> SchemaType<'m> {
    pub fn id(&self) -> TypeId {
        match self {
            SchemaType::Structured(ty) => ty.id(),
            SchemaType::Enum(ty) => ty.id(),
        }
    }

    pub fn as_structured(&self) -> Option<StructuredType<'m>> {
        match self {
            SchemaType::Structured(ty) => Some(*ty),
            SchemaType::Enum(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumType<'m>> {
        match self {
            SchemaType::Enum(ty) => Some(*ty),
            SchemaType::Structured(_) => None,
        }
    }
}

impl PartialEq for SchemaType<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Debug for SchemaType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Structured(ty) => fmt::Debug::fmt(ty, f),
            SchemaType::Enum(ty) => fmt::Debug::fmt(ty, f),
        }
    }
}

impl EdmElement for SchemaType<'_> {
    fn element_id(&self) -> ElementId {
        match self {
            SchemaType::Structured(ty) => ty.element_id(),
            SchemaType::Enum(ty) => ty.element_id(),
        }
    }
}

impl EdmCheckable for SchemaType<'_> {
    fn errors(&self) -> &[EdmError] {
        match self {
            SchemaType::Structured(ty) => ty.errors(),
            SchemaType::Enum(ty) => ty.errors(),
        }
    }
}

impl EdmVocabularyAnnotatable for SchemaType<'_> {
    fn vocabulary_annotations(&self) -> Vec<&VocabularyAnnotation> {
        match self {
            SchemaType::Structured(ty) => ty.vocabulary_annotations(),
            SchemaType::Enum(ty) => ty.vocabulary_annotations(),
        }
    }
}

impl EdmNamedElement for SchemaType<'_> {
    fn name(&self) -> &str {
        match self {
            SchemaType::Structured(ty) => ty.name(),
            SchemaType::Enum(ty) => ty.name(),
        }
    }
}

impl EdmSchemaElement for SchemaType<'_> {
    fn namespace(&self) -> &str {
        match self {
            SchemaType::Structured(ty) => ty.namespace(),
            SchemaType::Enum(ty) => ty.namespace(),
        }
    }
}

impl EdmType for SchemaType<'_> {
    fn type_kind(&self) -> TypeKind {
        match self {
            SchemaType::Structured(ty) => ty.type_kind(),
            SchemaType::Enum(_) => TypeKind::Enum,
        }
    }
}

/// A resolved reference to any type: primitive, schema, collection or bad.
#[derive(Clone, Debug)]
pub enum TypeRef<'m> {
    Primitive(PrimitiveTypeReference),
    Schema(SchemaType<'m>),
    Collection(Box<TypeRef<'m>>),
    Bad(&'m BadType),
}

impl<'m> TypeRef<'m> {
    pub fn type_kind(&self) -> TypeKind {
        match self {
            TypeRef::Primitive(_) => TypeKind::Primitive,
            TypeRef::Schema(ty) => ty.type_kind(),
            TypeRef::Collection(_) => TypeKind::Collection,
            TypeRef::Bad(bad) => bad.type_kind(),
        }
    }

    /// Qualified name as written in CSDL, e.g. `Collection(NS.Address)`.
    pub fn full_name(&self) -> String {
        match self {
            TypeRef::Primitive(primitive) => primitive.kind.qualified_name(),
            TypeRef::Schema(ty) => ty.full_name(),
            TypeRef::Collection(element) => format!("Collection({})", element.full_name()),
            TypeRef::Bad(bad) => bad.full_name(),
        }
    }

    pub fn as_structured(&self) -> Option<StructuredType<'m>> {
        match self {
            TypeRef::Schema(ty) => ty.as_structured(),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumType<'m>> {
        match self {
            TypeRef::Schema(ty) => ty.as_enum(),
            _ => None,
        }
    }

    pub fn is_bad(&self) -> bool {
        match self {
            TypeRef::Bad(_) => true,
            TypeRef::Collection(element) => element.is_bad(),
            _ => false,
        }
    }
}

/// Any element of the model that can be targeted by annotations.
#[derive(Clone, Copy, Debug)]
pub enum Element<'m> {
    Type(SchemaType<'m>),
    Property(Property<'m>),
    EnumMember(EnumMember<'m>),
}

impl EdmElement for Element<'_> {
    fn element_id(&self) -> ElementId {
        match self {
            Element::Type(ty) => ty.element_id(),
            Element::Property(property) => property.element_id(),
            Element::EnumMember(member) => member.element_id(),
        }
    }
}

impl EdmCheckable for Element<'_> {
    fn errors(&self) -> &[EdmError] {
        match self {
            Element::Type(ty) => ty.errors(),
            Element::Property(property) => property.errors(),
            Element::EnumMember(member) => member.errors(),
        }
    }
}

impl EdmVocabularyAnnotatable for Element<'_> {
    fn vocabulary_annotations(&self) -> Vec<&VocabularyAnnotation> {
        match self {
            Element::Type(ty) => ty.vocabulary_annotations(),
            Element::Property(property) => property.vocabulary_annotations(),
            Element::EnumMember(member) => member.vocabulary_annotations(),
        }
    }
}

impl EdmNamedElement for Element<'_> {
    fn name(&self) -> &str {
        match self {
            Element::Type(ty) => ty.name(),
            Element::Property(property) => property.name(),
            Element::EnumMember(member) => member.name(),
        }
    }
}

// ============================================================================
// SEMANTIC MODEL
// ============================================================================

/// A model materialized from one or more CSDL schemas.
pub struct SemanticModel {
    schemas: Vec<SchemaContext>,
    types: Vec<TypeNode>,
    by_qualified_name: IndexMap<Name, TypeId>,
    /// Schema alias -> namespace.
    aliases: FxHashMap<Name, Name>,
    annotation_blocks: Vec<AnnotationsNode>,
    construction_errors: Vec<EdmError>,
    annotation_index: Cache<AnnotationIndex>,
}

impl SemanticModel {
    /// Materialize semantic nodes for every element of `schemas`.
    ///
    /// Nothing is resolved yet; resolution happens lazily on first access.
    /// Duplicate qualified names are recorded as diagnostics and the first
    /// declaration wins lookups.
    pub fn new(schemas: impl IntoIterator<Item = CsdlSchema>) -> Self {
        let mut model = Self {
            schemas: Vec::new(),
            types: Vec::new(),
            by_qualified_name: IndexMap::new(),
            aliases: FxHashMap::default(),
            annotation_blocks: Vec::new(),
            construction_errors: Vec::new(),
            annotation_index: Cache::new(),
        };

        for schema in schemas {
            model.add_schema(schema);
        }

        debug!(
            schemas = model.schemas.len(),
            types = model.types.len(),
            annotation_blocks = model.annotation_blocks.len(),
            duplicates = model.construction_errors.len(),
            "materialized semantic model"
        );
        model
    }

    fn add_schema(&mut self, schema: CsdlSchema) {
        let context = SchemaContext {
            id: SchemaId::new(self.schemas.len()),
            syntax: Arc::new(schema),
        };

        if let Some(alias) = context.alias() {
            self.aliases
                .entry(Name::from(alias))
                .or_insert_with(|| Name::from(context.namespace()));
        }

        let syntax = Arc::clone(&context.syntax);
        for entity_type in syntax.entity_types() {
            let id = TypeId::new(self.types.len());
            self.add_type(
                &context,
                TypeNode::Structured(StructuredTypeNode::new(
                    id,
                    context.id,
                    TypeKind::Entity,
                    Arc::clone(entity_type),
                )),
            );
        }
        for complex_type in syntax.complex_types() {
            let id = TypeId::new(self.types.len());
            self.add_type(
                &context,
                TypeNode::Structured(StructuredTypeNode::new(
                    id,
                    context.id,
                    TypeKind::Complex,
                    Arc::clone(complex_type),
                )),
            );
        }
        for enum_type in syntax.enum_types() {
            let id = TypeId::new(self.types.len());
            self.add_type(
                &context,
                TypeNode::Enum(EnumTypeNode::new(id, context.id, Arc::clone(enum_type))),
            );
        }
        for block in syntax.out_of_line_annotations() {
            self.annotation_blocks
                .push(AnnotationsNode::new(context.clone(), Arc::clone(block)));
        }

        self.schemas.push(context);
    }

    fn add_type(&mut self, context: &SchemaContext, node: TypeNode) {
        let id = TypeId::new(self.types.len());
        let full_name = Name::from(format!("{}.{}", context.namespace(), node.name()));
        if self.by_qualified_name.contains_key(&full_name) {
            self.construction_errors.push(
                EdmError::new(
                    EdmErrorCode::DuplicateSchemaElementName,
                    format!("'{}' is already defined in the model", full_name),
                )
                .at(node.location()),
            );
        } else {
            self.by_qualified_name.insert(full_name, id);
        }
        self.types.push(node);
    }

    // ------------------------------------------------------------------------
    // Schemas and types
    // ------------------------------------------------------------------------

    pub fn schemas(&self) -> &[SchemaContext] {
        &self.schemas
    }

    pub fn context(&self, id: SchemaId) -> &SchemaContext {
        &self.schemas[id.index()]
    }

    /// The type with the given id, or `None` for an id from another model.
    pub fn schema_type(&self, id: TypeId) -> Option<SchemaType<'_>> {
        (id.index() < self.types.len()).then(|| self.view_of(id))
    }

    /// All declared types in declaration order, duplicates included.
    pub fn types(&self) -> impl Iterator<Item = SchemaType<'_>> {
        (0..self.types.len()).map(|index| self.view_of(TypeId::new(index)))
    }

    /// Look up a type by qualified name (`Namespace.Name` or `Alias.Name`).
    pub fn find_type(&self, qualified_name: &str) -> Option<SchemaType<'_>> {
        self.lookup_qualified(None, qualified_name)
            .map(|id| self.view_of(id))
    }

    /// Every type whose qualified name matches `name` ignoring ASCII case.
    pub fn find_types_ignore_case(&self, name: &str) -> Vec<SchemaType<'_>> {
        let expanded = self.expand_alias(None, name, true);
        let wanted = expanded.as_deref().unwrap_or(name);
        self.by_qualified_name
            .iter()
            .filter(|(full_name, _)| full_name.eq_ignore_ascii_case(wanted))
            .map(|(_, id)| self.view_of(*id))
            .collect()
    }

    /// Look up the element a target path names, e.g. `NS.Person/Name`.
    pub fn find_element(&self, target_path: &str) -> Option<Element<'_>> {
        self.resolve_target(None, target_path)
    }

    /// Every type, property and enum member in declaration order.
    pub fn elements(&self) -> Vec<Element<'_>> {
        let mut elements = Vec::new();
        for ty in self.types() {
            elements.push(Element::Type(ty));
            match ty {
                SchemaType::Structured(structured) => {
                    elements.extend(structured.declared_properties().map(Element::Property));
                }
                SchemaType::Enum(enum_type) => {
                    elements.extend(enum_type.members().map(Element::EnumMember));
                }
            }
        }
        elements
    }

    /// Diagnostics raised while materializing the model (duplicate names).
    pub fn construction_errors(&self) -> &[EdmError] {
        &self.construction_errors
    }

    // ------------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------------

    /// Out-of-line `<Annotations>` blocks, unresolved, in declaration order.
    pub fn annotation_blocks(&self) -> &[AnnotationsNode] {
        &self.annotation_blocks
    }

    /// Every vocabulary annotation in the model, inline ones first.
    pub fn vocabulary_annotations(&self) -> &[VocabularyAnnotation] {
        self.annotation_index().annotations()
    }

    /// Annotations that target `target`, inline ones first.
    pub fn find_vocabulary_annotations(&self, target: &ElementId) -> Vec<&VocabularyAnnotation> {
        self.annotation_index().find(target)
    }

    fn annotation_index(&self) -> &AnnotationIndex {
        self.annotation_index
            .get_or_compute(|| AnnotationIndex::build(self))
    }

    // ------------------------------------------------------------------------
    // Crate-internal resolution
    // ------------------------------------------------------------------------

    pub(crate) fn type_node(&self, id: TypeId) -> &TypeNode {
        &self.types[id.index()]
    }

    pub(crate) fn view_of(&self, id: TypeId) -> SchemaType<'_> {
        match self.type_node(id) {
            TypeNode::Structured(node) => SchemaType::Structured(StructuredType::new(self, node)),
            TypeNode::Enum(node) => SchemaType::Enum(EnumType::new(self, node)),
        }
    }

    /// Rewrite `Alias.Name` into `Namespace.Name`.
    ///
    /// The context's own alias is tried before the model-wide aliases.
    pub(crate) fn expand_alias(
        &self,
        context: Option<&SchemaContext>,
        name: &str,
        ignore_case: bool,
    ) -> Option<String> {
        let (prefix, local) = name.rsplit_once('.')?;
        let matches = |alias: &str| {
            if ignore_case {
                alias.eq_ignore_ascii_case(prefix)
            } else {
                alias == prefix
            }
        };

        let namespace = context
            .filter(|context| context.alias().is_some_and(matches))
            .map(|context| context.namespace())
            .or_else(|| {
                self.aliases
                    .iter()
                    .find(|(alias, _)| matches(alias))
                    .map(|(_, namespace)| namespace.as_str())
            })?;
        Some(format!("{}.{}", namespace, local))
    }

    pub(crate) fn lookup_qualified(
        &self,
        context: Option<&SchemaContext>,
        name: &str,
    ) -> Option<TypeId> {
        if let Some(id) = self.by_qualified_name.get(name) {
            return Some(*id);
        }
        let expanded = self.expand_alias(context, name, false)?;
        self.by_qualified_name.get(expanded.as_str()).copied()
    }

    /// Resolve a CSDL type name (`Edm.*`, qualified, or `Collection(...)`).
    pub(crate) fn resolve_type_name(
        &self,
        context: &SchemaContext,
        name: &str,
        location: Option<Position>,
    ) -> ResolvedType {
        if let Some(element) = name
            .strip_prefix("Collection(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return ResolvedType::Collection(Box::new(self.resolve_type_name(
                context,
                element.trim(),
                location,
            )));
        }
        if let Some(kind) = PrimitiveTypeKind::from_qualified_name(name) {
            return ResolvedType::Primitive(kind);
        }
        match self.lookup_qualified(Some(context), name) {
            Some(id) => ResolvedType::Schema(id),
            None => ResolvedType::Bad(BadType::new(
                name,
                vec![EdmError::unresolved_type(name, location)],
            )),
        }
    }

    /// Resolve `Type`, `Type/Property` or `Enum/Member` relative to `context`.
    pub(crate) fn resolve_target(
        &self,
        context: Option<&SchemaContext>,
        target_path: &str,
    ) -> Option<Element<'_>> {
        let (type_name, member) = match target_path.split_once('/') {
            Some((type_name, member)) => (type_name, Some(member)),
            None => (target_path, None),
        };
        let ty = self.view_of(self.lookup_qualified(context, type_name)?);

        let Some(member) = member else {
            return Some(Element::Type(ty));
        };
        match ty {
            SchemaType::Structured(structured) => {
                structured.find_property(member).map(Element::Property)
            }
            SchemaType::Enum(enum_type) => enum_type.find_member(member).map(Element::EnumMember),
        }
    }
}

impl fmt::Debug for SemanticModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticModel")
            .field("schemas", &self.schemas.len())
            .field("types", &self.by_qualified_name.keys().collect::<Vec<_>>())
            .field("annotation_blocks", &self.annotation_blocks.len())
            .finish()
    }
}

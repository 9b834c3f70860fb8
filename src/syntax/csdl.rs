//! CSDL syntax trees as handed over by the upstream metadata reader.
//!
//! These types are plain, immutable-once-built records. The semantic layer
//! never mutates them; it shares them through `Arc` so a semantic node can
//! keep a handle to the syntax it was built from.
//!
//! ```text
//! CsdlSchema (Namespace, Alias)
//! ├── EntityType / ComplexType  → CsdlStructuredType → CsdlProperty
//! ├── EnumType                  → CsdlEnumType → CsdlEnumMember
//! └── Annotations (Target)      → CsdlAnnotations → CsdlAnnotation
//! ```

use std::sync::Arc;

use crate::base::{Name, Position};

// ============================================================================
// SCHEMA
// ============================================================================

/// A `<Schema>` element: the unit that owns a namespace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsdlSchema {
    namespace: Name,
    alias: Option<Name>,
    entity_types: Vec<Arc<CsdlStructuredType>>,
    complex_types: Vec<Arc<CsdlStructuredType>>,
    enum_types: Vec<Arc<CsdlEnumType>>,
    out_of_line_annotations: Vec<Arc<CsdlAnnotations>>,
    location: Option<Position>,
}

impl CsdlSchema {
    pub fn new(namespace: impl Into<Name>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<Name>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_entity_type(mut self, entity_type: CsdlStructuredType) -> Self {
        self.entity_types.push(Arc::new(entity_type));
        self
    }

    pub fn with_complex_type(mut self, complex_type: CsdlStructuredType) -> Self {
        self.complex_types.push(Arc::new(complex_type));
        self
    }

    pub fn with_enum_type(mut self, enum_type: CsdlEnumType) -> Self {
        self.enum_types.push(Arc::new(enum_type));
        self
    }

    /// Add an out-of-line `<Annotations Target="...">` block.
    pub fn with_annotations(mut self, annotations: CsdlAnnotations) -> Self {
        self.out_of_line_annotations.push(Arc::new(annotations));
        self
    }

    pub fn with_location(mut self, location: Position) -> Self {
        self.location = Some(location);
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn entity_types(&self) -> &[Arc<CsdlStructuredType>] {
        &self.entity_types
    }

    pub fn complex_types(&self) -> &[Arc<CsdlStructuredType>] {
        &self.complex_types
    }

    pub fn enum_types(&self) -> &[Arc<CsdlEnumType>] {
        &self.enum_types
    }

    pub fn out_of_line_annotations(&self) -> &[Arc<CsdlAnnotations>] {
        &self.out_of_line_annotations
    }

    pub fn location(&self) -> Option<Position> {
        self.location
    }
}

// ============================================================================
// STRUCTURED TYPES
// ============================================================================

/// An `<EntityType>` or `<ComplexType>` declaration.
///
/// Whether it is an entity or complex type is decided by the schema list it
/// was added to. `key` is only meaningful for entity types.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsdlStructuredType {
    name: Name,
    base_type: Option<Name>,
    is_abstract: bool,
    is_open: bool,
    key: Vec<Name>,
    properties: Vec<Arc<CsdlProperty>>,
    annotations: Vec<CsdlAnnotation>,
    location: Option<Position>,
}

impl CsdlStructuredType {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_base_type(mut self, base_type: impl Into<Name>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn with_key<I, S>(mut self, key: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Name>,
    {
        self.key = key.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, property: CsdlProperty) -> Self {
        self.properties.push(Arc::new(property));
        self
    }

    pub fn with_annotation(mut self, annotation: CsdlAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_location(mut self, location: Position) -> Self {
        self.location = Some(location);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_type(&self) -> Option<&str> {
        self.base_type.as_deref()
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn key(&self) -> &[Name] {
        &self.key
    }

    pub fn properties(&self) -> &[Arc<CsdlProperty>] {
        &self.properties
    }

    pub fn annotations(&self) -> &[CsdlAnnotation] {
        &self.annotations
    }

    pub fn location(&self) -> Option<Position> {
        self.location
    }
}

/// A structural `<Property>`.
#[derive(Clone, Debug, PartialEq)]
pub struct CsdlProperty {
    name: Name,
    type_name: Name,
    nullable: bool,
    annotations: Vec<CsdlAnnotation>,
    location: Option<Position>,
}

impl CsdlProperty {
    /// `type_name` is the raw `Type` attribute, e.g. `Edm.String`,
    /// `NS.Address` or `Collection(NS.Address)`.
    pub fn new(name: impl Into<Name>, type_name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable: true,
            annotations: Vec::new(),
            location: None,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_annotation(mut self, annotation: CsdlAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_location(mut self, location: Position) -> Self {
        self.location = Some(location);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn annotations(&self) -> &[CsdlAnnotation] {
        &self.annotations
    }

    pub fn location(&self) -> Option<Position> {
        self.location
    }
}

// ============================================================================
// ENUM TYPES
// ============================================================================

/// An `<EnumType>` declaration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsdlEnumType {
    name: Name,
    underlying_type: Option<Name>,
    is_flags: bool,
    members: Vec<Arc<CsdlEnumMember>>,
    annotations: Vec<CsdlAnnotation>,
    location: Option<Position>,
}

impl CsdlEnumType {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_underlying_type(mut self, underlying_type: impl Into<Name>) -> Self {
        self.underlying_type = Some(underlying_type.into());
        self
    }

    pub fn with_flags(mut self, is_flags: bool) -> Self {
        self.is_flags = is_flags;
        self
    }

    pub fn with_member(mut self, member: CsdlEnumMember) -> Self {
        self.members.push(Arc::new(member));
        self
    }

    pub fn with_annotation(mut self, annotation: CsdlAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_location(mut self, location: Position) -> Self {
        self.location = Some(location);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw `UnderlyingType` attribute, if present.
    pub fn underlying_type(&self) -> Option<&str> {
        self.underlying_type.as_deref()
    }

    pub fn is_flags(&self) -> bool {
        self.is_flags
    }

    pub fn members(&self) -> &[Arc<CsdlEnumMember>] {
        &self.members
    }

    pub fn annotations(&self) -> &[CsdlAnnotation] {
        &self.annotations
    }

    pub fn location(&self) -> Option<Position> {
        self.location
    }
}

/// An enum `<Member>`; `value` is `None` when the `Value` attribute is omitted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsdlEnumMember {
    name: Name,
    value: Option<i64>,
    annotations: Vec<CsdlAnnotation>,
    location: Option<Position>,
}

impl CsdlEnumMember {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_annotation(mut self, annotation: CsdlAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_location(mut self, location: Position) -> Self {
        self.location = Some(location);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }

    pub fn annotations(&self) -> &[CsdlAnnotation] {
        &self.annotations
    }

    pub fn location(&self) -> Option<Position> {
        self.location
    }
}

// ============================================================================
// ANNOTATIONS
// ============================================================================

/// An out-of-line `<Annotations Target="...">` block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsdlAnnotations {
    target: Name,
    qualifier: Option<Name>,
    annotations: Vec<CsdlAnnotation>,
    location: Option<Position>,
}

impl CsdlAnnotations {
    pub fn new(target: impl Into<Name>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<Name>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    pub fn with_annotation(mut self, annotation: CsdlAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_location(mut self, location: Position) -> Self {
        self.location = Some(location);
        self
    }

    /// The raw target path, e.g. `NS.Person/Name`.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Qualifier applied to every annotation in the block that has none of its own.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn annotations(&self) -> &[CsdlAnnotation] {
        &self.annotations
    }

    pub fn location(&self) -> Option<Position> {
        self.location
    }
}

/// A single `<Annotation Term="...">` application.
#[derive(Clone, Debug, PartialEq)]
pub struct CsdlAnnotation {
    term: Name,
    qualifier: Option<Name>,
    value: CsdlExpression,
    location: Option<Position>,
}

impl CsdlAnnotation {
    pub fn new(term: impl Into<Name>, value: CsdlExpression) -> Self {
        Self {
            term: term.into(),
            qualifier: None,
            value,
            location: None,
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<Name>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    pub fn with_location(mut self, location: Position) -> Self {
        self.location = Some(location);
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn value(&self) -> &CsdlExpression {
        &self.value
    }

    pub fn location(&self) -> Option<Position> {
        self.location
    }
}

/// Constant and path expressions usable as annotation values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CsdlExpression {
    Null,
    Bool(bool),
    Int(i64),
    String(Name),
    EnumMember(Name),
    Path(Name),
}

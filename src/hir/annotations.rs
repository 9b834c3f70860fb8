//! Vocabulary annotations.
//!
//! An out-of-line `<Annotations Target="...">` block becomes an
//! [`AnnotationsNode`] when its schema is materialized. The node only records
//! its schema context and the raw block: the target may live in a schema that
//! is added later, so targets are resolved in a separate pass over the whole
//! model ([`AnnotationIndex::build`]), the first time annotations are queried.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::bad::BadElement;
use super::diagnostics::EdmError;
use super::element::{EdmCheckable, EdmElement, ElementId};
use super::model::{SchemaContext, SchemaType, SemanticModel};
use super::types::SchemaId;
use crate::base::{Name, Position};
use crate::syntax::{CsdlAnnotation, CsdlAnnotations, CsdlExpression};

// ============================================================================
// ANNOTATIONS BLOCK
// ============================================================================

/// An out-of-line annotations block bound to its schema context.
#[derive(Clone, Debug)]
pub struct AnnotationsNode {
    context: SchemaContext,
    syntax: Arc<CsdlAnnotations>,
}

impl AnnotationsNode {
    pub fn new(context: SchemaContext, syntax: Arc<CsdlAnnotations>) -> Self {
        Self { context, syntax }
    }

    /// The schema the block was declared in.
    pub fn context(&self) -> &SchemaContext {
        &self.context
    }

    /// The raw block: target path, qualifier and term applications.
    pub fn annotations(&self) -> &CsdlAnnotations {
        &self.syntax
    }
}

// ============================================================================
// VOCABULARY ANNOTATION
// ============================================================================

/// What an annotation applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnotationTarget {
    Element(ElementId),
    /// The target path did not resolve.
    Bad(BadElement),
}

impl AnnotationTarget {
    pub fn element_id(&self) -> ElementId {
        match self {
            AnnotationTarget::Element(id) => id.clone(),
            AnnotationTarget::Bad(bad) => bad.element_id(),
        }
    }
}

/// One term applied to one element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyAnnotation {
    target: AnnotationTarget,
    term: Name,
    qualifier: Option<Name>,
    value: CsdlExpression,
    schema: SchemaId,
    location: Option<Position>,
}

impl VocabularyAnnotation {
    fn new(
        target: AnnotationTarget,
        annotation: &CsdlAnnotation,
        block_qualifier: Option<&str>,
        schema: SchemaId,
    ) -> Self {
        Self {
            target,
            term: Name::from(annotation.term()),
            qualifier: annotation.qualifier().or(block_qualifier).map(Name::from),
            value: annotation.value().clone(),
            schema,
            location: annotation.location(),
        }
    }

    pub fn target(&self) -> &AnnotationTarget {
        &self.target
    }

    /// Qualified term name, e.g. `Org.OData.Core.V1.Description`.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn value(&self) -> &CsdlExpression {
        &self.value
    }

    /// The schema the annotation was written in.
    pub fn schema(&self) -> SchemaId {
        self.schema
    }

    pub fn location(&self) -> Option<Position> {
        self.location
    }
}

impl fmt::Display for VocabularyAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.target.element_id(), self.term)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "#{}", qualifier)?;
        }
        Ok(())
    }
}

impl EdmElement for VocabularyAnnotation {
    fn element_id(&self) -> ElementId {
        ElementId::new(self.to_string())
    }
}

impl EdmCheckable for VocabularyAnnotation {
    fn errors(&self) -> &[EdmError] {
        match &self.target {
            AnnotationTarget::Element(_) => &[],
            AnnotationTarget::Bad(bad) => bad.errors(),
        }
    }
}

// ============================================================================
// INDEX
// ============================================================================

/// Every annotation in a model, grouped by target.
#[derive(Debug, Default)]
pub(crate) struct AnnotationIndex {
    annotations: Vec<VocabularyAnnotation>,
    by_target: FxHashMap<ElementId, Vec<usize>>,
}

impl AnnotationIndex {
    /// Collect inline annotations, then resolve every out-of-line block.
    pub(crate) fn build(model: &SemanticModel) -> Self {
        let mut index = Self::default();

        for ty in model.types() {
            index.collect_inline(ty);
        }

        for block in model.annotation_blocks() {
            let syntax = block.annotations();
            let target = match model.resolve_target(Some(block.context()), syntax.target()) {
                Some(element) => AnnotationTarget::Element(element.element_id()),
                None => {
                    trace!(target = syntax.target(), "unresolved annotation target");
                    AnnotationTarget::Bad(BadElement::new(vec![EdmError::unresolved_target(
                        syntax.target(),
                        syntax.location(),
                    )]))
                }
            };
            for annotation in syntax.annotations() {
                index.push(VocabularyAnnotation::new(
                    target.clone(),
                    annotation,
                    syntax.qualifier(),
                    block.context().id(),
                ));
            }
        }

        debug!(
            annotations = index.annotations.len(),
            targets = index.by_target.len(),
            "indexed vocabulary annotations"
        );
        index
    }

    fn collect_inline(&mut self, ty: SchemaType<'_>) {
        let schema = match ty {
            SchemaType::Structured(structured) => structured.context().id(),
            SchemaType::Enum(enum_type) => enum_type.context().id(),
        };
        let push_all = |index: &mut Self, id: ElementId, annotations: &[CsdlAnnotation]| {
            for annotation in annotations {
                index.push(VocabularyAnnotation::new(
                    AnnotationTarget::Element(id.clone()),
                    annotation,
                    None,
                    schema,
                ));
            }
        };

        match ty {
            SchemaType::Structured(structured) => {
                push_all(self, structured.element_id(), structured.syntax().annotations());
                for property in structured.declared_properties() {
                    push_all(self, property.element_id(), property.syntax().annotations());
                }
            }
            SchemaType::Enum(enum_type) => {
                push_all(self, enum_type.element_id(), enum_type.syntax().annotations());
                for member in enum_type.members() {
                    push_all(self, member.element_id(), member.syntax().annotations());
                }
            }
        }
    }

    fn push(&mut self, annotation: VocabularyAnnotation) {
        // Bad targets are kept in the flat list for validation but are not
        // findable by id.
        if let AnnotationTarget::Element(id) = annotation.target() {
            self.by_target
                .entry(id.clone())
                .or_default()
                .push(self.annotations.len());
        }
        self.annotations.push(annotation);
    }

    pub(crate) fn annotations(&self) -> &[VocabularyAnnotation] {
        &self.annotations
    }

    pub(crate) fn find(&self, target: &ElementId) -> Vec<&VocabularyAnnotation> {
        self.by_target
            .get(target)
            .map(|indices| indices.iter().map(|&i| &self.annotations[i]).collect())
            .unwrap_or_default()
    }
}

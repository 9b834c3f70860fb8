//! Enum types and the resolution of enum member values.
//!
//! A member's value is the explicit `Value` from its syntax when present.
//! Otherwise it is auto-assigned: one more than the previous member's value,
//! starting at zero for the first member. The value is always typed to the
//! declaring enum's underlying integer type.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::annotations::VocabularyAnnotation;
use super::cache::Cache;
use super::diagnostics::{DiagnosticCollector, EdmError, EdmErrorCode};
use super::element::{
    EdmCheckable, EdmElement, EdmNamedElement, EdmSchemaElement, EdmType,
    EdmVocabularyAnnotatable, ElementId,
};
use super::model::{SchemaContext, SchemaType, SemanticModel};
use super::types::{PrimitiveTypeKind, PrimitiveTypeReference, SchemaId, TypeId, TypeKind};
use super::values::EdmIntegerConstant;
use crate::syntax::{CsdlEnumMember, CsdlEnumType};

/// Underlying type used when none is declared, or the declared one is invalid.
pub const DEFAULT_UNDERLYING_TYPE: PrimitiveTypeKind = PrimitiveTypeKind::Int32;

// ============================================================================
// NODES
// ============================================================================

pub(crate) struct EnumTypeNode {
    id: TypeId,
    schema: SchemaId,
    syntax: Arc<CsdlEnumType>,
    members: Vec<EnumMemberNode>,
    underlying_type: Cache<PrimitiveTypeKind>,
    errors: Cache<Vec<EdmError>>,
}

impl EnumTypeNode {
    pub(crate) fn new(id: TypeId, schema: SchemaId, syntax: Arc<CsdlEnumType>) -> Self {
        let members = syntax
            .members()
            .iter()
            .enumerate()
            .map(|(index, member)| EnumMemberNode {
                index,
                syntax: Arc::clone(member),
                value: Cache::new(),
                errors: Cache::new(),
            })
            .collect();
        Self {
            id,
            schema,
            syntax,
            members,
            underlying_type: Cache::new(),
            errors: Cache::new(),
        }
    }

    pub(crate) fn syntax(&self) -> &CsdlEnumType {
        &self.syntax
    }

    fn underlying_type(&self) -> PrimitiveTypeKind {
        *self.underlying_type.get_or_compute(|| {
            self.syntax
                .underlying_type()
                .and_then(PrimitiveTypeKind::from_qualified_name)
                .filter(|kind| kind.is_integral())
                .unwrap_or(DEFAULT_UNDERLYING_TYPE)
        })
    }
}

pub(crate) struct EnumMemberNode {
    index: usize,
    syntax: Arc<CsdlEnumMember>,
    value: Cache<ResolvedValue>,
    errors: Cache<Vec<EdmError>>,
}

#[derive(Clone, Copy, Debug)]
struct ResolvedValue {
    constant: EdmIntegerConstant,
    /// Auto-assignment ran past `i64::MAX` and was saturated.
    overflowed: bool,
}

/// Value of the member at `index` when it has no explicit value.
///
/// Walks back to the nearest member with an explicit value `v` at `j` and
/// returns `v + (index - j)`, or `index` when no earlier member has one.
/// `None` when the result does not fit in an `i64`.
fn auto_value(members: &[EnumMemberNode], index: usize) -> Option<i64> {
    let explicit = members[..index]
        .iter()
        .rev()
        .find_map(|member| member.syntax.value().map(|value| (member.index, value)));
    match explicit {
        Some((position, value)) => {
            let offset = i64::try_from(index - position).ok()?;
            value.checked_add(offset)
        }
        None => i64::try_from(index).ok(),
    }
}

// ============================================================================
// ENUM TYPE VIEW
// ============================================================================

/// An enum type of a [`SemanticModel`].
#[derive(Clone, Copy)]
pub struct EnumType<'m> {
    model: &'m SemanticModel,
    node: &'m EnumTypeNode,
}

impl<'m> EnumType<'m> {
    pub(crate) fn new(model: &'m SemanticModel, node: &'m EnumTypeNode) -> Self {
        Self { model, node }
    }

    pub fn id(&self) -> TypeId {
        self.node.id
    }

    pub fn context(&self) -> &'m SchemaContext {
        self.model.context(self.node.schema)
    }

    pub fn syntax(&self) -> &'m CsdlEnumType {
        &self.node.syntax
    }

    /// The integer type member values are represented in.
    pub fn underlying_type(&self) -> PrimitiveTypeKind {
        self.node.underlying_type()
    }

    pub fn is_flags(&self) -> bool {
        self.node.syntax.is_flags()
    }

    /// Members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = EnumMember<'m>> + use<'m> {
        let model = self.model;
        let declaring = self.node;
        declaring
            .members
            .iter()
            .map(move |node| EnumMember {
                model,
                declaring,
                node,
            })
    }

    pub fn find_member(&self, name: &str) -> Option<EnumMember<'m>> {
        self.members().find(|member| member.name() == name)
    }

    fn compute_errors(&self) -> Vec<EdmError> {
        let mut diagnostics = DiagnosticCollector::new();
        let location = self.node.syntax.location();

        if let Some(declared) = self.node.syntax.underlying_type() {
            let valid = PrimitiveTypeKind::from_qualified_name(declared)
                .is_some_and(PrimitiveTypeKind::is_integral);
            if !valid {
                diagnostics.add(
                    EdmError::new(
                        EdmErrorCode::EnumMustHaveIntegerUnderlyingType,
                        format!(
                            "the underlying type '{}' of '{}' is not an integer type",
                            declared,
                            self.full_name()
                        ),
                    )
                    .at(location),
                );
            }
        }

        let mut seen = FxHashSet::default();
        for member in self.members() {
            if !seen.insert(member.syntax().name()) {
                diagnostics.duplicate_name(
                    EdmErrorCode::DuplicateEnumMemberName,
                    &self.full_name(),
                    member.name(),
                    member.syntax().location(),
                );
            }
        }

        diagnostics.finish()
    }
}

impl PartialEq for EnumType<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.id() == other.id()
    }
}

impl fmt::Debug for EnumType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnumType").field(&self.full_name()).finish()
    }
}

impl EdmElement for EnumType<'_> {
    fn element_id(&self) -> ElementId {
        ElementId::new(self.full_name())
    }
}

impl<'m> EdmCheckable for EnumType<'m> {
    fn errors(&self) -> &[EdmError] {
        let node: &'m EnumTypeNode = self.node;
        node.errors.get_or_compute(|| self.compute_errors())
    }
}

impl EdmVocabularyAnnotatable for EnumType<'_> {
    fn vocabulary_annotations(&self) -> Vec<&VocabularyAnnotation> {
        self.model.find_vocabulary_annotations(&self.element_id())
    }
}

impl EdmNamedElement for EnumType<'_> {
    fn name(&self) -> &str {
        self.node.syntax.name()
    }
}

impl EdmSchemaElement for EnumType<'_> {
    fn namespace(&self) -> &str {
        self.context().namespace()
    }
}

impl EdmType for EnumType<'_> {
    fn type_kind(&self) -> TypeKind {
        TypeKind::Enum
    }
}

impl<'m> From<EnumType<'m>> for SchemaType<'m> {
    fn from(ty: EnumType<'m>) -> Self {
        SchemaType::Enum(ty)
    }
}

// ============================================================================
// ENUM MEMBER VIEW
// ============================================================================

/// A member of an enum type.
#[derive(Clone, Copy)]
pub struct EnumMember<'m> {
    model: &'m SemanticModel,
    declaring: &'m EnumTypeNode,
    node: &'m EnumMemberNode,
}

impl<'m> EnumMember<'m> {
    /// The enum type this member belongs to.
    pub fn declaring_type(&self) -> EnumType<'m> {
        EnumType::new(self.model, self.declaring)
    }

    pub fn syntax(&self) -> &'m CsdlEnumMember {
        &self.node.syntax
    }

    /// Position of the member within its declaring type.
    pub fn index(&self) -> usize {
        self.node.index
    }

    /// The member's value, typed to the declaring enum's underlying type.
    ///
    /// Computed on first access. Never absent: members without an explicit
    /// value are auto-assigned.
    pub fn value(&self) -> EdmIntegerConstant {
        self.resolved().constant
    }

    /// True when the value was not written in the schema.
    pub fn is_auto_assigned(&self) -> bool {
        self.node.syntax.value().is_none()
    }

    fn resolved(&self) -> ResolvedValue {
        let declaring = self.declaring;
        let node = self.node;
        *node.value.get_or_compute(|| {
            let type_reference =
                PrimitiveTypeReference::new(declaring.underlying_type(), false);
            let (value, overflowed) = match node.syntax.value() {
                Some(explicit) => (explicit, false),
                None => match auto_value(&declaring.members, node.index) {
                    Some(auto) => (auto, false),
                    None => (i64::MAX, true),
                },
            };
            ResolvedValue {
                constant: EdmIntegerConstant::new(type_reference, value),
                overflowed,
            }
        })
    }

    fn compute_errors(&self) -> Vec<EdmError> {
        let mut diagnostics = DiagnosticCollector::new();
        let location = self.node.syntax.location();
        let resolved = self.resolved();
        let owner = self.declaring_type().full_name();

        if self.declaring.syntax.is_flags() && self.is_auto_assigned() {
            diagnostics.add(
                EdmError::new(
                    EdmErrorCode::EnumMemberMustHaveValue,
                    format!(
                        "the member '{}' of flags enum '{}' must have an explicit value",
                        self.name(),
                        owner
                    ),
                )
                .at(location),
            );
        }

        if resolved.overflowed || !resolved.constant.fits() {
            diagnostics.add(
                EdmError::new(
                    EdmErrorCode::EnumMemberValueOutOfRange,
                    format!(
                        "the value of member '{}' of '{}' is out of range for {}",
                        self.name(),
                        owner,
                        resolved.constant.kind()
                    ),
                )
                .at(location),
            );
        }

        diagnostics.finish()
    }
}

impl fmt::Debug for EnumMember<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumMember")
            .field("id", &self.element_id())
            .field("value", &self.value().value())
            .finish()
    }
}

impl EdmElement for EnumMember<'_> {
    fn element_id(&self) -> ElementId {
        ElementId::member(&self.declaring_type().full_name(), self.name())
    }
}

impl<'m> EdmCheckable for EnumMember<'m> {
    fn errors(&self) -> &[EdmError] {
        let node: &'m EnumMemberNode = self.node;
        node.errors.get_or_compute(|| self.compute_errors())
    }
}

impl EdmVocabularyAnnotatable for EnumMember<'_> {
    fn vocabulary_annotations(&self) -> Vec<&VocabularyAnnotation> {
        self.model.find_vocabulary_annotations(&self.element_id())
    }
}

impl EdmNamedElement for EnumMember<'_> {
    fn name(&self) -> &str {
        self.node.syntax.name()
    }
}

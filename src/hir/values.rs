//! Primitive literal values that belong to the type system.

use super::types::{PrimitiveTypeKind, PrimitiveTypeReference};

/// An integer literal typed to a primitive integral type.
///
/// Enum member values are the only data values this crate produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdmIntegerConstant {
    type_reference: PrimitiveTypeReference,
    value: i64,
}

impl EdmIntegerConstant {
    pub fn new(type_reference: PrimitiveTypeReference, value: i64) -> Self {
        Self {
            type_reference,
            value,
        }
    }

    /// The type the literal is represented in.
    pub fn type_reference(&self) -> PrimitiveTypeReference {
        self.type_reference
    }

    pub fn kind(&self) -> PrimitiveTypeKind {
        self.type_reference.kind
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// True when the value lies inside the range of its representation type.
    pub fn fits(&self) -> bool {
        self.type_reference
            .kind
            .integral_range()
            .is_some_and(|range| range.contains(&self.value))
    }
}

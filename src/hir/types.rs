//! Type system primitives: type kinds, primitive types, arena ids.

use std::fmt;
use std::ops::RangeInclusive;

/// Index of a schema type in the model arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a schema context in the model arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(pub(crate) u32);

impl SchemaId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Unknown or invalid, as reported by bad types.
    None,
    Primitive,
    Entity,
    Complex,
    Enum,
    Collection,
}

impl TypeKind {
    pub fn is_structured(self) -> bool {
        matches!(self, Self::Entity | Self::Complex)
    }
}

/// The `Edm.*` primitive types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveTypeKind {
    Binary,
    Boolean,
    Byte,
    Date,
    DateTimeOffset,
    Decimal,
    Double,
    Duration,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    String,
    TimeOfDay,
}

impl PrimitiveTypeKind {
    const ALL: [PrimitiveTypeKind; 16] = [
        Self::Binary,
        Self::Boolean,
        Self::Byte,
        Self::Date,
        Self::DateTimeOffset,
        Self::Decimal,
        Self::Double,
        Self::Duration,
        Self::Guid,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::SByte,
        Self::Single,
        Self::String,
        Self::TimeOfDay,
    ];

    /// Unqualified name, e.g. `Int32`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Date => "Date",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::Decimal => "Decimal",
            Self::Double => "Double",
            Self::Duration => "Duration",
            Self::Guid => "Guid",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::SByte => "SByte",
            Self::Single => "Single",
            Self::String => "String",
            Self::TimeOfDay => "TimeOfDay",
        }
    }

    /// Qualified name, e.g. `Edm.Int32`.
    pub fn qualified_name(self) -> String {
        format!("Edm.{}", self.name())
    }

    /// Parse a qualified `Edm.*` name.
    pub fn from_qualified_name(name: &str) -> Option<Self> {
        let local = name.strip_prefix("Edm.")?;
        Self::ALL.into_iter().find(|kind| kind.name() == local)
    }

    /// True for the types that may back an enum.
    pub fn is_integral(self) -> bool {
        self.integral_range().is_some()
    }

    /// Inclusive value range of an integral type.
    pub fn integral_range(self) -> Option<RangeInclusive<i64>> {
        match self {
            Self::Byte => Some(i64::from(u8::MIN)..=i64::from(u8::MAX)),
            Self::SByte => Some(i64::from(i8::MIN)..=i64::from(i8::MAX)),
            Self::Int16 => Some(i64::from(i16::MIN)..=i64::from(i16::MAX)),
            Self::Int32 => Some(i64::from(i32::MIN)..=i64::from(i32::MAX)),
            Self::Int64 => Some(i64::MIN..=i64::MAX),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edm.{}", self.name())
    }
}

/// A reference to a primitive type with its facets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrimitiveTypeReference {
    pub kind: PrimitiveTypeKind,
    pub nullable: bool,
}

impl PrimitiveTypeReference {
    pub fn new(kind: PrimitiveTypeKind, nullable: bool) -> Self {
        Self { kind, nullable }
    }
}

//! Model-validity error records and their collector.
//!
//! Malformed or semantically invalid metadata is never reported through
//! `Err`. Each problem becomes an [`EdmError`] stored on the node it concerns
//! (or on a bad element standing in for it), so a whole model can be built
//! and reported at once.

use std::fmt;
use std::sync::Arc;

use crate::base::Position;

// ============================================================================
// ERROR CODES
// ============================================================================

/// Categorized codes for model-validity diagnostics.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Reference resolution (types, targets, key properties)
/// - **E0100-E0199**: Structural rules (duplicates, hierarchy, keys)
/// - **E0200-E0299**: Enumeration rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdmErrorCode {
    // =========================================================================
    // E00xx: Reference resolution
    // =========================================================================
    /// A type name does not resolve to any type in the model
    BadUnresolvedType,
    /// An annotation target path does not resolve to any element
    BadUnresolvedTarget,
    /// A key references a property the entity type does not declare
    BadUnresolvedPropertyInKey,

    // =========================================================================
    // E01xx: Structural rules
    // =========================================================================
    /// A type is (transitively) its own base type
    BadCyclicEntity,
    /// A non-abstract entity type has no key anywhere in its hierarchy
    KeyMissingOnEntityType,
    /// A base type resolves to something that is not a structured type of the same kind
    BaseTypeMustBeStructured,
    /// Two schema elements share a qualified name
    DuplicateSchemaElementName,
    /// Two properties of one type share a name
    DuplicatePropertyName,

    // =========================================================================
    // E02xx: Enumeration rules
    // =========================================================================
    /// Two members of one enum share a name
    DuplicateEnumMemberName,
    /// The underlying type is not Byte, SByte, Int16, Int32 or Int64
    EnumMustHaveIntegerUnderlyingType,
    /// A member value does not fit the underlying type
    EnumMemberValueOutOfRange,
    /// A member of a flags enum omits its value
    EnumMemberMustHaveValue,
}

impl EdmErrorCode {
    /// Stable numeric value of the code.
    pub fn number(&self) -> u16 {
        match self {
            Self::BadUnresolvedType => 1,
            Self::BadUnresolvedTarget => 2,
            Self::BadUnresolvedPropertyInKey => 3,
            Self::BadCyclicEntity => 101,
            Self::KeyMissingOnEntityType => 102,
            Self::BaseTypeMustBeStructured => 103,
            Self::DuplicateSchemaElementName => 104,
            Self::DuplicatePropertyName => 105,
            Self::DuplicateEnumMemberName => 201,
            Self::EnumMustHaveIntegerUnderlyingType => 202,
            Self::EnumMemberValueOutOfRange => 203,
            Self::EnumMemberMustHaveValue => 204,
        }
    }

    /// Code as shown to users, e.g. `E0001`.
    pub fn as_string(&self) -> String {
        format!("E{:04}", self.number())
    }
}

impl fmt::Display for EdmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.number())
    }
}

// ============================================================================
// ERROR RECORD
// ============================================================================

/// A diagnostic describing why part of a model is invalid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdmError {
    /// Categorized error code.
    pub code: EdmErrorCode,
    /// Human-readable message.
    pub message: Arc<str>,
    /// Location of the offending syntax, when the reader supplied one.
    pub location: Option<Position>,
}

impl EdmError {
    pub fn new(code: EdmErrorCode, message: impl Into<Arc<str>>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Set the location.
    pub fn at(mut self, location: Option<Position>) -> Self {
        self.location = location;
        self
    }

    pub fn unresolved_type(name: &str, location: Option<Position>) -> Self {
        Self::new(
            EdmErrorCode::BadUnresolvedType,
            format!("the type '{}' could not be found", name),
        )
        .at(location)
    }

    pub fn unresolved_target(target: &str, location: Option<Position>) -> Self {
        Self::new(
            EdmErrorCode::BadUnresolvedTarget,
            format!("the annotation target '{}' could not be found", target),
        )
        .at(location)
    }
}

impl fmt::Display for EdmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "{} {}: {}", self.code, location, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics while a node's errors are computed.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    errors: Vec<EdmError>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, error: EdmError) {
        self.errors.push(error);
    }

    /// Add every diagnostic from `errors`.
    pub fn extend<'a>(&mut self, errors: impl IntoIterator<Item = &'a EdmError>) {
        self.errors.extend(errors.into_iter().cloned());
    }

    /// Add a duplicate-name error for `name` within `scope`.
    pub fn duplicate_name(
        &mut self,
        code: EdmErrorCode,
        scope: &str,
        name: &str,
        location: Option<Position>,
    ) {
        self.add(
            EdmError::new(
                code,
                format!("'{}' is already defined in '{}'", name, scope),
            )
            .at(location),
        );
    }

    /// Get all diagnostics.
    pub fn errors(&self) -> &[EdmError] {
        &self.errors
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return the diagnostics.
    pub fn finish(self) -> Vec<EdmError> {
        self.errors
    }
}

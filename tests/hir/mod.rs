//! HIR layer tests
//!
//! Tests for the semantic model built from CSDL schemas:
//! - Type lookup and inheritance
//! - Enum member values
//! - Cross-schema annotation targets
//! - Bad elements and validation

pub mod tests_annotations;
pub mod tests_bad_elements;
pub mod tests_enums;
pub mod tests_model;

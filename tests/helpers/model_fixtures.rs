//! A small hard-coded model used across the integration tests.
//!
//! ```text
//! Fully.Qualified.Namespace (alias FQ)
//!   Person            key ID      ID, Name
//!   └─ Employee                   WorkEmail
//!      └─ Manager                 NumberOfReports
//!   Dog               key ID      ID, Color
//!   Address (complex)             Street, City
//!   Color (enum, Int64)           Red, Green = 5, Blue
//!
//! Fully.Qualified.Annotations
//!   Annotations Target="FQ.Person/Name"
//! ```

use once_cell::sync::Lazy;

use edmkit::hir::{SemanticModel, StructuredType};
use edmkit::syntax::{
    CsdlAnnotation, CsdlAnnotations, CsdlEnumMember, CsdlEnumType, CsdlExpression, CsdlProperty,
    CsdlSchema, CsdlStructuredType, PathSegmentToken,
};

pub const NAMESPACE: &str = "Fully.Qualified.Namespace";
pub const DESCRIPTION: &str = "Org.OData.Core.V1.Description";

/// The fixture model, built once per test binary.
pub static MODEL: Lazy<SemanticModel> = Lazy::new(build_model);

pub fn build_model() -> SemanticModel {
    SemanticModel::new([people_schema(), annotations_schema()])
}

pub fn people_schema() -> CsdlSchema {
    CsdlSchema::new(NAMESPACE)
        .with_alias("FQ")
        .with_entity_type(
            CsdlStructuredType::new("Person")
                .with_key(["ID"])
                .with_property(CsdlProperty::new("ID", "Edm.Int32").with_nullable(false))
                .with_property(CsdlProperty::new("Name", "Edm.String"))
                .with_annotation(CsdlAnnotation::new(
                    DESCRIPTION,
                    CsdlExpression::String("Somebody".into()),
                )),
        )
        .with_entity_type(
            CsdlStructuredType::new("Employee")
                .with_base_type("Fully.Qualified.Namespace.Person")
                .with_property(CsdlProperty::new("WorkEmail", "Edm.String")),
        )
        .with_entity_type(
            CsdlStructuredType::new("Manager")
                .with_base_type("FQ.Employee")
                .with_property(CsdlProperty::new("NumberOfReports", "Edm.Int32")),
        )
        .with_entity_type(
            CsdlStructuredType::new("Dog")
                .with_key(["ID"])
                .with_property(CsdlProperty::new("ID", "Edm.Int32").with_nullable(false))
                .with_property(CsdlProperty::new("Color", "FQ.Color")),
        )
        .with_complex_type(
            CsdlStructuredType::new("Address")
                .with_property(CsdlProperty::new("Street", "Edm.String"))
                .with_property(CsdlProperty::new("City", "Edm.String")),
        )
        .with_enum_type(
            CsdlEnumType::new("Color")
                .with_underlying_type("Edm.Int64")
                .with_member(CsdlEnumMember::new("Red"))
                .with_member(CsdlEnumMember::new("Green").with_value(5))
                .with_member(CsdlEnumMember::new("Blue")),
        )
}

pub fn annotations_schema() -> CsdlSchema {
    CsdlSchema::new("Fully.Qualified.Annotations").with_annotations(
        CsdlAnnotations::new("FQ.Person/Name")
            .with_annotation(CsdlAnnotation::new(
                DESCRIPTION,
                CsdlExpression::String("Display name".into()),
            ))
            .with_annotation(
                CsdlAnnotation::new("Org.OData.Core.V1.Immutable", CsdlExpression::Bool(true))
                    .with_qualifier("Admin"),
            ),
    )
}

/// `Fully.Qualified.Namespace.<name>`.
pub fn qualified(name: &str) -> String {
    format!("{}.{}", NAMESPACE, name)
}

/// Look up a structured type of `model` by its unqualified name.
pub fn structured<'m>(model: &'m SemanticModel, name: &str) -> StructuredType<'m> {
    model
        .find_type(&qualified(name))
        .and_then(|ty| ty.as_structured())
        .unwrap_or_else(|| panic!("no structured type named {}", name))
}

/// Build a path token chain from its segments.
pub fn path(segments: &[&str]) -> PathSegmentToken {
    PathSegmentToken::chain(segments.iter().copied()).expect("path needs at least one segment")
}

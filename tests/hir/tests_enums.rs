use crate::helpers::model_fixtures::{MODEL, qualified};
use edmkit::hir::{
    EdmCheckable, EdmErrorCode, EdmNamedElement, EnumType, PrimitiveTypeKind, SemanticModel,
};
use edmkit::syntax::{CsdlEnumMember, CsdlEnumType, CsdlSchema};
use rstest::rstest;

fn color() -> EnumType<'static> {
    MODEL.find_type(&qualified("Color")).unwrap().as_enum().unwrap()
}

#[rstest]
#[case("Red", 0, true)]
#[case("Green", 5, false)]
#[case("Blue", 6, true)]
fn test_member_values(#[case] name: &str, #[case] value: i64, #[case] auto: bool) {
    let member = color().find_member(name).unwrap();
    assert_eq!(member.value().value(), value);
    assert_eq!(member.is_auto_assigned(), auto);
}

#[test]
fn test_every_value_uses_the_underlying_type() {
    let color = color();
    assert_eq!(color.underlying_type(), PrimitiveTypeKind::Int64);
    for member in color.members() {
        assert_eq!(member.value().kind(), color.underlying_type());
        assert!(member.value().fits());
        assert_eq!(member.declaring_type(), color);
    }
}

#[test]
fn test_members_keep_declaration_order() {
    let names: Vec<_> = color().members().map(|m| m.name().to_string()).collect();
    assert_eq!(names, vec!["Red", "Green", "Blue"]);
    let indices: Vec<_> = color().members().map(|m| m.index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_explicit_negative_values_round_trip() {
    let model = SemanticModel::new([CsdlSchema::new("NS").with_enum_type(
        CsdlEnumType::new("Temperature")
            .with_underlying_type("Edm.Int16")
            .with_member(CsdlEnumMember::new("Freezing").with_value(-40))
            .with_member(CsdlEnumMember::new("Cold"))
            .with_member(CsdlEnumMember::new("Hot").with_value(i64::from(i16::MAX))),
    )]);
    let temperature = model.find_type("NS.Temperature").unwrap().as_enum().unwrap();
    let values: Vec<_> = temperature.members().map(|m| m.value().value()).collect();
    assert_eq!(values, vec![-40, -39, 32767]);
    assert!(model.validate().is_empty());
}

#[test]
fn test_out_of_range_values_are_diagnosed_not_dropped() {
    let model = SemanticModel::new([CsdlSchema::new("NS").with_enum_type(
        CsdlEnumType::new("Tiny")
            .with_underlying_type("Edm.Byte")
            .with_member(CsdlEnumMember::new("Top").with_value(255))
            .with_member(CsdlEnumMember::new("Over")),
    )]);
    let tiny = model.find_type("NS.Tiny").unwrap().as_enum().unwrap();
    let over = tiny.find_member("Over").unwrap();
    assert_eq!(over.value().value(), 256);
    assert_eq!(over.errors()[0].code, EdmErrorCode::EnumMemberValueOutOfRange);

    let codes: Vec<_> = model.validate().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![EdmErrorCode::EnumMemberValueOutOfRange]);
}

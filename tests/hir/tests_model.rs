use crate::helpers::model_fixtures::{MODEL, build_model, qualified, structured};
use edmkit::hir::{
    EdmCheckable, EdmElement, EdmNamedElement, EdmSchemaElement, EdmStructuredType, EdmType,
    Element, PrimitiveTypeKind, SchemaType, TypeKind, TypeRef,
};
use rstest::rstest;

#[rstest]
#[case("Fully.Qualified.Namespace.Person", TypeKind::Entity)]
#[case("FQ.Manager", TypeKind::Entity)]
#[case("Fully.Qualified.Namespace.Address", TypeKind::Complex)]
#[case("FQ.Color", TypeKind::Enum)]
fn test_find_type(#[case] name: &str, #[case] kind: TypeKind) {
    let ty = MODEL.find_type(name).unwrap();
    assert_eq!(ty.type_kind(), kind);
    assert_eq!(ty.namespace(), "Fully.Qualified.Namespace");
}

#[test]
fn test_unknown_types_are_absent() {
    assert!(MODEL.find_type("Fully.Qualified.Namespace.Cat").is_none());
    assert!(MODEL.find_type("Person").is_none());
    assert!(MODEL.find_type("Edm.String").is_none());
}

#[test]
fn test_hierarchy_is_resolved_through_alias() {
    let manager = structured(&MODEL, "Manager");
    let ancestors: Vec<_> = manager.ancestors().map(|t| t.name().to_string()).collect();
    assert_eq!(ancestors, vec!["Employee", "Person"]);

    let person = structured(&MODEL, "Person");
    assert!(manager.is_or_inherits_from(person.id()));
    assert!(!person.is_or_inherits_from(manager.id()));
    assert!(!structured(&MODEL, "Dog").is_or_inherits_from(person.id()));
}

#[test]
fn test_inherited_key_and_properties() {
    let manager = structured(&MODEL, "Manager");
    let names: Vec<_> = manager.properties().iter().map(|p| p.name().to_string()).collect();
    assert_eq!(names, vec!["ID", "Name", "WorkEmail", "NumberOfReports"]);
    assert_eq!(manager.declared_property_names(), vec!["NumberOfReports"]);

    let key = manager.key();
    assert_eq!(key.len(), 1);
    assert_eq!(key[0].declaring_type().full_name(), qualified("Person"));
}

#[test]
fn test_property_type_references() {
    let dog = structured(&MODEL, "Dog");
    match dog.find_property("ID").unwrap().type_ref() {
        TypeRef::Primitive(primitive) => {
            assert_eq!(primitive.kind, PrimitiveTypeKind::Int32);
            assert!(!primitive.nullable);
        }
        other => panic!("expected a primitive, got {:?}", other),
    }

    let color = dog.find_property("Color").unwrap().type_ref();
    assert_eq!(color.full_name(), qualified("Color"));
    assert_eq!(color.as_enum().unwrap().underlying_type(), PrimitiveTypeKind::Int64);
}

#[test]
fn test_schema_type_round_trips_id() {
    let person = MODEL.find_type(&qualified("Person")).unwrap();
    assert_eq!(MODEL.schema_type(person.id()), Some(person));
}

#[test]
fn test_find_element() {
    match MODEL.find_element("FQ.Employee/Name") {
        Some(Element::Property(property)) => {
            assert_eq!(property.element_id().as_str(), "Fully.Qualified.Namespace.Person/Name");
        }
        other => panic!("expected a property, got {:?}", other),
    }
    assert!(matches!(
        MODEL.find_element("Fully.Qualified.Namespace.Color/Blue"),
        Some(Element::EnumMember(_))
    ));
    assert!(MODEL.find_element("FQ.Person/Nope").is_none());
}

#[test]
fn test_fixture_model_is_valid() {
    assert_eq!(MODEL.validate(), Vec::new());
    assert!(MODEL.elements().iter().all(|e| e.errors().is_empty()));
}

#[test]
fn test_types_listed_in_declaration_order() {
    let names: Vec<_> = MODEL.types().map(|t| t.name().to_string()).collect();
    assert_eq!(names, vec!["Person", "Employee", "Manager", "Dog", "Address", "Color"]);
    assert!(matches!(MODEL.types().last(), Some(SchemaType::Enum(_))));
}

#[test]
fn test_concurrent_first_reads_agree() {
    let model = build_model();
    let results: Vec<Vec<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    structured(&model, "Manager")
                        .ancestors()
                        .map(|t| t.full_name())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(results[0].len(), 2);
    assert!(model.validate().is_empty());
}

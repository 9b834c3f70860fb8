use edmkit::hir::{
    BadElement, BadType, EdmCheckable, EdmError, EdmErrorCode, EdmSemanticElement, ElementId,
    SemanticModel, TypeRef,
};
use edmkit::syntax::{CsdlProperty, CsdlSchema, CsdlStructuredType};

/// Generic traversal that never asks whether an element is bad.
fn describe(element: &dyn EdmSemanticElement) -> (String, usize, usize) {
    (
        element.element_id().to_string(),
        element.errors().len(),
        element.vocabulary_annotations().len(),
    )
}

#[test]
fn test_bad_elements_answer_every_capability() {
    let element = BadElement::new(vec![EdmError::unresolved_target("NS.Gone", None)]);
    let ty = BadType::new("NS.Gone", vec![EdmError::unresolved_type("NS.Gone", None)]);

    assert_eq!(describe(&element), (ElementId::BAD.to_string(), 1, 0));
    assert_eq!(describe(&ty), (ElementId::BAD.to_string(), 1, 0));
}

#[test]
fn test_resolution_continues_past_bad_types() {
    let model = SemanticModel::new([CsdlSchema::new("NS")
        .with_entity_type(
            CsdlStructuredType::new("Order")
                .with_base_type("NS.Document")
                .with_key(["Id"])
                .with_property(CsdlProperty::new("Id", "Edm.Int32"))
                .with_property(CsdlProperty::new("Customer", "NS.Customer"))
                .with_property(CsdlProperty::new("Lines", "Collection(NS.Line)")),
        )]);
    let order = model.find_type("NS.Order").unwrap().as_structured().unwrap();

    let Some(TypeRef::Bad(base)) = order.base_type() else {
        panic!("base type should be bad");
    };
    assert_eq!(base.errors()[0].code, EdmErrorCode::BadUnresolvedType);

    let customer = order.find_property("Customer").unwrap();
    assert!(customer.type_ref().is_bad());
    assert_eq!(describe(&customer).1, 1);

    let codes: Vec<_> = model.validate().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![EdmErrorCode::BadUnresolvedType; 3]);
}

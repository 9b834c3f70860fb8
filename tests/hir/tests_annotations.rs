use crate::helpers::model_fixtures::{
    DESCRIPTION, MODEL, annotations_schema, people_schema, structured,
};
use edmkit::hir::{
    AnnotationTarget, EdmCheckable, EdmErrorCode, EdmVocabularyAnnotatable, ElementId,
    SemanticModel,
};
use edmkit::syntax::{CsdlAnnotation, CsdlAnnotations, CsdlExpression, CsdlSchema};

#[test]
fn test_blocks_keep_their_context() {
    let blocks = MODEL.annotation_blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].context().namespace(), "Fully.Qualified.Annotations");
    assert_eq!(blocks[0].annotations().target(), "FQ.Person/Name");
}

#[test]
fn test_out_of_line_annotations_reach_their_target() {
    let name = structured(&MODEL, "Person").find_property("Name").unwrap();
    let annotations = name.vocabulary_annotations();
    let terms: Vec<_> = annotations.iter().map(|a| a.term()).collect();
    assert_eq!(terms, vec![DESCRIPTION, "Org.OData.Core.V1.Immutable"]);
    assert_eq!(annotations[1].qualifier(), Some("Admin"));
    assert_eq!(annotations[1].value(), &CsdlExpression::Bool(true));
}

#[test]
fn test_inherited_property_shares_annotations() {
    let through_manager = structured(&MODEL, "Manager").find_property("Name").unwrap();
    assert_eq!(through_manager.vocabulary_annotations().len(), 2);
}

#[test]
fn test_inline_annotations() {
    let person = structured(&MODEL, "Person");
    let annotations = person.vocabulary_annotations();
    assert_eq!(annotations.len(), 1);
    assert_eq!(
        annotations[0].target(),
        &AnnotationTarget::Element(ElementId::new("Fully.Qualified.Namespace.Person"))
    );
}

#[test]
fn test_schema_order_does_not_matter() {
    // Annotations declared before the schema they target.
    let model = SemanticModel::new([annotations_schema(), people_schema()]);
    let name = structured(&model, "Person").find_property("Name").unwrap();
    assert_eq!(name.vocabulary_annotations().len(), 2);
    assert!(model.validate().is_empty());
}

#[test]
fn test_unresolved_target_is_reported_once() {
    let model = SemanticModel::new([
        people_schema(),
        CsdlSchema::new("Extra").with_annotations(
            CsdlAnnotations::new("FQ.Person/Nickname")
                .with_annotation(CsdlAnnotation::new(DESCRIPTION, CsdlExpression::Null)),
        ),
    ]);
    let bad: Vec<_> = model
        .vocabulary_annotations()
        .iter()
        .filter(|a| !a.errors().is_empty())
        .collect();
    assert_eq!(bad.len(), 1);
    assert!(matches!(bad[0].target(), AnnotationTarget::Bad(_)));

    let errors = model.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, EdmErrorCode::BadUnresolvedTarget);
    assert!(errors[0].message.contains("FQ.Person/Nickname"));
}

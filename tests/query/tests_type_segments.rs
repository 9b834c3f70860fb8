use crate::helpers::model_fixtures::{MODEL, path, qualified, structured};
use edmkit::config::QueryOptions;
use edmkit::hir::EdmNamedElement;
use edmkit::query::{
    DefaultUriResolver, QueryError, TypeSegmentBinder, UriResolver, follow_type_segments,
};
use rstest::rstest;

const MAX_DEPTH: usize = 800;

#[test]
fn test_single_level_type_segment() {
    let employee = qualified("Employee");
    let tokens = path(&[employee.as_str(), "WorkEmail"]);
    let mut current = structured(&MODEL, "Person");

    let followed = follow_type_segments(
        &tokens,
        &MODEL,
        MAX_DEPTH,
        &DefaultUriResolver::new(),
        &mut current,
    )
    .unwrap();

    assert_eq!(followed.segments.len(), 1);
    assert_eq!(followed.segments[0].edm_type, structured(&MODEL, "Employee").id());
    assert_eq!(followed.segments[0].identifier, employee.as_str());
    assert_eq!(followed.first_non_type_token.identifier(), "WorkEmail");
    assert_eq!(current.name(), "Employee");
}

#[test]
fn test_deep_path_narrows_monotonically() {
    let employee = qualified("Employee");
    let manager = qualified("Manager");
    let tokens = path(&[employee.as_str(), manager.as_str(), "NumberOfReports"]);
    let mut current = structured(&MODEL, "Person");

    let followed = follow_type_segments(
        &tokens,
        &MODEL,
        MAX_DEPTH,
        &DefaultUriResolver::new(),
        &mut current,
    )
    .unwrap();

    let types: Vec<_> = followed.segments.iter().map(|s| s.edm_type).collect();
    assert_eq!(
        types,
        vec![structured(&MODEL, "Employee").id(), structured(&MODEL, "Manager").id()]
    );
    assert_eq!(followed.segments[1].previous_type, followed.segments[0].edm_type);
    assert_eq!(current.name(), "Manager");
    assert_eq!(followed.first_non_type_token.identifier(), "NumberOfReports");
    assert!(followed.first_non_type_token.next_token().is_none());
}

#[test]
fn test_invalid_type_segment_names_the_segment() {
    let tokens = path(&["Stuff", "stuff"]);
    let mut current = structured(&MODEL, "Person");

    let err = follow_type_segments(
        &tokens,
        &MODEL,
        MAX_DEPTH,
        &DefaultUriResolver::new(),
        &mut current,
    )
    .unwrap_err();

    assert_eq!(err, QueryError::non_type_segment("Stuff"));
    assert!(err.to_string().contains("Stuff"));
    assert_eq!(current.name(), "Person");
}

#[test]
fn test_max_recursive_depth_is_enforced() {
    let employee = qualified("Employee");
    let manager = qualified("Manager");
    let tokens = path(&[employee.as_str(), manager.as_str(), "NumberOfReports"]);
    let mut current = structured(&MODEL, "Person");

    let err = follow_type_segments(&tokens, &MODEL, 1, &DefaultUriResolver::new(), &mut current)
        .unwrap_err();

    assert_eq!(err, QueryError::PathTooDeep { max_depth: 1 });
    assert!(err.to_string().contains('1'));
    assert_eq!(current.name(), "Person");
}

#[rstest]
#[case(&["Fully.Qualified.Namespace.Cat", "Name"], QueryError::type_not_found("Fully.Qualified.Namespace.Cat"))]
#[case(&["Fully.Qualified.Namespace.Dog", "Name"], QueryError::incompatible_type("Fully.Qualified.Namespace.Dog", "Fully.Qualified.Namespace.Person"))]
#[case(&["Fully.Qualified.Namespace.Address", "Street"], QueryError::incompatible_type("Fully.Qualified.Namespace.Address", "Fully.Qualified.Namespace.Person"))]
#[case(&["Fully.Qualified.Namespace.Color", "Name"], QueryError::incompatible_type("Fully.Qualified.Namespace.Color", "Fully.Qualified.Namespace.Person"))]
#[case(&["Name"], QueryError::non_type_segment("Name"))]
fn test_rejected_casts(#[case] segments: &[&str], #[case] expected: QueryError) {
    let tokens = path(segments);
    let mut current = structured(&MODEL, "Person");
    let err = follow_type_segments(
        &tokens,
        &MODEL,
        MAX_DEPTH,
        &DefaultUriResolver::new(),
        &mut current,
    )
    .unwrap_err();
    assert_eq!(err, expected);
}

#[rstest]
#[case(&["FQ.Employee", "Name"], 1)]
#[case(&["FQ.Employee", "FQ.Manager", "Name"], 2)]
#[case(&["FQ.Person", "FQ.Person", "Name"], 2)]
#[case(&["FQ.Employee", "FQ.Manager"], 1)]
fn test_accepted_casts(#[case] segments: &[&str], #[case] expected_segments: usize) {
    let tokens = path(segments);
    let mut current = structured(&MODEL, "Person");
    let followed = follow_type_segments(
        &tokens,
        &MODEL,
        MAX_DEPTH,
        &DefaultUriResolver::new(),
        &mut current,
    )
    .unwrap();
    assert_eq!(followed.segments.len(), expected_segments);
    assert_eq!(followed.last_type(), Some(current.id()));
}

#[test]
fn test_depth_limit_applies_before_lookup() {
    // The second cast is invalid, but the depth limit is hit first.
    let tokens = path(&["FQ.Employee", "FQ.Cat", "Name"]);
    let mut current = structured(&MODEL, "Person");
    let err = follow_type_segments(&tokens, &MODEL, 1, &DefaultUriResolver::new(), &mut current)
        .unwrap_err();
    assert_eq!(err, QueryError::PathTooDeep { max_depth: 1 });
}

#[test]
fn test_depth_equal_to_cast_count_is_rejected() {
    let employee = qualified("Employee");
    let manager = qualified("Manager");
    let tokens = path(&[employee.as_str(), manager.as_str(), "NumberOfReports"]);
    let mut current = structured(&MODEL, "Person");
    let err = follow_type_segments(&tokens, &MODEL, 2, &DefaultUriResolver::new(), &mut current)
        .unwrap_err();
    assert_eq!(err, QueryError::PathTooDeep { max_depth: 2 });
    assert_eq!(current.name(), "Person");

    let followed =
        follow_type_segments(&tokens, &MODEL, 3, &DefaultUriResolver::new(), &mut current)
            .unwrap();
    assert_eq!(followed.segments.len(), 2);
}

struct ShoutingResolver;

impl UriResolver for ShoutingResolver {
    fn enable_case_insensitive(&self) -> bool {
        true
    }
}

#[test]
fn test_custom_resolver_policy() {
    let tokens = path(&["FULLY.QUALIFIED.NAMESPACE.EMPLOYEE", "Name"]);

    let mut current = structured(&MODEL, "Person");
    let followed =
        follow_type_segments(&tokens, &MODEL, MAX_DEPTH, &ShoutingResolver, &mut current).unwrap();
    assert_eq!(followed.segments.len(), 1);
    assert_eq!(current.name(), "Employee");

    let mut current = structured(&MODEL, "Person");
    let err = follow_type_segments(
        &tokens,
        &MODEL,
        MAX_DEPTH,
        &DefaultUriResolver::new(),
        &mut current,
    )
    .unwrap_err();
    assert!(matches!(err, QueryError::TypeNotFound(_)));
}

#[test]
fn test_binder_from_options() {
    let options = QueryOptions {
        max_path_depth: 2,
        ..QueryOptions::default()
    };
    let binder = TypeSegmentBinder::new(&MODEL, &options);
    let err = binder
        .bind(&path(&["FQ.Employee", "FQ.Manager", "Name"]), structured(&MODEL, "Person"))
        .unwrap_err();
    assert_eq!(err, QueryError::PathTooDeep { max_depth: 2 });

    let manager_path = path(&["FQ.Manager", "Name"]);
    let (followed, current) = binder
        .bind(&manager_path, structured(&MODEL, "Employee"))
        .unwrap();
    assert_eq!(followed.segments.len(), 1);
    assert_eq!(current.name(), "Manager");
}

use edmkit::config::ErrorWriterOptions;
use edmkit::interchange::{
    DEFAULT_LANGUAGE, InterchangeError, JsonErrorWriter, ODataError, ODataInnerError,
    XmlErrorWriter, detect_format_from_mime, supported_mime_types, write_error_for_mime,
};
use serde_json::{Value, json};

// ============================================================================
// Fixtures
// ============================================================================

/// A chain of `levels` inner errors, outermost first.
fn chain(levels: usize) -> ODataInnerError {
    (1..levels).rev().fold(ODataInnerError::new(format!("level {levels}")), |nested, level| {
        ODataInnerError::new(format!("level {level}")).with_inner_error(nested)
    })
}

fn xml_string(options: ErrorWriterOptions, error: &ODataError) -> String {
    let bytes = XmlErrorWriter::new(options).to_vec(error).unwrap();
    String::from_utf8(bytes).unwrap()
}

// ============================================================================
// XML
// ============================================================================

#[test]
fn test_default_language_is_written() {
    let xml = xml_string(ErrorWriterOptions::default(), &ODataError::default());
    assert!(xml.contains(&format!("xml:lang=\"{DEFAULT_LANGUAGE}\"")));
    assert!(xml.contains("<m:code></m:code>"));
}

#[test]
fn test_nested_inner_errors_within_the_limit() {
    let error = ODataError::new("500", "Internal").with_inner_error(chain(3));
    let xml = xml_string(ErrorWriterOptions::debug(5), &error);

    assert_eq!(xml.matches("<m:innererror>").count(), 1);
    assert_eq!(xml.matches("<m:internalexception>").count(), 2);
    assert_eq!(xml.matches("<m:type></m:type>").count(), 3);
    assert_eq!(xml.matches("<m:stacktrace></m:stacktrace>").count(), 3);

    let first = xml.find("level 1").unwrap();
    let second = xml.find("level 2").unwrap();
    let third = xml.find("level 3").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_chain_at_exactly_the_limit_is_written() {
    let error = ODataError::default().with_inner_error(chain(5));
    let xml = xml_string(ErrorWriterOptions::debug(5), &error);
    assert_eq!(xml.matches("<m:internalexception>").count(), 4);
}

#[test]
fn test_chain_over_the_limit_fails() {
    let error = ODataError::default().with_inner_error(chain(6));
    let result = XmlErrorWriter::new(ErrorWriterOptions::debug(5)).to_vec(&error);
    assert!(matches!(result, Err(InterchangeError::RecursionDepthLimitReached(5))));
}

#[test]
fn test_inner_errors_hidden_without_debug_information() {
    let error = ODataError::new("500", "Internal").with_inner_error(chain(200));
    let xml = xml_string(ErrorWriterOptions::default(), &error);
    assert!(!xml.contains("innererror"));
}

#[test]
fn test_type_and_stack_trace_are_written() {
    let inner = ODataInnerError::new("boom")
        .with_type_name("System.InvalidOperationException")
        .with_stack_trace("at Service.Handle()");
    let error = ODataError::new("500", "Internal").with_inner_error(inner);
    let xml = xml_string(ErrorWriterOptions::debug(1), &error);
    assert!(xml.contains("<m:type>System.InvalidOperationException</m:type>"));
    assert!(xml.contains("<m:stacktrace>at Service.Handle()</m:stacktrace>"));
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_nesting_matches_xml() {
    let error = ODataError::new("500", "Internal").with_inner_error(chain(3));
    let value = JsonErrorWriter::new(ErrorWriterOptions::debug(5)).to_value(&error).unwrap();

    let inner = &value["error"]["innererror"];
    assert_eq!(inner["message"], json!("level 1"));
    assert_eq!(inner["type"], json!(""));
    assert_eq!(inner["internalexception"]["message"], json!("level 2"));
    assert_eq!(inner["internalexception"]["internalexception"]["message"], json!("level 3"));
    assert_eq!(
        inner["internalexception"]["internalexception"]["internalexception"],
        Value::Null
    );
}

#[test]
fn test_json_chain_over_the_limit_fails() {
    let error = ODataError::default().with_inner_error(chain(6));
    let writer = JsonErrorWriter::new(ErrorWriterOptions::debug(5));
    assert!(matches!(
        writer.to_vec(&error),
        Err(InterchangeError::RecursionDepthLimitReached(5))
    ));
}

#[test]
fn test_json_language_override() {
    let error = ODataError::new("400", "Ungültig").with_language("de-DE");
    let bytes = JsonErrorWriter::default().to_vec(&error).unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["error"]["message"]["lang"], json!("de-DE"));
    assert_eq!(value["error"]["message"]["value"], json!("Ungültig"));
}

// ============================================================================
// Format selection
// ============================================================================

#[test]
fn test_every_supported_mime_type_has_a_format() {
    let error = ODataError::new("400", "Bad");
    for mime in supported_mime_types() {
        assert!(detect_format_from_mime(mime).is_some(), "{mime}");
        let bytes = write_error_for_mime(mime, &error, &ErrorWriterOptions::default()).unwrap();
        assert!(!bytes.is_empty());
    }
}

#[test]
fn test_unknown_mime_type_is_unsupported() {
    let result =
        write_error_for_mime("text/csv", &ODataError::default(), &ErrorWriterOptions::default());
    assert!(matches!(result, Err(InterchangeError::Unsupported(_))));
}

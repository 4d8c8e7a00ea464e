use super::*;

#[test]
fn test_collects_when_not_printing() {
    let diagnostics = Diagnostics::new(DiagnosticFlags::all_collected());
    assert!(diagnostics.is_empty());

    diagnostics.push(WarningDiagnostic::new(
        "Padded field of 'foo' at index 1",
        Location::member("foo", "c"),
    ));
    diagnostics.push(ErrorDiagnostic::plain("Unknown type 'widget'"));

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics.messages(),
        vec![
            "foo.c: warning: Padded field of 'foo' at index 1".to_string(),
            "error: Unknown type 'widget'".to_string(),
        ]
    );
}

#[test]
fn test_location_display() {
    assert_eq!(Location::record("foo").to_string(), "foo");
    assert_eq!(Location::member("foo", "bar").to_string(), "foo.bar");
}

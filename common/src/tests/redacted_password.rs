use crate::RedactedPassword;

/// **VALUE**: Verifies that passwords never show up in Debug or Display output.
///
/// **WHY THIS MATTERS**: Credentials flow through structs that get logged at debug level.
/// A derived Debug would write the password into the log file.
///
/// **BUG THIS CATCHES**: Would catch if someone replaces the manual impls with derives.
#[test]
fn given_password_when_formatted_then_value_is_redacted() {
    // GIVEN: A password
    let password = RedactedPassword::new("hunter2hunter2");

    // WHEN: Formatting both ways
    let debug = format!("{password:?}");
    let display = format!("{password}");

    // THEN: Neither contains the secret
    assert!(!debug.contains("hunter2"));
    assert!(!display.contains("hunter2"));
    assert_eq!(password.as_str(), "hunter2hunter2");
    assert_eq!(password.char_count(), 14);
}

/// **VALUE**: Verifies that serializing a password fails instead of leaking it.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Serialize)]` slipping in on a struct
/// holding the password, which would put it into config or storage files.
#[test]
fn given_password_when_serialized_then_returns_error() {
    let password = RedactedPassword::new("correct-horse");

    let result = serde_json::to_string(&password);

    assert!(result.is_err());
}

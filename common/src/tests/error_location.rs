use crate::ErrorLocation;

use std::panic::Location;

#[track_caller]
fn capture_here() -> ErrorLocation {
    ErrorLocation::caller()
}

/// **VALUE**: Verifies that `ErrorLocation::caller()` reports the call site, not the helper.
///
/// **WHY THIS MATTERS**: Every error constructor in the workspace relies on `#[track_caller]`
/// propagation. If the location pointed at the constructor, every error message would
/// carry the same useless position.
///
/// **BUG THIS CATCHES**: Would catch if `caller()` loses its `#[track_caller]` attribute.
#[test]
fn given_track_caller_helper_when_capturing_then_reports_call_site_line() {
    // GIVEN: The line we are calling from
    let expected_line = line!() + 3;

    // WHEN: Capturing through a track_caller helper
    let location = capture_here();

    // THEN: The reported line is this test's line
    assert_eq!(location.line, expected_line);
    assert!(location.file.ends_with("error_location.rs"));
    assert!(location.column > 0);
}

/// **VALUE**: Verifies the bracketed `[file:line:column]` format.
///
/// **WHY THIS MATTERS**: Error messages are grepped by developers; the format must be stable.
///
/// **BUG THIS CATCHES**: Would catch if the Display implementation drops brackets or fields.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A location from std
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting it
    let formatted = location.to_string();

    // THEN: Bracketed, colon separated
    assert!(formatted.starts_with('['));
    assert!(formatted.ends_with(']'));
    assert_eq!(formatted.matches(':').count(), 2);
    assert!(formatted.contains(&location.line.to_string()));
}

// Unit tests for relative time phrases and avatar URLs

use crate::display::{relative_time, user_icon_url};

use chrono::{DateTime, Duration, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn ago(seconds: i64) -> String {
    relative_time(now() - Duration::seconds(seconds), now())
}

/// **VALUE**: Verifies each phrase bucket at a representative point.
///
/// **BUG THIS CATCHES**: Would catch off-by-one bucket boundaries or rounding that
/// truncates instead of rounding to the nearest unit.
#[test]
fn given_elapsed_times_when_formatting_then_uses_expected_phrases() {
    assert_eq!(ago(10), "less than a minute ago");
    assert_eq!(ago(60), "1 minute ago");
    assert_eq!(ago(5 * 60), "5 minutes ago");
    assert_eq!(ago(60 * 60), "about 1 hour ago");
    assert_eq!(ago(3 * 60 * 60), "about 3 hours ago");
    assert_eq!(ago(30 * 60 * 60), "1 day ago");
    assert_eq!(ago(5 * 24 * 60 * 60), "5 days ago");
    assert_eq!(ago(40 * 24 * 60 * 60), "about 1 month ago");
    assert_eq!(ago(120 * 24 * 60 * 60), "4 months ago");
}

#[test]
fn given_multi_year_gaps_when_formatting_then_qualifies_years() {
    let year = 365 * 24 * 60 * 60;
    let month = 30 * 24 * 60 * 60;

    assert_eq!(ago(year), "about 1 year ago");
    assert_eq!(ago(year + 5 * month), "over 1 year ago");
    assert_eq!(ago(year + 10 * month), "almost 2 years ago");
    assert_eq!(ago(3 * year), "about 3 years ago");
}

/// **VALUE**: Verifies clock skew producing a future timestamp does not read as "ago".
#[test]
fn given_future_timestamp_when_formatting_then_reads_as_in() {
    let later = now() + Duration::minutes(5);

    assert_eq!(relative_time(later, now()), "in 5 minutes");
}

/// **VALUE**: Verifies the avatar seed is URL-encoded.
///
/// **BUG THIS CATCHES**: Would catch string concatenation producing broken URLs.
#[test]
fn given_username_when_building_icon_url_then_seed_is_encoded() {
    let url = user_icon_url("a b");

    assert!(url.starts_with("https://api.dicebear.com/9.x/initials/svg?"));
    assert!(url.contains("seed=a+b"));
    assert!(url.contains("backgroundType=gradientLinear"));
}

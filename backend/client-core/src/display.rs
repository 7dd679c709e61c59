//! Presentation helpers: relative timestamps and avatar URLs.

use chrono::{DateTime, Utc};
use url::Url;

const USER_ICON_BASE_URL: &str = "https://api.dicebear.com/9.x/initials/svg";

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Human phrase for how long ago `timestamp` was, e.g. "about 3 hours ago".
///
/// Timestamps in the future read as "in ...".
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();
    let phrase = distance_phrase(seconds.abs());

    if seconds < 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn distance_phrase(seconds: i64) -> String {
    match seconds {
        s if s < 30 => String::from("less than a minute"),
        s if s < 90 => String::from("1 minute"),
        s if s < 45 * MINUTE => format!("{} minutes", (s + MINUTE / 2) / MINUTE),
        s if s < 90 * MINUTE => String::from("about 1 hour"),
        s if s < DAY => format!("about {} hours", (s + HOUR / 2) / HOUR),
        s if s < 2 * DAY => String::from("1 day"),
        s if s < MONTH => format!("{} days", (s + DAY / 2) / DAY),
        s if s < 2 * MONTH => String::from("about 1 month"),
        s if s < YEAR => format!("{} months", (s + MONTH / 2) / MONTH),
        s => {
            let years = s / YEAR;
            let remainder = s % YEAR;
            let unit = if years == 1 { "year" } else { "years" };

            if remainder < 3 * MONTH {
                format!("about {years} {unit}")
            } else if remainder < 9 * MONTH {
                format!("over {years} {unit}")
            } else {
                format!("almost {} years", years + 1)
            }
        }
    }
}

/// Initials avatar seeded by the username.
pub fn user_icon_url(username: &str) -> String {
    match Url::parse_with_params(
        USER_ICON_BASE_URL,
        &[("seed", username), ("backgroundType", "gradientLinear")],
    ) {
        Ok(url) => url.to_string(),
        Err(_) => USER_ICON_BASE_URL.to_string(),
    }
}

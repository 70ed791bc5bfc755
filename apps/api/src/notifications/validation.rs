use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use uuid::Uuid;

use super::NotifyError;

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Minimal structural check: non-empty, under 254 bytes, has `@` and `.`.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() < 254 && email.contains('@') && email.contains('.')
}

pub fn is_valid_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

pub fn is_valid_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

pub fn parse_validation_date(raw: &str) -> Result<DateTime<FixedOffset>, NotifyError> {
    DateTime::parse_from_rfc3339(raw).map_err(|_| NotifyError::DateFormat)
}

/// `5 janvier 2024 à 10h30`, or `à 10h` when minutes are zero.
/// Rendered in the offset the date was sent with.
pub fn format_date_fr(date: &DateTime<FixedOffset>) -> String {
    let month = MONTHS_FR[date.month0() as usize];
    if date.minute() == 0 {
        format!("{} {} {} à {}h", date.day(), month, date.year(), date.hour())
    } else {
        format!(
            "{} {} {} à {}h{:02}",
            date.day(),
            month,
            date.year(),
            date.hour(),
            date.minute()
        )
    }
}

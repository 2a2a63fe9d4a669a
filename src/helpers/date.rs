//! Date helper functions

use chrono::{DateTime, FixedOffset, Locale, TimeZone, Utc};

/// Display format for publication dates, e.g. "25 mar 2021"
pub const PUBLICATION_FORMAT: &str = "DD MMM YYYY";

/// Parse a content API timestamp such as `2021-03-25T19:27:35+0000`
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Map a site language tag onto a chrono locale
pub fn locale_for(language: &str) -> Locale {
    match language.replace('_', "-").to_ascii_lowercase().as_str() {
        "pt" | "pt-br" => Locale::pt_BR,
        "pt-pt" => Locale::pt_PT,
        "es" | "es-es" => Locale::es_ES,
        "fr" | "fr-fr" => Locale::fr_FR,
        "de" | "de-de" => Locale::de_DE,
        "it" | "it-it" => Locale::it_IT,
        "en-gb" => Locale::en_GB,
        _ => Locale::en_US,
    }
}

/// Format a date using a Moment.js-compatible format string and a locale
///
/// # Examples
/// ```ignore
/// format_date(&date, "DD MMM YYYY", Locale::pt_BR) // -> "25 mar 2021"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str, locale: Locale) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format_localized(&chrono_format, locale).to_string()
}

/// Format a raw publication timestamp for display
///
/// Dates are shown in UTC. Missing or unparseable timestamps yield `None`.
pub fn publication_date(raw: Option<&str>, locale: Locale) -> Option<String> {
    let date = parse_date(raw?)?;
    Some(format_date(
        &date.with_timezone(&Utc),
        PUBLICATION_FORMAT,
        locale,
    ))
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest pattern first within each category
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

/// Shared date/time utility functions.
///
/// Timestamp parsing for receipt pages, the display format used by the view,
/// and time-zone labels.
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Text shown in place of a timestamp that could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Parse the text content of a receipt timestamp element.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]` and a bare
/// `YYYY-MM-DD`. Date-times without an offset are read in `assumed`; a bare
/// date is midnight UTC. Anything else yields `None`.
pub fn parse_timestamp(text: &str, assumed: UtcOffset) -> Option<OffsetDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc2822) {
        return Some(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(
        s,
        format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory]:[offset_minute]"
        ),
    ) {
        return Some(dt);
    }

    let local_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
    ];
    for fmt in local_formats {
        if let Ok(dt) = PrimitiveDateTime::parse(s, fmt) {
            return Some(dt.assume_offset(assumed));
        }
    }

    if let Ok(date) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
        return Some(date.midnight().assume_utc());
    }

    None
}

/// Parse a configured offset: `local`, `UTC`/`Z`, `+HH`, `+HH:MM` or `-HH:MM`.
///
/// `local` resolves to the system offset, falling back to UTC when the
/// platform cannot report it.
pub fn parse_utc_offset(s: &str) -> Option<UtcOffset> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "local" => return Some(local_offset()),
        "utc" | "z" | "gmt" => return Some(UtcOffset::UTC),
        _ => {}
    }

    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1i8, &s[1..]),
        b'-' => (-1i8, &s[1..]),
        _ => return None,
    };
    let (h, m) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None => (rest, "0"),
    };
    let hours: i8 = h.parse().ok()?;
    let minutes: i8 = m.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    UtcOffset::from_hms(sign * hours, sign * minutes, 0).ok()
}

/// The system's current UTC offset, or UTC if it cannot be determined.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Short time-zone label: `UTC`, `GMT+1`, `GMT-5`, `GMT+5:30`.
pub fn zone_label(offset: UtcOffset) -> String {
    if offset.is_utc() {
        return "UTC".to_string();
    }
    let (h, m, _) = offset.as_hms();
    let sign = if offset.is_negative() { '-' } else { '+' };
    if m == 0 {
        format!("GMT{}{}", sign, h.unsigned_abs())
    } else {
        format!("GMT{}{}:{:02}", sign, h.unsigned_abs(), m.unsigned_abs())
    }
}

/// Format a timestamp for display in `offset`.
///
/// 12-hour: `March 01, 2021, 9:05 AM UTC`. 24-hour: `March 01, 2021, 09:05 UTC`.
pub fn format_display(dt: Option<OffsetDateTime>, offset: UtcOffset, hour12: bool) -> String {
    let Some(dt) = dt else {
        return INVALID_DATE.to_string();
    };
    let local = dt.to_offset(offset);
    let formatted = if hour12 {
        local.format(format_description!(
            "[month repr:long] [day], [year], [hour repr:12 padding:none]:[minute] [period]"
        ))
    } else {
        local.format(format_description!(
            "[month repr:long] [day], [year], [hour repr:24]:[minute]"
        ))
    };
    match formatted {
        Ok(s) => format!("{} {}", s, zone_label(offset)),
        Err(_) => INVALID_DATE.to_string(),
    }
}

use time::{Duration, OffsetDateTime};

use crate::model::AgeBucket;

/// Classify an age (`now - receipt time`) into a bucket.
///
/// Thresholds are half-open: exactly one day old is already "this week" and
/// exactly one week old is already "older".
pub fn classify_age(age: Duration) -> AgeBucket {
    if age < Duration::ZERO {
        AgeBucket::Future
    } else if age < Duration::DAY {
        AgeBucket::Today
    } else if age < Duration::WEEK {
        AgeBucket::ThisWeek
    } else {
        AgeBucket::Older
    }
}

/// Bucket for a receipt timestamp seen at `now`. An unparsed timestamp is `Unknown`.
pub fn bucket_for(receipt_time: Option<OffsetDateTime>, now: OffsetDateTime) -> AgeBucket {
    match receipt_time {
        Some(ts) => classify_age(now - ts),
        None => AgeBucket::Unknown,
    }
}

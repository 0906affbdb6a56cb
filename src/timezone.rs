//! Resolving the configured canonical timezone name to a UTC offset.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Look up `name` (e.g. "Pacific/Auckland") and return its current UTC offset.
///
/// Returns `None` when `name` is not a canonical timezone.
pub fn get_local_offset(name: &str) -> Option<UtcOffset> {
    let timezone = time_tz::timezones::get_by_name(name)?;

    Some(timezone.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

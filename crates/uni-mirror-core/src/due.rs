use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Maximal sentinel substituted for missing due dates during sorting, so
/// undated assignments land after every dated one.
pub(crate) const DUE_SENTINEL: &str = "9999-12-31";

const DATE_ONLY: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const DATE_TIME: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Parse a due-date string into a UTC instant.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` date-time (assumed
/// UTC), or a bare `YYYY-MM-DD` date (midnight UTC). Returns `None` for
/// anything else; callers treat that as a data-quality event, not an
/// error.
#[must_use]
pub fn parse_due(raw: &str) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();
    if let Ok(dt) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(dt);
    }
    if let Ok(dt) = PrimitiveDateTime::parse(trimmed, DATE_TIME) {
        return Some(dt.assume_utc());
    }
    if let Ok(date) = Date::parse(trimmed, DATE_ONLY) {
        return Some(date.midnight().assume_utc());
    }
    None
}

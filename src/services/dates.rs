use chrono::{DateTime, Utc};
use thiserror::Error;

/// The publication date string matched none of the known layouts.
///
/// Non-fatal: ingestion stores such items with a null publish date.
#[derive(Debug, Error)]
#[error("unrecognized publication date: {0:?}")]
pub struct DateParseError(pub String);

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`
const RFC1123Z: &str = "%a, %d %b %Y %H:%M:%S %z";
/// RFC 822 with a numeric zone, e.g. `02 Jan 06 15:04 -0700`
const RFC822Z: &str = "%d %b %y %H:%M %z";

/// Parses an RSS `pubDate` against the layouts seen in the wild.
///
/// Layouts are tried in a fixed priority order: RFC 1123 with a numeric
/// zone, RFC 1123 / RFC 822 with a zone name, RFC 822 with a numeric zone,
/// then RFC 3339. The first successful parse wins. chrono's RFC 2822
/// parser covers the named-zone variants, since RFC 2822 admits the
/// obsolete zone names (GMT, MST, ...) and two-digit years of RFC 822.
pub fn parse_pub_date(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_str(raw, RFC1123Z) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(raw, RFC822Z) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    Err(DateParseError(raw.to_owned()))
}

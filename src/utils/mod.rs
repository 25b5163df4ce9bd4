use std::time::Duration;

use anyhow::{anyhow, Result};

/// Decodes character entities left in feed text after XML parsing, e.g.
/// numeric references or a double-escaped `&amp;amp;`. Text with stray
/// ampersands is returned untouched.
pub fn unescape_entities(raw: &str) -> String {
    match quick_xml::escape::unescape(raw) {
        Ok(text) => text.into_owned(),
        Err(_) => raw.to_owned(),
    }
}

/// Parses interval strings such as `500ms`, `30s`, `1m`, or `2h`
pub fn parse_interval(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    let unit_start = raw
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| anyhow!("interval {raw:?} is missing a unit (ms, s, m, or h)"))?;
    let (value, unit) = raw.split_at(unit_start);
    let value: u64 = value
        .parse()
        .map_err(|_| anyhow!("interval {raw:?} has no numeric value"))?;

    let duration = match unit {
        "ms" => Duration::from_millis(value),
        "s" => Duration::from_secs(value),
        "m" => Duration::from_secs(value * 60),
        "h" => Duration::from_secs(value * 3600),
        other => return Err(anyhow!("unknown interval unit {other:?} in {raw:?}")),
    };
    Ok(duration)
}

/// Shortens text to at most `max_chars` characters, appending an ellipsis
/// when something was cut. Operates on characters, not bytes.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_entities() {
        assert_eq!(unescape_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(unescape_entities("it&#39;s fine"), "it's fine");
        // Stray ampersands pass through unchanged.
        assert_eq!(unescape_entities("AT&T"), "AT&T");
        assert_eq!(unescape_entities("plain"), "plain");
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_interval("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_interval("1m").unwrap(), Duration::from_secs(60));
        assert_eq!(parse_interval("2h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn test_parse_interval_rejects_garbage() {
        assert!(parse_interval("").is_err());
        assert!(parse_interval("60").is_err());
        assert!(parse_interval("s").is_err());
        assert!(parse_interval("1d").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long title", 10), "a rathe...");
        // Multi-byte characters do not panic or split.
        assert_eq!(truncate("ééééé", 5), "ééééé");
    }
}

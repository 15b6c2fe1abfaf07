//! Frontmatter parsing for content files.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// Frontmatter metadata for a content file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Post title.
    pub title: String,

    /// Short description for listings and feeds.
    #[serde(default)]
    pub description: String,

    /// Publication timestamp. Accepts RFC 3339 or plain dates.
    #[serde(deserialize_with = "flexible_datetime")]
    pub date: DateTime<Utc>,

    /// Classification tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Drafts are excluded from every build output.
    #[serde(default)]
    pub draft: bool,
}

/// Split content into a metadata block and body at `---` delimiters.
///
/// Returns `None` when fewer than two delimiters are present within the
/// first two splits; such files carry no usable content and are skipped.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let mut parts = content.splitn(3, "---");
    let _leading = parts.next()?;
    let block = parts.next()?;
    let body = parts.next()?;
    Some((block, body))
}

/// Parse the metadata block of a content file.
///
/// `Ok(None)` means the file has no usable frontmatter and should be
/// skipped; a malformed metadata block is an error.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<Option<(Frontmatter, String)>> {
    let Some((block, body)) = split_frontmatter(content) else {
        return Ok(None);
    };

    let frontmatter: Frontmatter =
        serde_yaml::from_str(block).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    Ok(Some((frontmatter, body.to_string())))
}

/// Parse a timestamp from the formats that appear in authored metadata.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&dt));
    }

    None
}

fn flexible_datetime<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date format: {raw}")))
}

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Directory (relative to the site root) holding one detail page per approach.
pub const DETAIL_PAGE_DIR: &str = "approaches";

/// Difficulty level of an approach.
///
/// The catalog is expected to use the closed set beginner/intermediate/advanced.
/// Anything else is kept verbatim in `Other` so a stray value never fails a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Difficulty {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "beginner" => Self::Beginner,
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Other(raw),
        }
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository statistics attached to an approach.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubInfo {
    #[serde(default, deserialize_with = "lenient::count")]
    pub stars: u64,
}

/// One catalog entry, e.g. "Schema linking with retrieval".
///
/// No field is required and none is type-checked strictly: a missing, `null`
/// or mistyped value falls back to a blank one so an incomplete record still
/// renders alongside the rest of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproachRecord {
    /// Unique identifier, also the detail page file name.
    #[serde(default, deserialize_with = "lenient::text")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub short_description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::difficulty")]
    pub difficulty: Difficulty,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub llm_model: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub database: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub thumbnail_image: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub thumbnail_gradient: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub thumbnail_icon: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub featured: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub read_time: String,
    /// Publication date as written in the catalog, e.g. "2024-03-01".
    #[serde(default, deserialize_with = "lenient::text")]
    pub date_published: String,
    #[serde(default, deserialize_with = "lenient::github")]
    pub github: Option<GithubInfo>,
}

impl ApproachRecord {
    /// Parsed publication date, or `None` when the catalog value is not a date.
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        parse_published(&self.date_published)
    }

    pub fn stars(&self) -> u64 {
        self.github.as_ref().map(|g| g.stars).unwrap_or(0)
    }

    pub fn detail_href(&self) -> String {
        format!("{DETAIL_PAGE_DIR}/{}.html", self.slug)
    }
}

/// Top-level shape of `approaches.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub approaches: Vec<ApproachRecord>,
}

/// Field deserializers that never fail on a wrong JSON type.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{Difficulty, GithubInfo};

    /// Strings pass through, numbers and booleans are written out, anything
    /// else is blank.
    fn value_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(value_text(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(value_text(Value::deserialize(d)?))
    }

    pub fn difficulty<'de, D: Deserializer<'de>>(d: D) -> Result<Difficulty, D::Error> {
        text(d).map(Difficulty::from)
    }

    /// A non-array becomes an empty list; non-text entries are dropped.
    pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().filter_map(value_text).collect(),
            _ => Vec::new(),
        })
    }

    /// Truthiness: `false`, `0`, `""` and `null` are false.
    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Null => false,
            Value::Array(_) | Value::Object(_) => true,
        })
    }

    /// Non-negative integer count. Fractions are truncated; negatives and
    /// non-numeric values count as zero.
    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
                .unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        })
    }

    pub fn github<'de, D: Deserializer<'de>>(d: D) -> Result<Option<GithubInfo>, D::Error> {
        Ok(match Value::deserialize(d)? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        })
    }
}

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps
/// and bare `YYYY-MM-DD` dates (taken as midnight).
fn parse_published(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

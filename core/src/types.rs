//! Domain DTOs for the board API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate. Integration tests catch any schema drift.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Server-assigned post identifier.
pub type PostId = u64;

/// A single board post returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Accept RFC 3339 or a zone-less `YYYY-MM-DD HH:MM:SS[.f]` (read as UTC).
/// Anything else, including non-strings, becomes `None` so one odd timestamp
/// never rejects the whole post.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::String(raw)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    let naive = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f"));
    Ok(naive.ok().map(|naive| naive.and_utc()))
}

/// Request payload for creating or updating a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub description: String,
}

impl PostFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields contain something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

impl From<&Post> for PostFields {
    fn from(post: &Post) -> Self {
        Self::new(post.title.clone(), post.description.clone())
    }
}

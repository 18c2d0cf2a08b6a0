//! Queue item view
//!
//! Typed view of the job server's `queue/item/<ticket>` response. Only the
//! fields the driver classifies on are modelled; everything else stays
//! reachable through the raw payload.

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Server-side state of a queued build
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueItem {
    /// Set once the queue entry was cancelled before it could start
    #[serde(default, deserialize_with = "null_as_false")]
    pub cancelled: bool,

    /// Present once an executor picked the item up
    #[serde(default)]
    pub executable: Option<Executable>,

    /// Human-readable reason the item is still waiting
    #[serde(default)]
    pub why: Option<String>,

    /// Unmodified decoded response
    #[serde(skip)]
    pub raw: Value,
}

/// The run a queue item turned into
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Executable {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl QueueItem {
    /// Decodes the typed view, keeping the payload alongside it
    pub fn from_payload(raw: Value) -> serde_json::Result<Self> {
        let mut item: QueueItem = serde_json::from_value(raw.clone())?;
        item.raw = raw;
        Ok(item)
    }
}

/// Accepts `true`/`false`, their string spellings, or null (false)
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolLike {
        Bool(bool),
        Text(String),
    }

    match Option::<BoolLike>::deserialize(deserializer)? {
        None => Ok(false),
        Some(BoolLike::Bool(value)) => Ok(value),
        Some(BoolLike::Text(text)) => match text.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::custom(format!(
                "expected a boolean, got {:?}",
                other
            ))),
        },
    }
}

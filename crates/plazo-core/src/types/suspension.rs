//! Suspension records: periods during which the deadline clock stops.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Timestamp;
use crate::error::{PlazoError, PlazoResult};

/// A suspension as supplied by the caller.
///
/// Either boundary may be missing. Deserialization is lenient: a boundary that
/// is absent, not a string, or not a parseable timestamp becomes `None`, and
/// the record is later discarded by the interval normalizer instead of failing
/// the whole calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Suspension {
    /// Optional caller-side identifier, echoed back in discard reports.
    /// Numeric ids are kept in their decimal form.
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Start of the suspension.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_at: Option<Timestamp>,
    /// End of the suspension.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_at: Option<Timestamp>,
}

impl Suspension {
    /// Creates a suspension with both boundaries set.
    pub fn new(start_at: Timestamp, end_at: Timestamp) -> Self {
        Self {
            id: None,
            start_at: Some(start_at),
            end_at: Some(end_at),
        }
    }

    /// Attaches an identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Reads a JSON suspension list.
    ///
    /// `null` is an empty list. Entries that are not suspension records
    /// become empty records, which the normalizer later discards.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::InvalidInput` if the value is not an array.
    pub fn list_from_json(value: &Value) -> PlazoResult<Vec<Suspension>> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => Ok(items
                .iter()
                .map(|item| Suspension::deserialize(item).unwrap_or_default())
                .collect()),
            _ => Err(PlazoError::invalid_input("suspensions", "must be an array")),
        }
    }

    /// Returns the validated interval, if both boundaries exist.
    pub fn interval(&self) -> Option<SuspensionInterval> {
        match (self.start_at, self.end_at) {
            (Some(start), Some(end)) => Some(SuspensionInterval { start, end }),
            _ => None,
        }
    }
}

/// A suspension with both boundaries present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionInterval {
    /// Start of the interval.
    pub start: Timestamp,
    /// End of the interval.
    pub end: Timestamp,
}

impl SuspensionInterval {
    /// Creates an interval. No ordering check is made here.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// True if the interval has a positive duration.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Elapsed seconds between start and end.
    pub fn duration_seconds(&self) -> i64 {
        self.start.seconds_until(&self.end)
    }

}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| Timestamp::parse(s).ok()))
}

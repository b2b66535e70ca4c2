use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

/// Keeps an id that parses as a UUID and mints a fresh one for anything else.
///
/// Files written by older builds carry numeric millisecond timestamps as ids,
/// and two of those can be equal, so they are never trusted.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4))
}

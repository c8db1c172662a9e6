use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identity and sort key of a clipboard entry.
///
/// Milliseconds since the Unix epoch, assigned by the producing side.
/// The core never generates one, it only compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryTimestamp(i64);

impl EntryTimestamp {
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Parse an RFC 3339 timestamp into milliseconds.
    pub fn parse_rfc3339(s: &str) -> Result<Self, chrono::ParseError> {
        let parsed = chrono::DateTime::parse_from_rfc3339(s)?;
        Ok(Self(parsed.timestamp_millis()))
    }
}

impl fmt::Display for EntryTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryTimestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl Serialize for EntryTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Millis(i64),
    Rfc3339(String),
}

impl<'de> Deserialize<'de> for EntryTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireTimestamp::deserialize(deserializer)? {
            WireTimestamp::Millis(ms) => Ok(Self(ms)),
            WireTimestamp::Rfc3339(s) => Self::parse_rfc3339(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_integer_millis() {
        let ts: EntryTimestamp = serde_json::from_str("1700000000123").unwrap();
        assert_eq!(ts.as_millis(), 1_700_000_000_123);
    }

    #[test]
    fn deserializes_rfc3339_string() {
        let ts: EntryTimestamp = serde_json::from_str("\"2024-01-02T03:04:05.678+00:00\"").unwrap();
        assert_eq!(ts.as_millis(), 1_704_164_645_678);
    }

    #[test]
    fn rejects_garbage_string() {
        let result: Result<EntryTimestamp, _> = serde_json::from_str("\"yesterday\"");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&EntryTimestamp::from_millis(42)).unwrap();
        assert_eq!(json, "42");
    }
}

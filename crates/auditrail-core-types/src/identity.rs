//! Identifier type for tracked records

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a tracked record
///
/// Stored as the canonical hyphenated string so that the same value can be
/// written to a change-log row, logged, and compared without re-parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh, time-ordered identifier (UUIDv7)
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Parse a string as a UUID and keep its canonical form
    ///
    /// Returns `None` for anything that is not a UUID, which lets resolvers
    /// treat a malformed identifier the same way as a missing record.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self::from)
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an already-canonical string (e.g. a value read back from storage)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self(id.hyphenated().to_string())
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

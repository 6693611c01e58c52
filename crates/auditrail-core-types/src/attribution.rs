//! Attribution of a change to whoever made it

use serde::{Deserialize, Serialize};

/// Actor recorded when the caller does not identify themselves
pub const SYSTEM_ACTOR: &str = "system";

/// Who made a change (`changed_by` on every change record)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(String);

impl Actor {
    /// Create an actor from a login or service name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The sentinel actor used for unattributed changes
    pub fn system() -> Self {
        Self(SYSTEM_ACTOR.to_string())
    }

    /// Resolve an optional name, falling back to [`Actor::system`]
    ///
    /// Blank names count as unresolved.
    pub fn or_system(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(n) if !n.is_empty() => Self(n.to_string()),
            _ => Self::system(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_system(&self) -> bool {
        self.0 == SYSTEM_ACTOR
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

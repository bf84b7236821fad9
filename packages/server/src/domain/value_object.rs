//! Value objects for the chat relay domain.

use std::fmt;

use uuid::Uuid;

/// Display name used when the identity source supplies none.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

/// Display name of a participant, resolved upstream.
///
/// The relay treats the name as opaque; the only rule is that it is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a display name, falling back to [`UNKNOWN_DISPLAY_NAME`] for an empty value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::unknown()
        } else {
            Self(value)
        }
    }

    /// Create a display name from an optional upstream value
    pub fn from_optional(value: Option<String>) -> Self {
        value.map(Self::new).unwrap_or_else(Self::unknown)
    }

    /// The sentinel name for connections without an identity
    pub fn unknown() -> Self {
        Self(UNKNOWN_DISPLAY_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque per-connection key in the room registry.
///
/// Two connections with the same display name still get distinct tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionToken(Uuid);

impl ConnectionToken {
    /// Generate a fresh random token
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

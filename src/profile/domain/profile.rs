//! User profile aggregate and its validated display name.

use super::error::ProfileDomainError;
use super::ids::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum display name length in characters.
const MAX_DISPLAY_NAME_CHARS: usize = 100;

/// Validated display name shown on task cards and member lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Parses a display name from raw input, trimming surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyDisplayName`] when the trimmed
    /// input is empty and [`ProfileDomainError::DisplayNameTooLong`] when it
    /// exceeds 100 characters.
    pub fn new(raw: &str) -> Result<Self, ProfileDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProfileDomainError::EmptyDisplayName);
        }
        let length = trimmed.chars().count();
        if length > MAX_DISPLAY_NAME_CHARS {
            return Err(ProfileDomainError::DisplayNameTooLong {
                max: MAX_DISPLAY_NAME_CHARS,
                length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application-side identity record for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    display_name: DisplayName,
    avatar_url: Option<String>,
}

impl UserProfile {
    /// Assembles a profile from already-validated parts.
    #[must_use]
    pub const fn new(id: UserId, display_name: DisplayName, avatar_url: Option<String>) -> Self {
        Self {
            id,
            display_name,
            avatar_url,
        }
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Returns the avatar URL, if one has been uploaded.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

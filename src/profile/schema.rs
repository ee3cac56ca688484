//! Wire record mapping for profile persistence.

use crate::gateway::{Row, RowDecodeError};
use crate::profile::domain::{DisplayName, UserId, UserProfile};

/// Table holding one profile row per registered user.
pub const PROFILES_TABLE: &str = "user_profiles";

/// Blob bucket holding avatar images.
pub const AVATARS_BUCKET: &str = "avatars";

/// Builds the stored row for a profile.
///
/// The avatar column is only present when an avatar has been uploaded.
#[must_use]
pub fn profile_row(profile: &UserProfile) -> Row {
    let mut row = Row::new()
        .with("id", profile.id().as_str())
        .with("display_name", profile.display_name().as_str());
    if let Some(url) = profile.avatar_url() {
        row.set("avatar_url", url);
    }
    row
}

/// Reads a profile from its stored row.
///
/// # Errors
///
/// Returns [`RowDecodeError`] when a column is missing, malformed, or holds
/// a display name that fails domain validation.
pub fn profile_from_row(row: &Row) -> Result<UserProfile, RowDecodeError> {
    let id = UserId::new(row.read_str("id")?);
    let display_name = DisplayName::new(row.read_str("display_name")?)
        .map_err(|_| RowDecodeError::unexpected("display_name", "a valid display name"))?;
    let avatar_url = row.read_opt_str("avatar_url")?.map(str::to_owned);
    Ok(UserProfile::new(id, display_name, avatar_url))
}

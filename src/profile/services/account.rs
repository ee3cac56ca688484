//! Service layer for profile registration and maintenance.

use crate::gateway::{
    BlobUrl, DataGateway, FetchError, Filter, GatewayError, Row,
};
use crate::profile::domain::{DisplayName, ProfileDomainError, UserId, UserProfile};
use crate::profile::schema::{AVATARS_BUCKET, PROFILES_TABLE, profile_from_row, profile_row};
use std::sync::Arc;
use thiserror::Error;

/// Outcome of a profile registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A fresh profile row was inserted.
    Created(UserProfile),
    /// The user already had a profile; nothing was written.
    Existing(UserProfile),
}

impl RegistrationOutcome {
    /// Returns the registered profile regardless of how it came to exist.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        match self {
            Self::Created(profile) | Self::Existing(profile) => profile,
        }
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Domain validation failed before any network call.
    #[error(transparent)]
    Validation(#[from] ProfileDomainError),

    /// A profile read failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Inserting the profile row failed.
    #[error("registering the profile failed: {source}")]
    Register {
        /// The underlying gateway failure.
        source: GatewayError,
    },

    /// Persisting a profile change failed.
    #[error("updating the profile failed: {source}")]
    Update {
        /// The underlying gateway failure.
        source: GatewayError,
    },

    /// Uploading the avatar blob failed.
    #[error("uploading the avatar failed: {source}")]
    AvatarUpload {
        /// The underlying gateway failure.
        source: GatewayError,
    },

    /// No profile row exists for the user.
    #[error("no profile is registered for user {0}")]
    NotRegistered(UserId),
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Account orchestration service.
#[derive(Clone)]
pub struct AccountService<G>
where
    G: DataGateway,
{
    gateway: Arc<G>,
}

impl<G> AccountService<G>
where
    G: DataGateway,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Registers a profile for a freshly signed-up user.
    ///
    /// The existence check distinguishes the backend's zero-rows sentinel
    /// (no profile yet, proceed to insert) from genuine failures (abort
    /// without writing). Registration is therefore safe to re-run, e.g.
    /// after a sign-up that was interrupted before the profile insert.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError`] when the display name fails validation,
    /// the existence check fails with a real error, or the insert is
    /// rejected.
    pub async fn register_profile(
        &self,
        user_id: &UserId,
        display_name: &str,
    ) -> AccountResult<RegistrationOutcome> {
        let name = DisplayName::new(display_name)?;

        let filter = Filter::new().eq("id", user_id.as_str());
        match self.gateway.query_one(PROFILES_TABLE, &filter).await {
            Ok(row) => {
                let existing = profile_from_row(&row).map_err(FetchError::from)?;
                Ok(RegistrationOutcome::Existing(existing))
            }
            Err(err) if err.is_no_rows() => {
                let profile = UserProfile::new(user_id.clone(), name, None);
                self.gateway
                    .insert_rows(PROFILES_TABLE, vec![profile_row(&profile)])
                    .await
                    .map_err(|source| AccountError::Register { source })?;
                Ok(RegistrationOutcome::Created(profile))
            }
            Err(source) => Err(AccountError::Fetch(FetchError::Gateway(source))),
        }
    }

    /// Fetches the profile of `user_id`, if one is registered.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Fetch`] when the lookup fails or the stored
    /// row is malformed.
    pub async fn profile(&self, user_id: &UserId) -> AccountResult<Option<UserProfile>> {
        let filter = Filter::new().eq("id", user_id.as_str());
        match self.gateway.query_one(PROFILES_TABLE, &filter).await {
            Ok(row) => {
                let profile = profile_from_row(&row).map_err(FetchError::from)?;
                Ok(Some(profile))
            }
            Err(err) if err.is_no_rows() => Ok(None),
            Err(source) => Err(AccountError::Fetch(FetchError::Gateway(source))),
        }
    }

    /// Replaces the display name of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError`] when validation fails, the update is
    /// rejected, or no profile row exists for the user.
    pub async fn update_display_name(
        &self,
        user_id: &UserId,
        display_name: &str,
    ) -> AccountResult<UserProfile> {
        let name = DisplayName::new(display_name)?;

        let filter = Filter::new().eq("id", user_id.as_str());
        let patch = Row::new().with("display_name", name.as_str());
        let updated = self
            .gateway
            .update_rows(PROFILES_TABLE, &filter, patch)
            .await
            .map_err(|source| AccountError::Update { source })?;

        let row = updated
            .first()
            .ok_or_else(|| AccountError::NotRegistered(user_id.clone()))?;
        let profile = profile_from_row(row).map_err(FetchError::from)?;
        Ok(profile)
    }

    /// Uploads a new avatar and links it to the profile.
    ///
    /// The blob lands in the avatars bucket under `{user_id}/{file_name}`;
    /// the returned URL is what the profile row now points at.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError`] when the upload or the profile update is
    /// rejected, or when no profile row exists for the user.
    pub async fn update_avatar(
        &self,
        user_id: &UserId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> AccountResult<BlobUrl> {
        let path = format!("{user_id}/{file_name}");
        let url = self
            .gateway
            .upload_blob(AVATARS_BUCKET, &path, bytes)
            .await
            .map_err(|source| AccountError::AvatarUpload { source })?;

        let filter = Filter::new().eq("id", user_id.as_str());
        let patch = Row::new().with("avatar_url", url.as_str());
        let updated = self
            .gateway
            .update_rows(PROFILES_TABLE, &filter, patch)
            .await
            .map_err(|source| AccountError::Update { source })?;
        if updated.is_empty() {
            return Err(AccountError::NotRegistered(user_id.clone()));
        }
        Ok(url)
    }
}

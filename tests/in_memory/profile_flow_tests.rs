//! Profile registration and avatar flows.

use crate::in_memory::helpers::{gateway, runtime, seed_profile};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use trellis::gateway::InMemoryGateway;
use trellis::profile::domain::UserId;
use trellis::profile::services::{AccountService, RegistrationOutcome};

/// Tests that registration inserts once and then reuses the stored profile.
#[rstest]
fn registration_is_safe_to_re_run(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    let service = AccountService::new(Arc::clone(&gateway));
    let user = UserId::new("user-1");

    let first = rt.block_on(service.register_profile(&user, "Anna")).expect("first run");
    let second = rt.block_on(service.register_profile(&user, "Anna")).expect("second run");

    assert!(matches!(first, RegistrationOutcome::Created(_)));
    assert!(matches!(second, RegistrationOutcome::Existing(_)));
    assert_eq!(gateway.rows("user_profiles").len(), 1);
}

/// Tests that a display-name change reaches the stored row.
#[rstest]
fn a_renamed_profile_reads_back_renamed(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_profile(&gateway, "user-1", "Anna");
    let service = AccountService::new(Arc::clone(&gateway));
    let user = UserId::new("user-1");

    let updated = rt
        .block_on(service.update_display_name(&user, "Annabel"))
        .expect("rename");

    assert_eq!(updated.display_name().as_str(), "Annabel");
    let fetched = rt.block_on(service.profile(&user)).expect("lookup");
    let profile = fetched.expect("profile exists");
    assert_eq!(profile.display_name().as_str(), "Annabel");
}

/// Tests that an avatar upload stores the blob and links its URL.
#[rstest]
fn an_avatar_upload_links_the_blob_url(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_profile(&gateway, "user-1", "Anna");
    let service = AccountService::new(Arc::clone(&gateway));
    let user = UserId::new("user-1");

    let url = rt
        .block_on(service.update_avatar(&user, "portrait.png", vec![0x89, 0x50]))
        .expect("upload");

    assert_eq!(
        gateway.blob("avatars", "user-1/portrait.png"),
        Some(vec![0x89, 0x50])
    );
    let fetched = rt.block_on(service.profile(&user)).expect("lookup");
    let profile = fetched.expect("profile exists");
    assert_eq!(profile.avatar_url(), Some(url.as_str()));
}

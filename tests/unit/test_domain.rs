use chrono::Utc;
use portfolio_likes::domain::{
    like::{
        errors::{FailureCategory, LikeError, StoreError},
        record::{Identity, IdentityKey, LikeRecord},
        state::{LikePhase, UiState},
    },
    shared::tween::format_count,
};

#[test]
fn identity_key_is_store_safe() {
    let key = IdentityKey::from_contact_address("first.last@mail.example.org");
    assert_eq!(key.as_str(), "first_last@mail_example_org");
    assert!(!key.as_str().contains(['.', '#', '$', '/', '[', ']']));
}

#[test]
fn record_key_follows_contact_address() {
    let identity = Identity::new(None, "Visitor@Example.com".to_string(), None);
    let record = LikeRecord::new(&identity, Utc::now());
    assert_eq!(record.identity_key, IdentityKey::from_contact_address("visitor@example.com"));
    assert_eq!(record.display_name, "Anonymous");
}

#[test]
fn every_failure_category_has_a_message() {
    for category in [
        FailureCategory::AuthCancelled,
        FailureCategory::AuthBlocked,
        FailureCategory::AlreadyLiked,
        FailureCategory::WriteFailed,
        FailureCategory::Network,
        FailureCategory::Unknown,
    ] {
        assert!(!category.message().is_empty());
    }
}

#[test]
fn write_failure_is_distinct_from_read_failure() {
    let err = StoreError::Infrastructure("boom".to_string());
    assert_ne!(
        LikeError::StoreWriteFailed(err.clone()).category(),
        LikeError::StoreReadFailed(err).category()
    );
}

#[test]
fn loading_phases_share_one_ui_state() {
    assert_eq!(LikePhase::Writing.ui_state(), UiState::Loading);
    assert_eq!(LikePhase::Liked.ui_state(), UiState::Liked);
    assert!(!LikePhase::NotLiked.is_busy());
}

#[test]
fn count_format_switches_units() {
    assert_eq!(format_count(42), "42");
    assert_eq!(format_count(1_000), "1.0k");
    assert_eq!(format_count(1_000_000), "1.0M");
}

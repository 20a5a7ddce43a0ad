use super::helpers::{FaultyStore, Harness, ScriptedIdentity, identity, record};
use portfolio_likes::{
    application::like::dto::ActivationOutcome,
    domain::like::{repository::LikeStore, state::UiState},
};
use std::sync::{Arc, atomic::Ordering};

#[tokio::test]
async fn returning_visitor_starts_liked_without_any_write() {
    let store = Arc::new(FaultyStore::seeded(3));
    store
        .inner
        .create_if_absent(&record("a@example.com"))
        .await
        .unwrap();
    let h = Harness::new(
        ScriptedIdentity::signs_in(identity("a@example.com")).with_session(identity("a@example.com")),
        store.clone(),
    );

    h.controller.initialize().await;

    assert_eq!(h.controller.ui_state(), UiState::Liked);
    h.assert_buttons_show(UiState::Liked);
    assert_eq!(h.controller.snapshot().count, 4);
    assert_eq!(h.identity.calls(), 0);
    assert_eq!(store.creates(), 0);

    assert_eq!(h.controller.on_activate().await, ActivationOutcome::AlreadyLiked);
    assert_eq!(store.creates(), 0);
}

#[tokio::test]
async fn signed_in_visitor_without_record_starts_not_liked() {
    let store = Arc::new(FaultyStore::seeded(3));
    let h = Harness::ready(
        ScriptedIdentity::signs_in(identity("b@example.com")).with_session(identity("b@example.com")),
        store.clone(),
    )
    .await;

    assert_eq!(h.controller.ui_state(), UiState::NotLiked);
    assert_eq!(store.exists_checks(), 1);
}

#[tokio::test]
async fn buttons_pass_through_loading_with_placeholder() {
    let store = Arc::new(FaultyStore::seeded(7));
    let h = Harness::ready(
        ScriptedIdentity::signs_in(identity("a@example.com")),
        store,
    )
    .await;

    for view in &h.views {
        let states = view.states.lock().unwrap().clone();
        assert_eq!(states, vec![UiState::Loading, UiState::NotLiked]);
        let counts = view.counts.lock().unwrap().clone();
        assert_eq!(counts, vec!["...".to_string(), "7".to_string()]);
    }
}

#[tokio::test]
async fn unreachable_count_shows_zero_and_stays_interactive() {
    let store = Arc::new(FaultyStore::seeded(3));
    store.fail_count.store(true, Ordering::SeqCst);
    let h = Harness::ready(
        ScriptedIdentity::signs_in(identity("a@example.com")),
        store.clone(),
    )
    .await;

    assert_eq!(h.controller.ui_state(), UiState::NotLiked);
    assert_eq!(h.views[2].last_count().as_deref(), Some("0"));
    assert_eq!(h.controller.snapshot().count, 0);

    store.fail_count.store(false, Ordering::SeqCst);
    assert_eq!(h.controller.on_activate().await, ActivationOutcome::Liked);
    assert_eq!(h.views[2].last_count().as_deref(), Some("4"));
}

#[tokio::test]
async fn failed_session_check_degrades_to_not_liked() {
    let store = Arc::new(FaultyStore::seeded(1));
    store.fail_exists.store(true, Ordering::SeqCst);
    let h = Harness::ready(
        ScriptedIdentity::signs_in(identity("a@example.com")).with_session(identity("a@example.com")),
        store,
    )
    .await;

    assert_eq!(h.controller.ui_state(), UiState::NotLiked);
    assert_eq!(h.controller.snapshot().count, 1);
}

#[tokio::test]
async fn second_initialize_is_refused() {
    let store = Arc::new(FaultyStore::seeded(1));
    let h = Harness::ready(
        ScriptedIdentity::signs_in(identity("a@example.com")),
        store.clone(),
    )
    .await;
    assert_eq!(h.controller.on_activate().await, ActivationOutcome::Liked);

    h.controller.initialize().await;

    assert_eq!(h.controller.ui_state(), UiState::Liked);
    h.assert_buttons_show(UiState::Liked);
}

#[tokio::test]
async fn page_without_buttons_is_left_alone() {
    use portfolio_likes::application::like::use_case::LikeController;
    use portfolio_likes::presentation::view::ViewSet;

    let store = Arc::new(FaultyStore::seeded(1));
    let (notifier, _rx) = super::helpers::ChannelNotifier::new(false);
    let controller = LikeController::new(
        Arc::new(ScriptedIdentity::signs_in(identity("a@example.com"))),
        store.clone(),
        Arc::new(notifier),
        ViewSet::default(),
        Arc::new(super::helpers::RecordingToaster::default()),
        super::helpers::test_settings(),
    );

    controller.initialize().await;

    assert_eq!(controller.ui_state(), UiState::Unknown);
    assert_eq!(store.exists_checks(), 0);
    assert_eq!(controller.on_activate().await, ActivationOutcome::Ignored);
}

#[tokio::test(start_paused = true)]
async fn unresponsive_store_settles_to_not_liked_with_zero() {
    let store = Arc::new(FaultyStore::seeded(3));
    store.hang_count.store(true, Ordering::SeqCst);
    store.hang_exists.store(true, Ordering::SeqCst);
    let h = Harness::ready(
        ScriptedIdentity::signs_in(identity("a@example.com")).with_session(identity("a@example.com")),
        store.clone(),
    )
    .await;

    assert_eq!(h.controller.ui_state(), UiState::NotLiked);
    h.assert_buttons_show(UiState::NotLiked);
    for view in &h.views {
        assert_eq!(view.last_count().as_deref(), Some("0"));
    }
    assert_eq!(store.exists_checks(), 1);
}

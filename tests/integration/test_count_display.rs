use super::helpers::{
    ChannelNotifier, FaultyStore, Harness, RecordingToaster, RecordingView, ScriptedIdentity,
    identity, test_settings,
};
use async_trait::async_trait;
use portfolio_likes::{
    application::like::{
        count_animator::CountAnimator, dto::ActivationOutcome, use_case::LikeController,
    },
    domain::like::{
        errors::StoreError,
        record::{IdentityKey, LikeRecord},
        repository::{CreateOutcome, LikeStore},
    },
    presentation::view::{LikeButtonView, ViewSet},
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

/// First count read is slow and stale; every later one answers at once.
struct LaggingCountStore {
    reads: AtomicUsize,
}

#[async_trait]
impl LikeStore for LaggingCountStore {
    async fn exists(&self, _key: &IdentityKey) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn create_if_absent(&self, _record: &LikeRecord) -> Result<CreateOutcome, StoreError> {
        Ok(CreateOutcome::Created)
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        if self.reads.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(200)).await;
            return Ok(5);
        }
        Ok(7)
    }
}

fn parse(counts: &[String]) -> Vec<u64> {
    counts
        .iter()
        .filter_map(|c| c.parse::<u64>().ok())
        .collect()
}

fn animator(view: &Arc<RecordingView>) -> CountAnimator {
    CountAnimator::new(
        ViewSet::new(vec![view.clone() as Arc<dyn LikeButtonView>]),
        Duration::from_millis(500),
        Duration::from_millis(16),
    )
}

#[tokio::test(start_paused = true)]
async fn count_eases_up_to_target() {
    let view = Arc::new(RecordingView::default());
    let counter = animator(&view);

    let task = counter.animate_to(40).expect("expected an animation");
    task.await.unwrap();

    let values = parse(&view.counts.lock().unwrap());
    assert!(values.len() > 2, "expected intermediate frames, got {:?}", values);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(values.last(), Some(&40));
    assert_eq!(counter.displayed(), 40);
}

#[tokio::test(start_paused = true)]
async fn latest_target_wins() {
    let view = Arc::new(RecordingView::default());
    let counter = animator(&view);

    let first = counter.animate_to(100).expect("expected an animation");
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = counter.animate_to(200).expect("expected an animation");
    first.await.unwrap();
    second.await.unwrap();

    let values = parse(&view.counts.lock().unwrap());
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(values.last(), Some(&200));
    assert_eq!(counter.target(), 200);
}

#[tokio::test(start_paused = true)]
async fn lower_target_is_approached_without_undershoot() {
    let view = Arc::new(RecordingView::default());
    let counter = animator(&view);
    counter.set_immediate(30);

    counter.animate_to(25).expect("expected an animation").await.unwrap();

    let values = parse(&view.counts.lock().unwrap());
    assert!(values.iter().all(|v| *v >= 25));
    assert_eq!(values.last(), Some(&25));
}

#[tokio::test]
async fn large_counts_are_abbreviated() {
    let view = Arc::new(RecordingView::default());
    let counter = animator(&view);

    counter.set_immediate(1_200);

    assert_eq!(view.last_count().as_deref(), Some("1.2k"));
    assert!(counter.animate_to(1_200).is_none());
}

#[tokio::test(start_paused = true)]
async fn like_animates_every_button_to_new_count() {
    let settings = portfolio_likes::application::like::dto::LikeSettings {
        count_animation: Duration::from_millis(500),
        ..test_settings()
    };
    let h = Harness::build(
        ScriptedIdentity::signs_in(identity("a@example.com")),
        Arc::new(FaultyStore::seeded(9)),
        false,
        settings,
    );
    h.controller.initialize().await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(h.controller.on_activate().await, ActivationOutcome::Liked);
    tokio::time::sleep(Duration::from_secs(1)).await;

    for view in &h.views {
        let values = parse(&view.counts.lock().unwrap());
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(values.last(), Some(&10));
    }
    assert_eq!(h.controller.snapshot().count_display, "10");
}

#[tokio::test(start_paused = true)]
async fn slow_count_read_does_not_overwrite_newer_refresh() {
    let view = Arc::new(RecordingView::default());
    let (notifier, _notifications) = ChannelNotifier::new(false);
    let controller = LikeController::new(
        Arc::new(ScriptedIdentity::signs_in(identity("a@example.com"))),
        Arc::new(LaggingCountStore {
            reads: AtomicUsize::new(0),
        }),
        Arc::new(notifier),
        ViewSet::new(vec![view.clone() as Arc<dyn LikeButtonView>]),
        Arc::new(RecordingToaster::default()),
        test_settings(),
    );

    let (stale, fresh) = tokio::join!(controller.refresh_count(), controller.refresh_count());

    assert_eq!(stale, None);
    assert_eq!(fresh, Some(7));
    assert_eq!(controller.snapshot().count, 7);
    assert_eq!(view.last_count().as_deref(), Some("7"));
}

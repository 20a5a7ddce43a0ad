use crate::domain::shared::tween::{Tween, format_count};
use crate::presentation::view::ViewSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const COUNT_PLACEHOLDER: &str = "...";

#[derive(Debug, Default)]
struct Frame {
    generation: u64,
    shown: u64,
    target: u64,
}

/// Drives every bound count display toward the latest known like count.
///
/// Each call to `animate_to` supersedes the previous one; a superseded
/// animation stops at its next frame and the new one starts from whatever
/// value is on screen.
#[derive(Clone)]
pub struct CountAnimator {
    views: ViewSet,
    duration: Duration,
    frame_interval: Duration,
    frame: Arc<Mutex<Frame>>,
}

impl CountAnimator {
    pub fn new(views: ViewSet, duration: Duration, frame_interval: Duration) -> Self {
        Self {
            views,
            duration,
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            frame: Arc::new(Mutex::new(Frame::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Frame> {
        self.frame.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn show_placeholder(&self) {
        let mut frame = self.lock();
        frame.generation += 1;
        self.views.render_count(COUNT_PLACEHOLDER);
    }

    pub fn set_immediate(&self, value: u64) {
        let mut frame = self.lock();
        frame.generation += 1;
        frame.shown = value;
        frame.target = value;
        self.views.render_count(&format_count(value));
    }

    /// Last value written to the displays.
    pub fn displayed(&self) -> u64 {
        self.lock().shown
    }

    pub fn target(&self) -> u64 {
        self.lock().target
    }

    /// Start animating toward `target`. Returns the animation task, or `None`
    /// when the value was applied immediately.
    pub fn animate_to(&self, target: u64) -> Option<JoinHandle<()>> {
        let (generation, from) = {
            let mut frame = self.lock();
            frame.generation += 1;
            frame.target = target;
            if self.duration.is_zero() || frame.shown == target {
                frame.shown = target;
                self.views.render_count(&format_count(target));
                return None;
            }
            (frame.generation, frame.shown)
        };

        let animator = self.clone();
        Some(tokio::spawn(async move {
            animator.run(generation, Tween::new(from, target, animator.duration)).await;
        }))
    }

    async fn run(&self, generation: u64, tween: Tween) {
        let started = Instant::now();
        let mut ticker = tokio::time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let elapsed = started.elapsed();
            let value = tween.value_at(elapsed);
            {
                let mut frame = self.lock();
                if frame.generation != generation {
                    return;
                }
                frame.shown = value;
                self.views.render_count(&format_count(value));
            }
            if tween.is_finished(elapsed) {
                return;
            }
        }
    }
}

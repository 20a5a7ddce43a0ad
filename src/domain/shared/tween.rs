use std::time::Duration;

pub fn ease_out_quad(progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Integer interpolation from `from` to `to` over `duration`.
///
/// Frames are floored, so the value moves monotonically toward `to` and never
/// passes it, whichever direction it travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    pub from: u64,
    pub to: u64,
    pub duration: Duration,
}

impl Tween {
    pub fn new(from: u64, to: u64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, elapsed: Duration) -> u64 {
        let progress = self.progress(elapsed);
        if progress >= 1.0 {
            return self.to;
        }
        let eased = ease_out_quad(progress);
        let from = self.from as f64;
        let delta = self.to as f64 - from;
        (from + delta * eased).floor() as u64
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }
}

/// Compact display form: `999`, `1.2k`, `3.4M`.
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

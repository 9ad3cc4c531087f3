//! Eased image-fit animation.
//!
//! When a freshly loaded image is fitted to the viewport, the view and image
//! sizes ease from their current values to the fitted values over a fixed
//! duration. The animation is a pure sampler driven by the host's frame
//! callback; dropping it (or replacing it with a newer one) cancels it.

use std::time::{Duration, Instant};

use crate::geometry::Size;

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Bounded-duration size interpolation with rounded, min-1 samples.
#[derive(Clone, Copy, Debug)]
pub struct ResizeAnimation {
    from: Size,
    to: Size,
    started: Instant,
    duration: Duration,
}

impl ResizeAnimation {
    pub fn new(from: Size, to: Size, started: Instant, duration: Duration) -> Self {
        Self { from, to, started, duration }
    }

    /// Size at `now`, eased and rounded to whole units (never below 1).
    pub fn sample(&self, now: Instant) -> Size {
        let t = self.progress(now);
        let e = ease_out_cubic(t);
        Size::new(
            (self.from.w + (self.to.w - self.from.w) * e).round().max(1.0),
            (self.from.h + (self.to.h - self.from.h) * e).round().max(1.0),
        )
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn target(&self) -> Size {
        self.to
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

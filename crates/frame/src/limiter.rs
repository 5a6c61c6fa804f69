use crate::clock::Clock;
use std::time::Duration;

/// Caps the loop at a target rate by sleeping until the next frame deadline.
///
/// A scheduling hint only: frames that overrun are not made up for, the
/// deadline restarts from the current time instead.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    target_fps: u32,
    frame_budget: Duration,
    next_deadline: Option<Duration>,
}

impl FrameLimiter {
    /// `target_fps` of 0 disables the cap.
    pub fn new(target_fps: u32) -> Self {
        let frame_budget = if target_fps > 0 {
            Duration::from_secs(1) / target_fps
        } else {
            Duration::ZERO
        };
        Self {
            target_fps,
            frame_budget,
            next_deadline: None,
        }
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Start a new cadence: the next deadline is one budget after `now`.
    pub fn reset(&mut self, now: Duration) {
        self.next_deadline = Some(now + self.frame_budget);
    }

    /// Sleep until the current deadline and schedule the next one.
    /// Returns how long it slept.
    pub fn wait(&mut self, clock: &impl Clock) -> Duration {
        let now = clock.now();
        let deadline = self.next_deadline.unwrap_or(now + self.frame_budget);

        if now < deadline {
            let pause = deadline - now;
            clock.sleep(pause);
            self.next_deadline = Some(deadline + self.frame_budget);
            pause
        } else {
            if self.frame_budget > Duration::ZERO {
                tracing::trace!(overrun = ?(now - deadline), "frame over budget");
            }
            self.next_deadline = Some(now + self.frame_budget);
            Duration::ZERO
        }
    }
}

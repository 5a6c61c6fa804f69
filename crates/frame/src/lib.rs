//! Frame loop: sequences timing, input, camera update and render submission.
//!
//! # Invariants
//! - One thread, one iteration at a time, in the fixed order
//!   clock → input → camera → submit → present → throttle.
//! - Termination is checked once, at the top of each iteration.
//! - Movement scales linearly with frame time; rotation does not.

pub mod clock;
pub mod frame_loop;
pub mod limiter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frame_loop::{ExitReason, FrameLoop, FrameLoopState, FrameStats};
pub use limiter::FrameLimiter;

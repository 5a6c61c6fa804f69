use crate::key::Key;
use std::collections::{BTreeSet, VecDeque};

/// The input contract the frame loop polls once per iteration.
pub trait Input {
    /// Refresh key and mouse state. Mouse deltas reset on every poll.
    fn poll(&mut self);

    /// Whether `key` was held at the last poll.
    fn is_key_down(&self, key: Key) -> bool;

    /// Horizontal mouse motion since the previous poll, in pixels.
    fn mouse_delta_x(&self) -> f32;

    /// Vertical mouse motion since the previous poll, in pixels.
    /// Positive values mean the mouse moved toward the user.
    fn mouse_delta_y(&self) -> f32;

    /// Confine and hide the cursor so mouse motion drives look rotation.
    fn set_cursor_grabbed(&mut self, grabbed: bool);
}

/// Input state observed by one poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub keys: BTreeSet<Key>,
    pub mouse_dx: f32,
    pub mouse_dy: f32,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a held key.
    pub fn with_key(mut self, key: Key) -> Self {
        self.keys.insert(key);
        self
    }

    /// Set the mouse motion for this frame.
    pub fn with_mouse(mut self, dx: f32, dy: f32) -> Self {
        self.mouse_dx = dx;
        self.mouse_dy = dy;
        self
    }
}

/// Deterministic input that replays a queue of frames, one per poll.
///
/// Once the queue runs dry every poll yields an empty frame.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pending: VecDeque<InputFrame>,
    current: InputFrame,
    cursor_grabbed: bool,
    polls: u64,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            pending: frames.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queue another frame after the existing ones.
    pub fn push(&mut self, frame: InputFrame) {
        self.pending.push_back(frame);
    }

    /// Frames not yet consumed by `poll`.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn cursor_grabbed(&self) -> bool {
        self.cursor_grabbed
    }

    /// Number of `poll` calls so far.
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl Input for ScriptedInput {
    fn poll(&mut self) {
        self.current = self.pending.pop_front().unwrap_or_default();
        self.polls += 1;
        tracing::trace!(poll = self.polls, keys = ?self.current.keys, "scripted input polled");
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.current.keys.contains(&key)
    }

    fn mouse_delta_x(&self) -> f32 {
        self.current.mouse_dx
    }

    fn mouse_delta_y(&self) -> f32 {
        self.current.mouse_dy
    }

    fn set_cursor_grabbed(&mut self, grabbed: bool) {
        self.cursor_grabbed = grabbed;
    }
}

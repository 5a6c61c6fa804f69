//! Input: the polling contract the frame loop reads from, and the mapping
//! from held keys and mouse motion to camera commands.
//!
//! # Invariants
//! - Input state only changes inside `Input::poll`.
//! - Mouse deltas are the motion accumulated since the previous poll.
//! - Opposite keys held together cancel on their axis.

pub mod command;
pub mod key;
pub mod source;

pub use command::CameraCommand;
pub use key::Key;
pub use source::{Input, InputFrame, ScriptedInput};

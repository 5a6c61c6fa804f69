//! Camera: position, Euler rotation and projection state, plus the math that
//! turns movement and look commands into new camera state.
//!
//! # Invariants
//! - Pure state and math; no I/O, no GPU calls.
//! - Rotation angles accumulate without wrap or clamp.
//! - Translation ignores pitch: forward and strafe motion stay on the X/Z plane.
//! - The view transform applies pitch (X), yaw (Y), roll (Z), then the translation.

mod camera;

pub use camera::{Camera, CameraError, MoveDirection};

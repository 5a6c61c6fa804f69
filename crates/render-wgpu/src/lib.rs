//! wgpu render backend and winit input for the frame loop.
//!
//! Opens one window, renders the static cube scene with the submitted camera
//! transform, and reports keyboard and raw mouse motion through the `Input`
//! contract. The winit event loop is pumped from `Input::poll`, so the frame
//! loop keeps control of the cadence.
//!
//! # Invariants
//! - Only `open` can fail, and it fails with `SurfaceInitError`.
//! - The window is not resizable; the camera aspect ratio is fixed at startup.
//! - Desktop platforms only (event-loop pumping is unavailable on the web).

mod bindings;
mod gpu;
mod shaders;
mod window;

pub use bindings::KeyBindings;
pub use gpu::WgpuRenderer;
pub use window::{WindowDisplay, WindowInput, open};

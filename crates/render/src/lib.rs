//! Rendering adapter: the display contract the frame loop submits to.
//!
//! # Invariants
//! - A display never mutates camera state; it only consumes transforms.
//! - The scene is static: the same mesh is submitted every frame.
//! - Surface creation is the only fallible step and yields `SurfaceInitError`.

mod display;
mod error;
mod mesh;

pub use display::{Display, HeadlessDisplay, RenderTransform};
pub use error::SurfaceInitError;
pub use mesh::{Mesh, Vertex};

pub fn crate_info() -> &'static str {
    "freelook-render v0.1.0"
}

use crate::mesh::Mesh;
use glam::{Mat4, Vec3};

/// Transform state handed to a display each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    /// Camera view transform (rotate, then translate).
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for RenderTransform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

impl RenderTransform {
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Display-agnostic interface. All render surfaces implement this trait.
///
/// Creating a surface is backend-specific and is the only fallible step; it
/// returns `SurfaceInitError`. Once created, a display never fails the loop.
pub trait Display {
    /// Queue one frame of the static scene under `transform`.
    fn submit(&mut self, transform: &RenderTransform, scene: &Mesh);

    /// Show the submitted frame.
    fn present(&mut self);

    /// Whether the user asked the surface to close.
    fn is_close_requested(&self) -> bool;

    /// Release the surface. Further calls are no-ops.
    fn destroy(&mut self);
}

/// Display without a window.
///
/// Records each submitted transform and can request close after a fixed
/// number of presents. Useful for CLI output, logging, and testing the loop.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    submitted: Vec<RenderTransform>,
    presents: u64,
    close_after: Option<u64>,
    close_requested: bool,
    destroyed: bool,
    scene_indices: u32,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request close once `frames` presents have happened.
    pub fn close_after(frames: u64) -> Self {
        Self {
            close_after: Some(frames),
            close_requested: frames == 0,
            ..Self::default()
        }
    }

    /// Simulate the window's close button.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn submitted(&self) -> &[RenderTransform] {
        &self.submitted
    }

    pub fn last_submitted(&self) -> Option<&RenderTransform> {
        self.submitted.last()
    }

    pub fn presents(&self) -> u64 {
        self.presents
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Human-readable description of the most recent frame.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (submitted={}, scene indices={}) ===\n",
            self.presents,
            self.submitted.len(),
            self.scene_indices
        ));
        match self.submitted.last() {
            Some(t) => {
                // camera sits at the inverse of the view translation
                let eye = t.view.inverse().transform_point3(Vec3::ZERO);
                let ahead = t.view.inverse().transform_vector3(Vec3::NEG_Z);
                out.push_str(&format!(
                    "Camera: eye=({:.2}, {:.2}, {:.2}) looking=({:.2}, {:.2}, {:.2})\n",
                    eye.x, eye.y, eye.z, ahead.x, ahead.y, ahead.z
                ));
            }
            None => out.push_str("Camera: (nothing submitted)\n"),
        }
        out
    }
}

impl Display for HeadlessDisplay {
    fn submit(&mut self, transform: &RenderTransform, scene: &Mesh) {
        if self.destroyed {
            return;
        }
        self.scene_indices = scene.index_count();
        self.submitted.push(*transform);
    }

    fn present(&mut self) {
        if self.destroyed {
            return;
        }
        self.presents += 1;
        if self.close_after.is_some_and(|n| self.presents >= n) {
            self.close_requested = true;
        }
    }

    fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            tracing::debug!(presents = self.presents, "headless display destroyed");
            self.destroyed = true;
        }
    }
}

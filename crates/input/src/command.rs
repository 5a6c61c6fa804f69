use crate::key::Key;
use crate::source::Input;
use freelook_camera::{Camera, MoveDirection};
use freelook_common::Config;

/// One frame's worth of camera motion derived from input.
///
/// Distances are signed and already scaled by frame time. Sign convention
/// follows the translate-by-position view transform: `Forward` is positive on
/// the forward axis, `Right` and `Up` are negative on theirs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraCommand {
    pub forward: f32,
    pub strafe: f32,
    pub vertical: f32,
    /// Degrees, driven by vertical mouse motion (inverted).
    pub delta_pitch: f32,
    /// Degrees, driven by horizontal mouse motion.
    pub delta_yaw: f32,
}

impl CameraCommand {
    /// Read the current input state for a frame that lasted `delta_ms`.
    pub fn from_input(input: &impl Input, delta_ms: u64, config: &Config) -> Self {
        let distance = config.move_speed * delta_ms as f32;
        let axis = |positive: Key, negative: Key| {
            let mut value = 0.0;
            if input.is_key_down(positive) {
                value += distance;
            }
            if input.is_key_down(negative) {
                value -= distance;
            }
            value
        };

        Self {
            forward: axis(Key::Forward, Key::Back),
            strafe: axis(Key::Left, Key::Right),
            vertical: axis(Key::Down, Key::Up),
            delta_pitch: -input.mouse_delta_y() * config.mouse_sensitivity,
            delta_yaw: input.mouse_delta_x() * config.mouse_sensitivity,
        }
    }

    /// True when applying this command would leave the camera untouched.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Translate first (using the yaw held before this frame), then rotate.
    /// Roll is never driven by input.
    pub fn apply(&self, camera: &mut Camera) {
        for (distance, direction) in [
            (self.forward, MoveDirection::Forward),
            (self.strafe, MoveDirection::Strafe),
            (self.vertical, MoveDirection::Vertical),
        ] {
            if distance != 0.0 {
                camera.move_by(distance, direction);
            }
        }
        camera.rotate_by(self.delta_pitch, self.delta_yaw, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InputFrame, ScriptedInput};
    use glam::Vec3;

    fn polled(frame: InputFrame) -> ScriptedInput {
        let mut input = ScriptedInput::new([frame]);
        input.poll();
        input
    }

    fn config() -> Config {
        Config {
            move_speed: 0.5,
            mouse_sensitivity: 0.25,
            ..Config::default()
        }
    }

    #[test]
    fn distance_scales_with_frame_time() {
        let input = polled(InputFrame::new().with_key(Key::Forward));
        let short = CameraCommand::from_input(&input, 10, &config());
        let long = CameraCommand::from_input(&input, 20, &config());
        assert_eq!(short.forward, 5.0);
        assert_eq!(long.forward, 10.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let input = polled(
            InputFrame::new()
                .with_key(Key::Forward)
                .with_key(Key::Back)
                .with_key(Key::Left)
                .with_key(Key::Right)
                .with_key(Key::Up)
                .with_key(Key::Down),
        );
        let cmd = CameraCommand::from_input(&input, 16, &config());
        assert!(cmd.is_idle());

        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), 70.0, 1.0, 0.3, 100.0).unwrap();
        cmd.apply(&mut cam);
        assert_eq!(cam.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn key_signs() {
        let right = polled(InputFrame::new().with_key(Key::Right));
        assert_eq!(CameraCommand::from_input(&right, 2, &config()).strafe, -1.0);

        let up = polled(InputFrame::new().with_key(Key::Up));
        assert_eq!(CameraCommand::from_input(&up, 2, &config()).vertical, -1.0);

        let back = polled(InputFrame::new().with_key(Key::Back));
        assert_eq!(CameraCommand::from_input(&back, 2, &config()).forward, -1.0);
    }

    #[test]
    fn mouse_maps_to_inverted_pitch_and_yaw() {
        let input = polled(InputFrame::new().with_mouse(8.0, 4.0));
        let cmd = CameraCommand::from_input(&input, 16, &config());
        assert_eq!(cmd.delta_yaw, 2.0);
        assert_eq!(cmd.delta_pitch, -1.0);

        let mut cam = Camera::new(Vec3::ZERO, 70.0, 1.0, 0.3, 100.0).unwrap();
        cmd.apply(&mut cam);
        assert_eq!(cam.rotation(), Vec3::new(-1.0, 2.0, 0.0));
    }

    #[test]
    fn movement_uses_yaw_from_before_the_frame() {
        let input = polled(InputFrame::new().with_key(Key::Forward).with_mouse(360.0, 0.0));
        let cmd = CameraCommand::from_input(&input, 2, &config());

        let mut cam = Camera::new(Vec3::ZERO, 70.0, 1.0, 0.3, 100.0).unwrap();
        cmd.apply(&mut cam);
        // yaw was 0 while moving, so the step lands on +Z
        assert!(cam.position().x.abs() < 1e-5);
        assert!((cam.position().z - 1.0).abs() < 1e-5);
        assert_eq!(cam.rotation().y, 90.0);
    }

    #[test]
    fn zero_delta_means_no_translation() {
        let input = polled(InputFrame::new().with_key(Key::Forward));
        let cmd = CameraCommand::from_input(&input, 0, &config());
        assert_eq!(cmd.forward, 0.0);
    }
}

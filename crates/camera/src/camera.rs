use freelook_common::Config;
use glam::{Mat4, Vec3};

/// Errors from constructing or reconfiguring a [`Camera`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("invalid camera parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Axis a [`Camera::move_by`] call translates along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Sideways, relative to yaw.
    Strafe,
    /// Ahead, relative to yaw.
    Forward,
    /// World Y, independent of any rotation.
    Vertical,
}

impl MoveDirection {
    /// Multiple of 90° added to yaw before taking cos/sin.
    /// `None` for vertical motion, which has no angular component.
    pub fn offset(self) -> Option<f32> {
        match self {
            MoveDirection::Strafe => Some(0.0),
            MoveDirection::Forward => Some(1.0),
            MoveDirection::Vertical => None,
        }
    }
}

/// Perspective camera with Euler rotation in degrees.
///
/// `rotation` holds (pitch, yaw, roll) as (x, y, z). Angles are never wrapped,
/// so they may grow past ±360° indefinitely.
///
/// The projection matrix is cached and rebuilt by every projection setter.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    field_of_view: f32,
    aspect_ratio: f32,
    near_clip: f32,
    far_clip: f32,
    projection: Mat4,
}

impl Camera {
    /// Create a camera at `position` with zero rotation.
    ///
    /// `field_of_view` is the vertical FOV in degrees and must lie in (0, 180).
    /// Clip planes must satisfy `0 < near_clip < far_clip`.
    pub fn new(
        position: Vec3,
        field_of_view: f32,
        aspect_ratio: f32,
        near_clip: f32,
        far_clip: f32,
    ) -> Result<Self, CameraError> {
        check_field_of_view(field_of_view)?;
        check_aspect_ratio(aspect_ratio)?;
        check_clip_planes(near_clip, far_clip)?;

        let mut camera = Self {
            position,
            rotation: Vec3::ZERO,
            field_of_view,
            aspect_ratio,
            near_clip,
            far_clip,
            projection: Mat4::IDENTITY,
        };
        camera.recompute_projection();
        tracing::debug!(
            ?position,
            field_of_view,
            aspect_ratio,
            near_clip,
            far_clip,
            "camera created"
        );
        Ok(camera)
    }

    /// Camera at the configured start position with the configured projection.
    pub fn from_config(config: &Config) -> Result<Self, CameraError> {
        Self::new(
            config.start_position,
            config.field_of_view,
            config.aspect_ratio(),
            config.near_clip,
            config.far_clip,
        )
    }

    /// Translate along a camera-relative axis.
    ///
    /// Planar motion uses yaw only: moving forward while pitched up or down
    /// still moves on the X/Z plane.
    pub fn move_by(&mut self, distance: f32, direction: MoveDirection) {
        match direction.offset() {
            Some(offset) => {
                let angle = (self.rotation.y + 90.0 * offset).to_radians();
                self.position.x += distance * angle.cos();
                self.position.z += distance * angle.sin();
            }
            None => self.position.y += distance,
        }
    }

    /// Add to the (pitch, yaw, roll) angles, in degrees.
    pub fn rotate_by(&mut self, delta_pitch: f32, delta_yaw: f32, delta_roll: f32) {
        self.rotation += Vec3::new(delta_pitch, delta_yaw, delta_roll);
    }

    /// `Rx(pitch) * Ry(yaw) * Rz(roll) * T(position)`.
    ///
    /// Rotation is applied before translation, which makes the camera orbit
    /// its own position rather than the world origin.
    pub fn current_view_transform(&self) -> Mat4 {
        let Vec3 {
            x: pitch,
            y: yaw,
            z: roll,
        } = self.rotation;
        Mat4::from_rotation_x(pitch.to_radians())
            * Mat4::from_rotation_y(yaw.to_radians())
            * Mat4::from_rotation_z(roll.to_radians())
            * Mat4::from_translation(self.position)
    }

    /// Cached perspective projection (right-handed, depth 0..1).
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// (pitch, yaw, roll) in degrees.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn set_field_of_view(&mut self, field_of_view: f32) -> Result<(), CameraError> {
        check_field_of_view(field_of_view)?;
        self.field_of_view = field_of_view;
        self.recompute_projection();
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> Result<(), CameraError> {
        check_aspect_ratio(aspect_ratio)?;
        self.aspect_ratio = aspect_ratio;
        self.recompute_projection();
        Ok(())
    }

    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    pub fn set_near_clip(&mut self, near_clip: f32) -> Result<(), CameraError> {
        check_clip_planes(near_clip, self.far_clip)?;
        self.near_clip = near_clip;
        self.recompute_projection();
        Ok(())
    }

    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }

    pub fn set_far_clip(&mut self, far_clip: f32) -> Result<(), CameraError> {
        check_clip_planes(self.near_clip, far_clip)?;
        self.far_clip = far_clip;
        self.recompute_projection();
        Ok(())
    }

    fn recompute_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.field_of_view.to_radians(),
            self.aspect_ratio,
            self.near_clip,
            self.far_clip,
        );
    }
}

fn check_field_of_view(value: f32) -> Result<(), CameraError> {
    if value > 0.0 && value < 180.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidParameter {
            name: "field_of_view",
            value,
            reason: "must lie in (0, 180) degrees",
        })
    }
}

fn check_aspect_ratio(value: f32) -> Result<(), CameraError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidParameter {
            name: "aspect_ratio",
            value,
            reason: "must be positive and finite",
        })
    }
}

fn check_clip_planes(near: f32, far: f32) -> Result<(), CameraError> {
    if !(near.is_finite() && near > 0.0) {
        return Err(CameraError::InvalidParameter {
            name: "near_clip",
            value: near,
            reason: "must be positive and finite",
        });
    }
    if !(far.is_finite() && far > near) {
        return Err(CameraError::InvalidParameter {
            name: "far_clip",
            value: far,
            reason: "must be finite and beyond the near clip plane",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
    }

    fn origin_camera() -> Camera {
        Camera::new(Vec3::ZERO, 70.0, 16.0 / 9.0, 0.3, 1000.0).unwrap()
    }

    #[test]
    fn new_camera_has_zero_rotation() {
        let cam = origin_camera();
        assert_eq!(cam.rotation(), Vec3::ZERO);
        assert_eq!(cam.field_of_view(), 70.0);
        assert_eq!(cam.near_clip(), 0.3);
        assert_eq!(cam.far_clip(), 1000.0);
    }

    #[test]
    fn from_config_uses_start_position() {
        let config = Config::default();
        let cam = Camera::from_config(&config).unwrap();
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, -10.0));
        assert!(approx(cam.aspect_ratio(), 16.0 / 9.0));
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(Camera::new(Vec3::ZERO, 0.0, 1.0, 0.3, 10.0).is_err());
        assert!(Camera::new(Vec3::ZERO, 180.0, 1.0, 0.3, 10.0).is_err());
        assert!(Camera::new(Vec3::ZERO, 70.0, 0.0, 0.3, 10.0).is_err());
        assert!(Camera::new(Vec3::ZERO, 70.0, 1.0, 0.0, 10.0).is_err());
        assert!(Camera::new(Vec3::ZERO, 70.0, 1.0, 10.0, 10.0).is_err());
        assert!(Camera::new(Vec3::ZERO, 70.0, 1.0, 0.3, f32::INFINITY).is_err());
    }

    #[test]
    fn invalid_parameter_names_the_field() {
        let err = Camera::new(Vec3::ZERO, 70.0, 1.0, 5.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            CameraError::InvalidParameter {
                name: "far_clip",
                ..
            }
        ));
    }

    #[test]
    fn forward_at_zero_yaw_moves_along_z() {
        let mut cam = origin_camera();
        cam.move_by(1.0, MoveDirection::Forward);
        assert!(approx_vec(cam.position(), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn strafe_and_forward_use_distinct_axes() {
        let mut strafe = origin_camera();
        strafe.move_by(1.0, MoveDirection::Strafe);
        assert!(approx_vec(strafe.position(), Vec3::new(1.0, 0.0, 0.0)));

        let mut forward = origin_camera();
        forward.move_by(1.0, MoveDirection::Forward);
        assert!(!approx_vec(strafe.position(), forward.position()));
    }

    #[test]
    fn forward_at_ninety_yaw_moves_along_x() {
        let mut cam = origin_camera();
        cam.rotate_by(0.0, 90.0, 0.0);
        cam.move_by(1.0, MoveDirection::Forward);
        assert!(approx_vec(cam.position(), Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn strafe_inverse_restores_position() {
        let mut cam = origin_camera();
        cam.rotate_by(0.0, 37.5, 0.0);
        let start = cam.position();
        cam.move_by(2.75, MoveDirection::Strafe);
        cam.move_by(-2.75, MoveDirection::Strafe);
        assert!(approx_vec(cam.position(), start));
    }

    #[test]
    fn vertical_ignores_rotation() {
        let mut cam = origin_camera();
        cam.rotate_by(45.0, 123.0, 10.0);
        cam.move_by(2.0, MoveDirection::Vertical);
        assert_eq!(cam.position(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn pitch_does_not_affect_translation() {
        let mut level = origin_camera();
        let mut pitched = origin_camera();
        pitched.rotate_by(60.0, 0.0, 0.0);
        level.move_by(1.0, MoveDirection::Forward);
        pitched.move_by(1.0, MoveDirection::Forward);
        assert_eq!(level.position(), pitched.position());
        assert_eq!(pitched.position().y, 0.0);
    }

    #[test]
    fn rotate_by_inverse_restores_rotation() {
        let mut cam = origin_camera();
        cam.set_rotation(Vec3::new(12.0, -30.0, 5.0));
        let start = cam.rotation();
        cam.rotate_by(3.5, 720.25, -1.0);
        cam.rotate_by(-3.5, -720.25, 1.0);
        assert_eq!(cam.rotation(), start);
    }

    #[test]
    fn rotation_accumulates_without_wrap() {
        let mut cam = origin_camera();
        for _ in 0..10 {
            cam.rotate_by(0.0, 90.0, 0.0);
        }
        assert_eq!(cam.rotation().y, 900.0);
    }

    #[test]
    fn view_transform_rotates_before_translating() {
        let mut cam = origin_camera();
        cam.set_position(Vec3::new(0.0, 0.0, 1.0));
        cam.set_rotation(Vec3::new(0.0, 90.0, 0.0));

        let rotation = Mat4::from_rotation_y(90.0_f32.to_radians());
        let translation = Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0));

        let view = cam.current_view_transform();
        assert!(view.abs_diff_eq(rotation * translation, EPS));
        assert!(!view.abs_diff_eq(translation * rotation, EPS));
    }

    #[test]
    fn view_transform_applies_axes_in_x_y_z_order() {
        let mut cam = origin_camera();
        cam.set_rotation(Vec3::new(30.0, 45.0, 60.0));
        let expected = Mat4::from_rotation_x(30.0_f32.to_radians())
            * Mat4::from_rotation_y(45.0_f32.to_radians())
            * Mat4::from_rotation_z(60.0_f32.to_radians());
        let reversed = Mat4::from_rotation_z(60.0_f32.to_radians())
            * Mat4::from_rotation_y(45.0_f32.to_radians())
            * Mat4::from_rotation_x(30.0_f32.to_radians());
        assert!(cam.current_view_transform().abs_diff_eq(expected, EPS));
        assert!(!cam.current_view_transform().abs_diff_eq(reversed, EPS));
    }

    #[test]
    fn setter_recomputes_projection() {
        let mut cam = origin_camera();
        let before = cam.projection();
        cam.set_field_of_view(90.0).unwrap();
        assert_ne!(cam.projection(), before);
        let expected = Mat4::perspective_rh(90.0_f32.to_radians(), 16.0 / 9.0, 0.3, 1000.0);
        assert!(cam.projection().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn rejected_setter_leaves_camera_unchanged() {
        let mut cam = origin_camera();
        let before = cam.clone();
        assert!(cam.set_near_clip(2000.0).is_err());
        assert!(cam.set_far_clip(0.1).is_err());
        assert!(cam.set_aspect_ratio(-1.0).is_err());
        assert_eq!(cam, before);
    }

    #[test]
    fn end_to_end_yaw_then_forward() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, -10.0), 70.0, 16.0 / 9.0, 0.3, 1000.0)
            .unwrap();
        cam.rotate_by(0.0, 10.0, 0.0);
        cam.move_by(1.0, MoveDirection::Forward);

        let angle = 100.0_f32.to_radians();
        let p = cam.position();
        assert!(approx(p.x, angle.cos()));
        assert!(approx(p.y, 0.0));
        assert!(approx(p.z, -10.0 + angle.sin()));
    }
}

//! Orbit camera state and pointer-drag tracking.
//!
//! Everything here is plain data with no ECS access, so the camera math can
//! be exercised directly from tests.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

/// Viewports narrower than this get the far camera distance.
pub const NARROW_VIEWPORT_WIDTH: f32 = 768.0;

/// Camera distance on narrow viewports.
pub const NARROW_DISTANCE: f32 = 12.0;

/// Camera distance on wide viewports.
pub const WIDE_DISTANCE: f32 = 8.0;

/// Tunables for the orbit camera.
#[derive(Resource, Clone, Debug)]
pub struct CameraSettings {
    /// Radians of rotation per pixel of drag.
    pub sensitivity: f32,
    /// Distance kept between the pitch limit and the poles.
    pub pitch_margin: f32,
    /// Pitch at startup.
    pub initial_pitch: f32,
    /// Yaw at startup.
    pub initial_yaw: f32,
    /// Height of the camera above the orbit plane at startup.
    pub initial_height: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.005,
            pitch_margin: 0.1,
            initial_pitch: 0.3,
            initial_yaw: 0.0,
            initial_height: 2.0,
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Distance the camera settles at for a viewport of the given width.
pub fn responsive_distance(viewport_width: f32) -> f32 {
    if viewport_width < NARROW_VIEWPORT_WIDTH {
        NARROW_DISTANCE
    } else {
        WIDE_DISTANCE
    }
}

/// Spherical camera placement around the origin.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Distance from the origin.
    pub distance: f32,
    /// Elevation angle, clamped away from the poles.
    pub pitch: f32,
    /// Azimuth angle around the vertical axis.
    pub yaw: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::initial(f32::INFINITY, &CameraSettings::default())
    }
}

impl OrbitCamera {
    /// Camera for a freshly mounted view of the given width.
    ///
    /// The camera starts at `(0, initial_height, responsive_distance)`, so its
    /// distance from the origin is the length of that offset.
    pub fn initial(viewport_width: f32, settings: &CameraSettings) -> Self {
        let offset = Vec2::new(settings.initial_height, responsive_distance(viewport_width));
        Self {
            distance: offset.length(),
            pitch: clamp_pitch(settings.initial_pitch, settings.pitch_margin),
            yaw: settings.initial_yaw,
        }
    }

    /// Apply a pixel drag delta: horizontal motion turns yaw, vertical turns pitch.
    pub fn apply_drag(&mut self, delta: Vec2, settings: &CameraSettings) {
        self.yaw += delta.x * settings.sensitivity;
        self.pitch = clamp_pitch(
            self.pitch + delta.y * settings.sensitivity,
            settings.pitch_margin,
        );
    }

    /// Snap the distance to the responsive default, keeping the direction.
    pub fn renormalize(&mut self, viewport_width: f32) {
        self.distance = responsive_distance(viewport_width);
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(
            self.distance * sin_yaw * cos_pitch,
            self.distance * sin_pitch,
            self.distance * cos_yaw * cos_pitch,
        )
    }

    /// Camera transform aimed at the origin.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

/// Last viewport size the camera distance was fitted to.
///
/// Resize notifications repeating this size are ignored, so the window's
/// own creation event keeps the initial camera offset.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize(pub Option<Vec2>);

impl ViewportSize {
    /// Record `size`; returns whether it differs from the last one.
    pub fn update(&mut self, size: Vec2) -> bool {
        if self.0 == Some(size) {
            return false;
        }
        self.0 = Some(size);
        true
    }
}

/// Clamp pitch into `[-π/2 + margin, π/2 - margin]`.
pub fn clamp_pitch(pitch: f32, margin: f32) -> f32 {
    let limit = FRAC_PI_2 - margin;
    pitch.clamp(-limit, limit)
}

/// Pointer drag tracking: idle, or dragging from a remembered position.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerDrag {
    #[default]
    Idle,
    Dragging {
        /// Pointer position the next delta is measured from.
        last: Vec2,
    },
}

impl PointerDrag {
    pub fn is_dragging(&self) -> bool {
        matches!(self, PointerDrag::Dragging { .. })
    }

    /// Pointer went down; start measuring from here.
    pub fn press(&mut self, position: Vec2) {
        *self = PointerDrag::Dragging { last: position };
    }

    /// Pointer moved. Returns the delta when dragging and rebases on `position`.
    pub fn move_to(&mut self, position: Vec2) -> Option<Vec2> {
        match self {
            PointerDrag::Idle => None,
            PointerDrag::Dragging { last } => {
                let delta = position - *last;
                *last = position;
                Some(delta)
            }
        }
    }

    /// Pointer went up.
    pub fn release(&mut self) {
        *self = PointerDrag::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_viewport_size_reports_changes_only() {
        let mut viewport = ViewportSize::default();
        assert!(viewport.update(Vec2::new(1280.0, 720.0)));
        assert!(!viewport.update(Vec2::new(1280.0, 720.0)));
        assert!(viewport.update(Vec2::new(700.0, 720.0)));
        assert_eq!(viewport.0, Some(Vec2::new(700.0, 720.0)));
    }

    #[test]
    fn test_responsive_distance_breakpoint() {
        assert_eq!(responsive_distance(320.0), 12.0);
        assert_eq!(responsive_distance(767.9), 12.0);
        assert_eq!(responsive_distance(768.0), 8.0);
        assert_eq!(responsive_distance(1920.0), 8.0);
    }

    #[test]
    fn test_initial_camera_matches_startup_offset() {
        let settings = CameraSettings::default();

        let wide = OrbitCamera::initial(1280.0, &settings);
        assert_relative_eq!(wide.distance, (4.0f32 + 64.0).sqrt(), epsilon = 1e-6);
        assert_relative_eq!(wide.pitch, 0.3);
        assert_eq!(wide.yaw, 0.0);

        let narrow = OrbitCamera::initial(400.0, &settings);
        assert_relative_eq!(narrow.distance, (4.0f32 + 144.0).sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_eye_on_sphere() {
        let camera = OrbitCamera {
            distance: 8.0,
            pitch: 0.4,
            yaw: 1.3,
        };
        assert_relative_eq!(camera.eye().length(), 8.0, epsilon = 1e-5);
    }

    #[test]
    fn test_eye_at_zero_angles_is_on_positive_z() {
        let camera = OrbitCamera {
            distance: 8.0,
            pitch: 0.0,
            yaw: 0.0,
        };
        let eye = camera.eye();
        assert_relative_eq!(eye.x, 0.0);
        assert_relative_eq!(eye.y, 0.0);
        assert_relative_eq!(eye.z, 8.0);
    }

    #[test]
    fn test_transform_looks_at_origin() {
        let camera = OrbitCamera {
            distance: 10.0,
            pitch: -0.7,
            yaw: 2.1,
        };
        let transform = camera.transform();
        let forward = transform.forward();
        let to_origin = (-transform.translation).normalize();
        assert_relative_eq!(forward.dot(to_origin), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_drag_scales_by_sensitivity() {
        let settings = CameraSettings::default();
        let mut camera = OrbitCamera {
            distance: 8.0,
            pitch: 0.0,
            yaw: 0.0,
        };
        camera.apply_drag(Vec2::new(100.0, -40.0), &settings);
        assert_relative_eq!(camera.yaw, 0.5, epsilon = 1e-6);
        assert_relative_eq!(camera.pitch, -0.2, epsilon = 1e-6);
        assert_eq!(camera.distance, 8.0);
    }

    #[test]
    fn test_drag_clamps_pitch_at_poles() {
        let settings = CameraSettings::default();
        let mut camera = OrbitCamera::default();

        camera.apply_drag(Vec2::new(0.0, 100_000.0), &settings);
        assert_relative_eq!(camera.pitch, FRAC_PI_2 - 0.1);

        camera.apply_drag(Vec2::new(0.0, -100_000.0), &settings);
        assert_relative_eq!(camera.pitch, -FRAC_PI_2 + 0.1);
    }

    #[test]
    fn test_renormalize_preserves_direction() {
        let mut camera = OrbitCamera {
            distance: 3.0,
            pitch: 0.5,
            yaw: -1.0,
        };
        let before = camera.eye().normalize();
        camera.renormalize(500.0);
        assert_eq!(camera.distance, 12.0);
        let after = camera.eye().normalize();
        assert_relative_eq!(before.dot(after), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pointer_drag_lifecycle() {
        let mut drag = PointerDrag::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.move_to(Vec2::new(5.0, 5.0)), None);

        drag.press(Vec2::new(10.0, 20.0));
        assert!(drag.is_dragging());
        assert_eq!(drag.move_to(Vec2::new(15.0, 18.0)), Some(Vec2::new(5.0, -2.0)));
        // Baseline moves with each event
        assert_eq!(drag.move_to(Vec2::new(15.0, 18.0)), Some(Vec2::ZERO));

        drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(drag.move_to(Vec2::new(100.0, 100.0)), None);
    }
}

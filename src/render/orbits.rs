//! Satellite orbit: the parametric curve and its drawn polyline.
//!
//! The curve is a circle in the XZ plane with a vertical wobble:
//! `x = cos t·R`, `y = sin(t·k)·R·0.3`, `z = sin t·R`. With a non-integer
//! inclination factor `k` the wobble does not repeat every turn, so the
//! drawn path is only a visual reference for the first revolution.

use std::f32::consts::TAU;

use bevy::prelude::*;

use super::SceneSettings;

/// Fraction of the radius used for the vertical wobble amplitude.
const WOBBLE_SCALE: f32 = 0.3;

/// Shape of the satellite orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitParams {
    pub radius: f32,
    /// Frequency multiplier of the vertical wobble.
    pub inclination: f32,
}

impl OrbitParams {
    /// Point on the orbit at angle `t`.
    pub fn position(&self, t: f32) -> Vec3 {
        Vec3::new(
            t.cos() * self.radius,
            (t * self.inclination).sin() * self.radius * WOBBLE_SCALE,
            t.sin() * self.radius,
        )
    }
}

/// Precomputed orbit polyline, immutable after sampling.
#[derive(Resource, Clone, Debug)]
pub struct OrbitPath {
    points: Vec<Vec3>,
}

impl OrbitPath {
    /// Sample `segments + 1` points over one revolution.
    pub fn sample(params: OrbitParams, segments: u32) -> Self {
        let segments = segments.max(1);
        let points = (0..=segments)
            .map(|i| params.position(i as f32 / segments as f32 * TAU))
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

/// Draw the orbit path each frame.
pub fn draw_orbit_path(
    mut gizmos: Gizmos,
    path: Option<Res<OrbitPath>>,
    settings: Res<SceneSettings>,
) {
    let Some(path) = path else {
        return;
    };

    gizmos.linestrip(path.points().iter().copied(), settings.orbit_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PARAMS: OrbitParams = OrbitParams {
        radius: 3.5,
        inclination: 1.2,
    };

    #[test]
    fn test_position_at_zero_is_on_x_axis() {
        assert_eq!(PARAMS.position(0.0), Vec3::new(3.5, 0.0, 0.0));
    }

    #[test]
    fn test_inclination_only_changes_height() {
        let flat = OrbitParams {
            radius: 3.5,
            inclination: 0.0,
        };
        for i in 0..50 {
            let t = i as f32 * 0.37;
            let a = PARAMS.position(t);
            let b = flat.position(t);
            assert_eq!(a.x, b.x);
            assert_eq!(a.z, b.z);
            assert_eq!(b.y, 0.0);
            assert!(a.y.abs() <= 3.5 * WOBBLE_SCALE + 1e-6);
        }
    }

    #[test]
    fn test_horizontal_radius_is_constant() {
        for i in 0..100 {
            let p = PARAMS.position(i as f32 * 0.1);
            assert_relative_eq!(Vec2::new(p.x, p.z).length(), 3.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sampled_path_has_segments_plus_one_points() {
        let path = OrbitPath::sample(PARAMS, 64);
        assert_eq!(path.points().len(), 65);
        assert_eq!(path.points()[0], Vec3::new(3.5, 0.0, 0.0));
    }

    #[test]
    fn test_sampled_path_closes_horizontally() {
        let path = OrbitPath::sample(PARAMS, 64);
        let first = path.points()[0];
        let last = path.points()[64];
        assert_relative_eq!(first.x, last.x, epsilon = 1e-5);
        assert_relative_eq!(first.z, last.z, epsilon = 1e-5);
    }

    #[test]
    fn test_integer_inclination_closes_fully() {
        let params = OrbitParams {
            radius: 2.0,
            inclination: 2.0,
        };
        let path = OrbitPath::sample(params, 32);
        let first = path.points()[0];
        let last = *path.points().last().unwrap();
        assert!(first.distance(last) < 1e-5);
    }

    #[test]
    fn test_zero_segments_still_samples() {
        let path = OrbitPath::sample(PARAMS, 0);
        assert_eq!(path.points().len(), 2);
    }
}

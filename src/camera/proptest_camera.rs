//! Property-based tests for the orbit camera using proptest.

use std::f32::consts::FRAC_PI_2;

use bevy::math::Vec2;
use proptest::prelude::*;

use super::orbit::{CameraSettings, OrbitCamera, PointerDrag, clamp_pitch, responsive_distance};

fn drag_deltas() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((-5000.0f32..5000.0, -5000.0f32..5000.0), 0..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Pitch never leaves the safe band, whatever the drag history.
    #[test]
    fn prop_pitch_stays_clamped(deltas in drag_deltas()) {
        let settings = CameraSettings::default();
        let mut camera = OrbitCamera::default();
        let limit = FRAC_PI_2 - settings.pitch_margin;

        for (dx, dy) in deltas {
            camera.apply_drag(Vec2::new(dx, dy), &settings);
            prop_assert!(camera.pitch >= -limit && camera.pitch <= limit);
        }
    }

    /// Clamping is idempotent and bounded for any input.
    #[test]
    fn prop_clamp_pitch_idempotent(pitch in -100.0f32..100.0, margin in 0.0f32..0.5) {
        let once = clamp_pitch(pitch, margin);
        prop_assert_eq!(once, clamp_pitch(once, margin));
        prop_assert!(once.abs() <= FRAC_PI_2 - margin);
    }

    /// Camera stays on its sphere regardless of angles.
    #[test]
    fn prop_eye_distance_matches(
        distance in 1.0f32..50.0,
        pitch in -1.4f32..1.4,
        yaw in -10.0f32..10.0,
    ) {
        let camera = OrbitCamera { distance, pitch, yaw };
        prop_assert!((camera.eye().length() - distance).abs() < distance * 1e-4);
    }

    /// Resize always lands on one of the two responsive distances.
    #[test]
    fn prop_renormalize_ignores_prior_distance(
        prior in 0.1f32..1000.0,
        width in 1.0f32..4000.0,
    ) {
        let mut camera = OrbitCamera { distance: prior, pitch: 0.2, yaw: 0.4 };
        camera.renormalize(width);
        let expected = if width < 768.0 { 12.0 } else { 8.0 };
        prop_assert_eq!(camera.distance, expected);
        prop_assert_eq!(responsive_distance(width), expected);
    }

    /// Summed drag deltas equal the total pointer travel.
    #[test]
    fn prop_drag_deltas_telescope(
        start in (-1000.0f32..1000.0, -1000.0f32..1000.0),
        path in prop::collection::vec((-1000.0f32..1000.0, -1000.0f32..1000.0), 1..32),
    ) {
        let mut drag = PointerDrag::default();
        let start = Vec2::new(start.0, start.1);
        drag.press(start);

        let mut total = Vec2::ZERO;
        let mut end = start;
        for (x, y) in path {
            end = Vec2::new(x, y);
            total += drag.move_to(end).unwrap_or_default();
        }
        prop_assert!((total - (end - start)).length() < 1e-2);
    }
}

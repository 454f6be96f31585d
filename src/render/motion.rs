//! Per-frame transforms: planet and cloud spin, satellite orbit.
//!
//! Everything here reads only the [`SceneClock`] and [`SceneSettings`], so
//! it runs unchanged in headless apps.

use bevy::prelude::*;

use super::SceneSettings;
use crate::time::ClockPlugin;
use crate::types::{FrameSet, SceneClock, view_mounted};

/// Constant rotation around the local vertical axis, applied every frame.
#[derive(Component, Clone, Copy, Debug)]
pub struct Spin {
    pub radians_per_frame: f32,
}

/// Root of the satellite assembly.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct OrbitingSatellite;

/// Plugin animating spinning bodies and the satellite.
pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<ClockPlugin>() {
            app.add_plugins(ClockPlugin);
        }

        app.init_resource::<SceneSettings>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Clock, FrameSet::Motion, FrameSet::Camera).chain(),
            )
            .add_systems(
                Update,
                (spin_bodies, orbit_satellite)
                    .in_set(FrameSet::Motion)
                    .run_if(view_mounted),
            );
    }
}

/// Rotate every spinning body by its per-frame increment.
pub fn spin_bodies(mut bodies: Query<(&Spin, &mut Transform)>) {
    for (spin, mut transform) in bodies.iter_mut() {
        transform.rotate_local_y(spin.radians_per_frame);
    }
}

/// Satellite transform for the given clock.
///
/// Positioned on the orbit with its local +Z (sensor side) facing the
/// planet, then turned about its own vertical axis by the spin accumulated
/// over `frames`.
pub fn satellite_transform(clock: &SceneClock, settings: &SceneSettings) -> Transform {
    let t = clock.elapsed as f32 * settings.orbit_speed;
    let position = settings.orbit.position(t);
    let spin = (clock.frames as f32 * settings.satellite_spin) % std::f32::consts::TAU;

    // Forward (-Z) points away from the planet so +Z looks down at it
    let mut transform = Transform::from_translation(position).looking_to(position, Vec3::Y);
    transform.rotate_local_y(spin);
    transform
}

/// Move the satellite along its orbit.
pub fn orbit_satellite(
    clock: Res<SceneClock>,
    settings: Res<SceneSettings>,
    mut satellites: Query<&mut Transform, With<OrbitingSatellite>>,
) {
    let target = satellite_transform(&clock, &settings);
    for mut transform in satellites.iter_mut() {
        *transform = target;
    }
}

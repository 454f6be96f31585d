//! Ground station marker pinned to the planet surface.

use bevy::prelude::*;

use super::SceneSettings;
use crate::types::SceneEntity;

const MARKER_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Geographic placement of the ground station marker.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GroundStation {
    /// Degrees north.
    pub latitude: f32,
    /// Degrees east.
    pub longitude: f32,
    /// Distance from the planet center.
    pub radius: f32,
}

impl Default for GroundStation {
    fn default() -> Self {
        Self {
            latitude: 12.9716,
            longitude: 77.5946,
            radius: 2.05,
        }
    }
}

impl GroundStation {
    pub fn position(&self) -> Vec3 {
        lat_lon_to_position(self.latitude, self.longitude, self.radius)
    }
}

/// Convert latitude/longitude in degrees to a point on a sphere of `radius`.
///
/// Matches the equirectangular mapping of the planet texture: longitude 0
/// lies on `+X`, the north pole on `+Y`.
pub fn lat_lon_to_position(latitude: f32, longitude: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - latitude).to_radians();
    let theta = (longitude + 180.0).to_radians();

    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Spawn the red cone and its glow.
pub fn spawn_ground_station(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let station = settings.ground_station;
    let position = station.position();
    let outward = position.normalize_or(Vec3::Y);

    commands.spawn((
        Mesh3d(meshes.add(Cone::new(0.05, 0.15).mesh().resolution(8))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: MARKER_COLOR,
            unlit: true,
            ..default()
        })),
        Transform::from_translation(position).with_rotation(Quat::from_rotation_arc(Vec3::Y, outward)),
        station,
        SceneEntity,
        Name::new("ground station"),
    ));

    commands.spawn((
        PointLight {
            color: MARKER_COLOR,
            intensity: 4000.0,
            range: 0.5,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(position),
        SceneEntity,
        Name::new("ground station light"),
    ));

    debug!(
        "Ground station at ({:.3}, {:.3}, {:.3})",
        position.x, position.y, position.z
    );
}

//! Background rendering for the orbit scene.
//!
//! Provides the starfield backdrop and the sun light.

use bevy::prelude::*;

use super::SceneSettings;
use super::planet::{SurfaceTextures, TextureSlot, starfield_material};
use crate::types::SceneEntity;

/// Direction the sun shines from.
const SUN_POSITION: Vec3 = Vec3::new(10.0, 5.0, 5.0);

/// Spawn a large inward-facing sphere textured with stars.
pub fn spawn_starfield(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<SceneSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut surfaces: ResMut<SurfaceTextures>,
) {
    let image = asset_server.load(TextureSlot::Starfield.path());
    let material = materials.add(starfield_material(image.clone()));
    surfaces.track(TextureSlot::Starfield, image, material.clone());

    let segments = settings.starfield_segments;
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(settings.starfield_radius).mesh().uv(segments, segments))),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        SceneEntity,
        Name::new("starfield"),
    ));

    info!("Starfield spawned (radius {})", settings.starfield_radius);
}

/// Spawn the sun.
pub fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        SceneEntity,
        Name::new("sun"),
    ));

    info!("Scene lighting initialized");
}

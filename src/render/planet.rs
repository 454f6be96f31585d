//! Planet, cloud shell and atmosphere shell.
//!
//! Surface images are loaded by path. When a load fails the affected
//! material is degraded to a flat look instead of leaving a hole.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::render_resource::Face;

use super::SceneSettings;
use super::atmosphere::AtmosphereMaterial;
use super::motion::Spin;
use crate::types::SceneEntity;

/// Marker for the planet body.
#[derive(Component)]
pub struct Planet;

/// Marker for the cloud shell.
#[derive(Component)]
pub struct CloudLayer;

/// Role a loaded image plays in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    PlanetDay,
    PlanetNight,
    PlanetSpecular,
    Clouds,
    Starfield,
}

impl TextureSlot {
    /// Asset path, relative to `assets/`.
    pub fn path(self) -> &'static str {
        match self {
            TextureSlot::PlanetDay => "textures/earth_atmos_2048.jpg",
            TextureSlot::PlanetNight => "textures/earth_lights_2048.png",
            TextureSlot::PlanetSpecular => "textures/earth_specular_2048.jpg",
            TextureSlot::Clouds => "textures/earth_clouds_2048.png",
            TextureSlot::Starfield => "textures/starfield.png",
        }
    }
}

/// A loaded image and the material that samples it.
#[derive(Clone, Debug)]
pub struct SurfaceTexture {
    pub slot: TextureSlot,
    pub image: Handle<Image>,
    pub material: Handle<StandardMaterial>,
    pub degraded: bool,
}

/// Every externally loaded surface image.
#[derive(Resource, Default, Debug)]
pub struct SurfaceTextures {
    pub entries: Vec<SurfaceTexture>,
}

impl SurfaceTextures {
    pub fn track(
        &mut self,
        slot: TextureSlot,
        image: Handle<Image>,
        material: Handle<StandardMaterial>,
    ) {
        self.entries.push(SurfaceTexture {
            slot,
            image,
            material,
            degraded: false,
        });
    }
}

/// Strip the failed image from `material` and substitute a flat look.
pub fn apply_texture_fallback(
    slot: TextureSlot,
    material: &mut StandardMaterial,
    settings: &SceneSettings,
) {
    match slot {
        TextureSlot::PlanetDay => {
            material.base_color_texture = None;
            material.base_color = settings.planet_fallback_color;
        }
        TextureSlot::PlanetNight => {
            material.emissive_texture = None;
            material.emissive = LinearRgba::BLACK;
        }
        TextureSlot::PlanetSpecular => {
            material.specular_texture = None;
        }
        TextureSlot::Clouds => {
            material.base_color_texture = None;
            material.base_color = Color::srgba(1.0, 1.0, 1.0, 0.05);
        }
        TextureSlot::Starfield => {
            material.base_color_texture = None;
            material.base_color = Color::srgb(0.01, 0.01, 0.02);
        }
    }
}

/// Spawn the planet with its cloud and atmosphere shells.
pub fn spawn_planet(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<SceneSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut atmospheres: ResMut<Assets<AtmosphereMaterial>>,
    mut surfaces: ResMut<SurfaceTextures>,
) {
    let segments = settings.planet_segments;

    let day = asset_server.load(TextureSlot::PlanetDay.path());
    let night = asset_server.load(TextureSlot::PlanetNight.path());
    let specular = asset_server.load(TextureSlot::PlanetSpecular.path());
    let clouds = asset_server.load(TextureSlot::Clouds.path());

    // Night lights glow faintly everywhere; the lit day side drowns them out
    let planet_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(day.clone()),
        emissive: LinearRgba::rgb(0.25, 0.22, 0.15),
        emissive_texture: Some(night.clone()),
        specular_texture: Some(specular.clone()),
        perceptual_roughness: 0.8,
        ..default()
    });
    surfaces.track(TextureSlot::PlanetDay, day, planet_material.clone());
    surfaces.track(TextureSlot::PlanetNight, night, planet_material.clone());
    surfaces.track(TextureSlot::PlanetSpecular, specular, planet_material.clone());

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(settings.planet_radius).mesh().uv(segments, segments))),
        MeshMaterial3d(planet_material),
        Transform::IDENTITY,
        Spin {
            radians_per_frame: settings.planet_spin,
        },
        Planet,
        SceneEntity,
        Name::new("planet"),
    ));

    let cloud_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, settings.cloud_opacity),
        base_color_texture: Some(clouds.clone()),
        alpha_mode: AlphaMode::Add,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    surfaces.track(TextureSlot::Clouds, clouds, cloud_material.clone());

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(settings.cloud_radius).mesh().uv(segments, segments))),
        MeshMaterial3d(cloud_material),
        Transform::IDENTITY,
        Spin {
            radians_per_frame: settings.cloud_spin,
        },
        CloudLayer,
        SceneEntity,
        Name::new("clouds"),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(settings.atmosphere_radius).mesh().uv(segments, segments))),
        MeshMaterial3d(atmospheres.add(AtmosphereMaterial::default())),
        Transform::IDENTITY,
        SceneEntity,
        Name::new("atmosphere"),
    ));

    info!("Planet spawned (radius {})", settings.planet_radius);
}

/// Degrade materials whose image failed to load. Each slot degrades once.
pub fn degrade_failed_textures(
    asset_server: Res<AssetServer>,
    settings: Res<SceneSettings>,
    mut surfaces: ResMut<SurfaceTextures>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for entry in surfaces.entries.iter_mut().filter(|entry| !entry.degraded) {
        if !matches!(asset_server.load_state(entry.image.id()), LoadState::Failed(_)) {
            continue;
        }

        entry.degraded = true;
        if let Some(material) = materials.get_mut(&entry.material) {
            apply_texture_fallback(entry.slot, material, &settings);
        }
        warn!(
            "Texture {} failed to load; using fallback look",
            entry.slot.path()
        );
    }
}

/// Backdrop material sampling the starfield image from the inside.
pub(super) fn starfield_material(image: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(image),
        unlit: true,
        cull_mode: Some(Face::Front),
        ..default()
    }
}

//! Rendering systems for the orbit scene.
//!
//! Builds the planet with its cloud and atmosphere shells, the starfield,
//! the satellite, its orbit path and the ground station, then animates them
//! every frame.

pub mod atmosphere;
mod background;
pub mod ground_station;
pub mod motion;
pub mod orbits;
mod planet;
pub mod satellite;
pub mod textures;

use bevy::prelude::*;

use crate::types::{FrameSet, view_mounted};

use self::atmosphere::AtmosphereMaterial;
use self::background::{spawn_lighting, spawn_starfield};
use self::ground_station::spawn_ground_station;
use self::orbits::{OrbitPath, draw_orbit_path};
use self::planet::spawn_planet;
use self::satellite::spawn_satellite;

pub use self::ground_station::GroundStation;
pub use self::motion::{MotionPlugin, OrbitingSatellite, Spin};
pub use self::orbits::OrbitParams;
pub use self::planet::{
    CloudLayer, Planet, SurfaceTextures, TextureSlot, apply_texture_fallback,
    degrade_failed_textures,
};

/// Tunables for scene construction and animation.
#[derive(Resource, Clone, Debug)]
pub struct SceneSettings {
    pub planet_radius: f32,
    /// Longitude and latitude subdivisions of the planet spheres.
    pub planet_segments: u32,
    pub cloud_radius: f32,
    pub cloud_opacity: f32,
    pub atmosphere_radius: f32,
    pub starfield_radius: f32,
    pub starfield_segments: u32,
    /// Flat color used when the day texture cannot be loaded.
    pub planet_fallback_color: Color,
    pub orbit: OrbitParams,
    /// Polyline segments of the drawn orbit path.
    pub orbit_segments: u32,
    pub orbit_color: Color,
    /// Orbit angle gained per unit of scene clock.
    pub orbit_speed: f32,
    /// Planet rotation per frame, radians.
    pub planet_spin: f32,
    /// Cloud rotation per frame, radians; faster than the planet.
    pub cloud_spin: f32,
    /// Satellite rotation around its own vertical axis per frame, radians.
    pub satellite_spin: f32,
    pub ground_station: GroundStation,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            planet_radius: 2.0,
            planet_segments: 64,
            cloud_radius: 2.01,
            cloud_opacity: 0.8,
            atmosphere_radius: 2.15,
            starfield_radius: 100.0,
            starfield_segments: 32,
            planet_fallback_color: Color::srgb_u8(0x44, 0x88, 0xff),
            orbit: OrbitParams {
                radius: 3.5,
                inclination: 1.2,
            },
            orbit_segments: 64,
            orbit_color: Color::srgba(0.0, 1.0, 1.0, 0.4),
            orbit_speed: 0.2,
            planet_spin: 0.001,
            cloud_spin: 0.0013,
            satellite_spin: 0.02,
            ground_station: GroundStation::default(),
        }
    }
}

/// Plugin aggregating scene construction and per-frame animation.
///
/// Needs the full render stack; headless apps use [`MotionPlugin`] alone.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSettings>()
            .init_resource::<SurfaceTextures>()
            .add_plugins((MaterialPlugin::<AtmosphereMaterial>::default(), MotionPlugin))
            .add_systems(
                Startup,
                (
                    init_orbit_path,
                    spawn_lighting,
                    spawn_starfield,
                    spawn_planet,
                    spawn_satellite,
                    spawn_ground_station,
                )
                    .run_if(view_mounted),
            )
            .add_systems(
                Update,
                (
                    degrade_failed_textures,
                    draw_orbit_path.after(FrameSet::Motion),
                )
                    .run_if(view_mounted),
            );
    }
}

/// Sample the orbit polyline once.
fn init_orbit_path(mut commands: Commands, settings: Res<SceneSettings>) {
    let path = OrbitPath::sample(settings.orbit, settings.orbit_segments);
    info!("Orbit path sampled with {} points", path.points().len());
    commands.insert_resource(path);
}

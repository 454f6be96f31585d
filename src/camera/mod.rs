//! Camera system for the orbit scene.
//!
//! A perspective camera circles the planet on a sphere. Dragging with the
//! pointer turns yaw and pitch; resizing the viewport snaps the distance to
//! a responsive default.

mod orbit;
#[cfg(test)]
mod proptest_camera;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub use orbit::{
    CameraSettings, NARROW_DISTANCE, NARROW_VIEWPORT_WIDTH, OrbitCamera, PointerDrag,
    ViewportSize, WIDE_DISTANCE, clamp_pitch, responsive_distance,
};

use crate::input::{PointerInput, ViewportResized};
use crate::types::{FrameSet, SceneEntity, view_mounted};

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .init_resource::<OrbitCamera>()
            .init_resource::<PointerDrag>()
            .init_resource::<ViewportSize>()
            .add_systems(Startup, setup_camera.run_if(view_mounted))
            .add_systems(
                Update,
                (
                    (orbit_drag, renormalize_on_resize)
                        .chain()
                        .in_set(FrameSet::Input),
                    place_camera.in_set(FrameSet::Camera),
                )
                    .run_if(view_mounted),
            );
    }
}

/// Spawn the main camera with a perspective projection.
fn setup_camera(
    mut commands: Commands,
    settings: Res<CameraSettings>,
    mut orbit: ResMut<OrbitCamera>,
    mut viewport: ResMut<ViewportSize>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let size = windows.single().map(|window| window.size()).ok();
    if let Some(size) = size {
        viewport.update(size);
    }
    let width = size.map_or(f32::INFINITY, |size| size.x);
    *orbit = OrbitCamera::initial(width, &settings);

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            ..default()
        }),
        orbit.transform(),
        MainCamera,
        SceneEntity,
    ));

    info!("Camera placed at distance {:.2}", orbit.distance);
}

/// Turn pointer drags into yaw/pitch changes.
pub fn orbit_drag(
    mut pointer: MessageReader<PointerInput>,
    mut drag: ResMut<PointerDrag>,
    mut orbit: ResMut<OrbitCamera>,
    settings: Res<CameraSettings>,
) {
    for input in pointer.read() {
        match *input {
            PointerInput::Down(position) => drag.press(position),
            PointerInput::Move(position) => {
                if let Some(delta) = drag.move_to(position) {
                    orbit.apply_drag(delta, &settings);
                }
            }
            PointerInput::Up => drag.release(),
        }
    }
}

/// Snap camera distance to the responsive default when the viewport changes.
///
/// The projection aspect ratio follows the window automatically.
pub fn renormalize_on_resize(
    mut resized: MessageReader<ViewportResized>,
    mut orbit: ResMut<OrbitCamera>,
    mut viewport: ResMut<ViewportSize>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    if !viewport.update(Vec2::new(last.width, last.height)) {
        return;
    }

    orbit.renormalize(last.width);
    debug!(
        "Viewport {}x{}: camera distance {}",
        last.width, last.height, orbit.distance
    );
}

/// Place the camera on its orbit sphere, aimed at the planet.
pub fn place_camera(
    orbit: Res<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    for mut transform in cameras.iter_mut() {
        *transform = orbit.transform();
    }
}

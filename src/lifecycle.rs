//! View mount and teardown.
//!
//! The primary window plays the role of the mount point. Without one the
//! scene stays idle. Teardown is requested with [`ViewTeardown`] (sent
//! automatically when the window is asked to close) and stops every
//! lifecycle-gated system for good.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowCloseRequested};

use crate::camera::PointerDrag;
use crate::types::{FrameSet, SceneEntity, ViewLifecycle};

/// Request to dispose the view.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ViewTeardown;

/// Plugin owning the [`ViewLifecycle`] resource.
pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewLifecycle>()
            .add_message::<ViewTeardown>()
            .add_message::<WindowCloseRequested>()
            .add_systems(PreStartup, mount_view)
            .add_systems(
                Update,
                (teardown_on_close, dispose_view)
                    .chain()
                    .before(FrameSet::Input),
            );
    }
}

/// Mount the view if a primary window exists; otherwise stay idle.
pub fn mount_view(
    windows: Query<(), With<PrimaryWindow>>,
    mut lifecycle: ResMut<ViewLifecycle>,
) {
    if *lifecycle != ViewLifecycle::Unmounted {
        return;
    }

    if windows.is_empty() {
        debug!("No primary window; scene animator stays idle");
        return;
    }

    *lifecycle = ViewLifecycle::Mounted;
    info!("View mounted");
}

/// Translate an OS close request into a view teardown.
fn teardown_on_close(
    mut close_requests: MessageReader<WindowCloseRequested>,
    mut teardown: MessageWriter<ViewTeardown>,
) {
    if close_requests.read().count() > 0 {
        teardown.write(ViewTeardown);
    }
}

/// Dispose the view: stop gated systems, drop drag state, despawn the scene.
pub fn dispose_view(
    mut commands: Commands,
    mut requests: MessageReader<ViewTeardown>,
    mut lifecycle: ResMut<ViewLifecycle>,
    drag: Option<ResMut<PointerDrag>>,
    scene: Query<Entity, With<SceneEntity>>,
) {
    if requests.read().count() == 0 || *lifecycle == ViewLifecycle::Disposed {
        return;
    }

    *lifecycle = ViewLifecycle::Disposed;
    if let Some(mut drag) = drag {
        drag.release();
    }

    let mut despawned = 0usize;
    for entity in scene.iter() {
        commands.entity(entity).try_despawn();
        despawned += 1;
    }

    info!("View disposed ({despawned} scene entities released)");
}

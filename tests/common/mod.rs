//! Common test utilities for integration tests.
#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use orbitscape::camera::CameraPlugin;
use orbitscape::input::InputMessagesPlugin;
use orbitscape::lifecycle::LifecyclePlugin;
use orbitscape::render::MotionPlugin;
use orbitscape::terminal::{CommandPicker, TerminalPlugin, TypewriterSettings};
use orbitscape::types::ViewLifecycle;

/// Wall time fed to every frame.
pub const FRAME_DT: Duration = Duration::from_millis(100);

/// Seed for the command picker in deterministic tests.
pub const PICKER_SEED: u64 = 42;

/// Typewriter settings with the automatic schedule pushed out of reach.
pub fn manual_typewriter() -> TypewriterSettings {
    TypewriterSettings {
        initial_delay: Duration::from_secs(3600),
        auto_interval: Duration::from_secs(3600),
        ..default()
    }
}

/// Headless app with every scene system that needs no renderer.
///
/// Startup runs without a window, so the view stays unmounted until
/// [`mount`] is called.
pub fn headless_app(settings: TypewriterSettings) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME_DT))
        .insert_resource(settings)
        .insert_resource(CommandPicker::seeded(PICKER_SEED))
        .add_plugins((
            LifecyclePlugin,
            InputMessagesPlugin,
            CameraPlugin,
            MotionPlugin,
            TerminalPlugin,
        ));
    app.update();
    app
}

/// Mark the view as mounted, as a window would at startup.
pub fn mount(app: &mut App) {
    *app.world_mut().resource_mut::<ViewLifecycle>() = ViewLifecycle::Mounted;
}

/// Run `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

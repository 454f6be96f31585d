//! Orbitscape - decorative orbit scene
//!
//! A desktop application rendering a satellite orbiting a textured planet,
//! with a drag-to-orbit camera and a scripted terminal overlay.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orbitscape::camera::CameraPlugin;
use orbitscape::input::WindowInputPlugin;
use orbitscape::lifecycle::LifecyclePlugin;
use orbitscape::render::RenderPlugin;
use orbitscape::terminal::TerminalPlugin;
use orbitscape::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orbitscape".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(EguiPlugin::default())
        // Lifecycle first so the view is mounted before scene setup runs
        .add_plugins((LifecyclePlugin, WindowInputPlugin, CameraPlugin))
        .add_plugins((RenderPlugin, TerminalPlugin, UiPlugin))
        .run();
}

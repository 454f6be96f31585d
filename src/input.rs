//! Input forwarding from the window to the scene.
//!
//! Raw window input is translated into small domain messages
//! ([`PointerInput`], [`ViewportResized`], [`TypewriterTrigger`]) that the
//! camera and terminal consume. Forwarding only happens while the view is
//! mounted, so nothing reaches the scene after teardown.

use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, WindowResized};
use bevy_egui::EguiContexts;

use crate::terminal::TypewriterTrigger;
use crate::types::{FrameSet, view_mounted};

/// Key that starts a typewriter command.
pub const TRIGGER_KEY: KeyCode = KeyCode::Enter;

/// Pointer activity on the drawing surface, in logical pixels.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// The drawing surface changed size.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ViewportResized {
    pub width: f32,
    pub height: f32,
}

/// Registers the domain input messages.
///
/// Headless apps add only this plugin and write the messages themselves.
pub struct InputMessagesPlugin;

impl Plugin for InputMessagesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PointerInput>()
            .add_message::<ViewportResized>()
            .add_message::<TypewriterTrigger>();
    }
}

/// Plugin forwarding window input into domain messages.
pub struct WindowInputPlugin;

impl Plugin for WindowInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputMessagesPlugin).add_systems(
            Update,
            (forward_pointer, forward_resize, forward_trigger_key)
                .in_set(FrameSet::Input)
                .before(crate::camera::orbit_drag)
                .run_if(view_mounted),
        );
    }
}

/// Forward left-button presses and cursor motion on the primary window.
fn forward_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: MessageReader<CursorMoved>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut contexts: EguiContexts,
    mut pointer: MessageWriter<PointerInput>,
) {
    let Ok((window_entity, window)) = windows.single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        // Presses on the terminal overlay belong to egui, not the camera
        let over_ui = contexts
            .ctx_mut()
            .map(|ctx| ctx.is_pointer_over_area())
            .unwrap_or(false);

        if let Some(position) = window.cursor_position().filter(|_| !over_ui) {
            pointer.write(PointerInput::Down(position));
        }
    }

    for moved in cursor_moved.read() {
        if moved.window == window_entity {
            pointer.write(PointerInput::Move(moved.position));
        }
    }

    if buttons.just_released(MouseButton::Left) {
        pointer.write(PointerInput::Up);
    }
}

/// Forward primary window resizes.
fn forward_resize(
    mut resized: MessageReader<WindowResized>,
    windows: Query<(), With<PrimaryWindow>>,
    mut viewport: MessageWriter<ViewportResized>,
) {
    for event in resized.read() {
        if windows.contains(event.window) {
            viewport.write(ViewportResized {
                width: event.width,
                height: event.height,
            });
        }
    }
}

/// Enter starts a typewriter command.
fn forward_trigger_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut triggers: MessageWriter<TypewriterTrigger>,
) {
    if keys.just_pressed(TRIGGER_KEY) {
        triggers.write(TypewriterTrigger::Key);
    }
}

//! UI module providing the egui terminal overlay.

pub mod icons;
mod terminal_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::types::view_mounted;

pub use terminal_panel::{cursor_visible, status_line};

/// Plugin that adds the overlay systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                terminal_panel::terminal_panel_system
                    .after(icons::setup_fonts)
                    .run_if(icons::fonts_ready)
                    .run_if(view_mounted),
            );
    }
}

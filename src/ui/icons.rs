//! Phosphor icon definitions for the terminal overlay.
//!
//! Icons are initialized via `setup_fonts` the first time the egui context
//! is available.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

pub fn fonts_ready(initialized: Res<FontsInitialized>) -> bool {
    initialized.0
}

// Browse all icons at https://phosphoricons.com/

/// Terminal window header
pub const TERMINAL: &str = egui_phosphor::regular::TERMINAL_WINDOW;
/// Command running
pub const RUNNING: &str = egui_phosphor::regular::SPINNER_GAP;
/// Output ready
pub const SUCCESS: &str = egui_phosphor::regular::CHECK_CIRCLE;
/// Waiting for the next command
pub const IDLE: &str = egui_phosphor::regular::HOURGLASS_MEDIUM;

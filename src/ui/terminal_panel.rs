//! Terminal overlay in the bottom-left corner.
//!
//! Shows the prompt with the command typed so far, a clickable block
//! cursor and, once typing finishes, the canned output.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::icons;
use crate::terminal::{Typewriter, TypewriterPhase, TypewriterTrigger};

/// Colors for the terminal overlay.
mod colors {
    use bevy_egui::egui::Color32;

    pub const BG: Color32 = Color32::from_rgba_premultiplied(8, 12, 10, 225);
    pub const BORDER: Color32 = Color32::from_rgb(40, 70, 50);
    pub const PROMPT: Color32 = Color32::from_rgb(85, 221, 136);
    pub const TEXT: Color32 = Color32::from_rgb(220, 230, 220);
    pub const OUTPUT: Color32 = Color32::from_rgb(160, 180, 165);
    pub const MUTED: Color32 = Color32::from_rgb(110, 120, 115);
}

const PANEL_WIDTH: f32 = 380.0;
const FONT_SIZE: f32 = 13.0;
const CURSOR: &str = "\u{2588}";
/// Cursor blink half-period in seconds.
const BLINK_HALF_PERIOD: f32 = 0.53;

/// Header icon and caption for a typewriter phase.
pub fn status_line(phase: TypewriterPhase) -> (&'static str, &'static str) {
    match phase {
        TypewriterPhase::Idle => (icons::IDLE, "idle"),
        TypewriterPhase::Typing => (icons::RUNNING, "typing"),
        TypewriterPhase::ShowingOutput => (icons::SUCCESS, "done"),
    }
}

/// The cursor stays solid while typing and blinks otherwise.
pub fn cursor_visible(phase: TypewriterPhase, elapsed_secs: f32) -> bool {
    phase == TypewriterPhase::Typing || (elapsed_secs / BLINK_HALF_PERIOD) as u32 % 2 == 0
}

/// Draw the terminal overlay; a click on the cursor requests a command.
pub fn terminal_panel_system(
    mut contexts: EguiContexts,
    time: Res<Time>,
    typewriter: Res<Typewriter>,
    mut triggers: MessageWriter<TypewriterTrigger>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let phase = typewriter.phase();
    let mono = |text: &str| egui::RichText::new(text).monospace().size(FONT_SIZE);

    egui::Area::new(egui::Id::new("terminal_panel"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(16.0, -16.0))
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(colors::BG)
                .stroke(egui::Stroke::new(1.0, colors::BORDER))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(12, 10))
                .show(ui, |ui| {
                    ui.set_width(PANEL_WIDTH);

                    let (icon, caption) = status_line(phase);
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(icons::TERMINAL).size(15.0).color(colors::MUTED));
                        ui.label(mono("session").color(colors::MUTED));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(mono(caption).color(colors::MUTED));
                            ui.label(egui::RichText::new(icon).size(13.0).color(colors::MUTED));
                        });
                    });

                    ui.add_space(6.0);

                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 0.0;
                        ui.label(mono("$ ").color(colors::PROMPT));
                        ui.label(mono(typewriter.displayed()).color(colors::TEXT));

                        let cursor_color = if cursor_visible(phase, time.elapsed_secs()) {
                            colors::PROMPT
                        } else {
                            egui::Color32::TRANSPARENT
                        };
                        let cursor = ui
                            .add(egui::Label::new(mono(CURSOR).color(cursor_color)).sense(egui::Sense::click()))
                            .on_hover_cursor(egui::CursorIcon::PointingHand)
                            .on_hover_text("Run a command (Enter)");
                        if cursor.clicked() {
                            triggers.write(TypewriterTrigger::Click);
                        }
                    });

                    if let Some(output) = typewriter.output() {
                        ui.add_space(4.0);
                        ui.label(mono(output).color(colors::OUTPUT));
                    }
                });
        });
}

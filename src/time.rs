//! Scene clock advancement.
//!
//! The clock moves by a fixed nominal step every frame, independent of how
//! much wall time actually passed.

use bevy::prelude::*;

use crate::types::{FrameSet, SceneClock, view_mounted};

/// Plugin providing the scene clock.
pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneClock>().add_systems(
            Update,
            advance_clock.in_set(FrameSet::Clock).run_if(view_mounted),
        );
    }
}

/// Advance the scene clock by one frame step.
fn advance_clock(mut clock: ResMut<SceneClock>) {
    clock.step();
}

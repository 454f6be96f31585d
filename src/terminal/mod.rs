//! Scripted fake terminal.
//!
//! Picks a random command, types it out one character at a time, then
//! shows a canned output for a few seconds. Commands start on a timer, on
//! Enter, or when the terminal cursor is clicked.

pub mod commands;
mod typewriter;

use bevy::prelude::*;

pub use commands::{CANNED_OUTPUTS, COMMANDS, canned_output, output_for};
pub use typewriter::{
    CommandPicker, Typewriter, TypewriterEvent, TypewriterPhase, TypewriterSettings,
};

use crate::types::{FrameSet, view_mounted};

/// Request to start a command. Dropped while another command is typing.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterTrigger {
    /// Automatic schedule.
    Timer,
    /// Keyboard shortcut.
    Key,
    /// Click on the terminal cursor.
    Click,
}

/// Timers driving automatic commands.
#[derive(Resource)]
pub struct CommandSchedule {
    pub initial: Timer,
    pub interval: Timer,
}

impl CommandSchedule {
    pub fn new(settings: &TypewriterSettings) -> Self {
        Self {
            initial: Timer::new(settings.initial_delay, TimerMode::Once),
            interval: Timer::new(settings.auto_interval, TimerMode::Repeating),
        }
    }
}

impl FromWorld for CommandSchedule {
    fn from_world(world: &mut World) -> Self {
        let settings = world.get_resource_or_init::<TypewriterSettings>();
        Self::new(&settings)
    }
}

/// Plugin providing the typewriter.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TypewriterSettings>()
            .init_resource::<Typewriter>()
            .init_resource::<CommandPicker>()
            .init_resource::<CommandSchedule>()
            .add_message::<TypewriterTrigger>()
            .add_systems(
                Update,
                (schedule_commands, start_commands, advance_typewriter)
                    .chain()
                    .after(FrameSet::Input)
                    .run_if(view_mounted),
            );
    }
}

/// Fire the initial and periodic automatic triggers.
pub fn schedule_commands(
    time: Res<Time>,
    mut schedule: ResMut<CommandSchedule>,
    typewriter: Res<Typewriter>,
    mut triggers: MessageWriter<TypewriterTrigger>,
) {
    let delta = time.delta();

    if schedule.initial.tick(delta).just_finished() {
        triggers.write(TypewriterTrigger::Timer);
    }

    // The periodic trigger is skipped outright while typing
    if schedule.interval.tick(delta).just_finished() && !typewriter.is_typing() {
        triggers.write(TypewriterTrigger::Timer);
    }
}

/// Start a random command for the first trigger; drop the rest while typing.
pub fn start_commands(
    mut triggers: MessageReader<TypewriterTrigger>,
    mut typewriter: ResMut<Typewriter>,
    mut picker: ResMut<CommandPicker>,
) {
    for trigger in triggers.read() {
        if typewriter.is_typing() {
            debug!("Typewriter busy; dropped {trigger:?} trigger");
            continue;
        }

        let command = picker.pick();
        typewriter.start(command);
        debug!("Typing {command:?} ({trigger:?})");
    }
}

/// Feed frame time into the typewriter.
pub fn advance_typewriter(
    time: Res<Time>,
    settings: Res<TypewriterSettings>,
    mut typewriter: ResMut<Typewriter>,
) {
    for event in typewriter.tick(time.delta(), &settings) {
        match event {
            TypewriterEvent::OutputShown => debug!("Output shown for {:?}", typewriter.command()),
            TypewriterEvent::OutputHidden => debug!("Output hidden"),
        }
    }
}

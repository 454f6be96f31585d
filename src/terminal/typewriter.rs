//! Typewriter state machine.
//!
//! `Idle → Typing → ShowingOutput → Idle`. Only one command types at a
//! time; a start request while typing is dropped. Time is fed in through
//! [`Typewriter::tick`], so the machine is fully deterministic.

use std::time::Duration;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::commands::{COMMANDS, output_for};

/// Tunables for the typewriter.
#[derive(Resource, Clone, Debug)]
pub struct TypewriterSettings {
    /// Delay between revealed characters.
    pub typing_cadence: Duration,
    /// How long the output stays visible.
    pub output_duration: Duration,
    /// Period of the automatic trigger.
    pub auto_interval: Duration,
    /// Delay before the first automatic command.
    pub initial_delay: Duration,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            typing_cadence: Duration::from_millis(100),
            output_duration: Duration::from_secs(5),
            auto_interval: Duration::from_secs(8),
            initial_delay: Duration::from_secs(3),
        }
    }
}

/// Coarse state of the typewriter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypewriterPhase {
    Idle,
    Typing,
    ShowingOutput,
}

/// Something observable happened during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypewriterEvent {
    /// The command finished typing and its output is now shown.
    OutputShown,
    /// The output timed out and was hidden.
    OutputHidden,
}

/// The typed command line and its output block.
#[derive(Resource, Clone, Debug, Default)]
pub struct Typewriter {
    command: String,
    displayed: String,
    revealed: usize,
    typing: bool,
    since_reveal: Duration,
    output: Option<String>,
    output_remaining: Duration,
}

impl Typewriter {
    pub fn phase(&self) -> TypewriterPhase {
        if self.typing {
            TypewriterPhase::Typing
        } else if self.output.is_some() {
            TypewriterPhase::ShowingOutput
        } else {
            TypewriterPhase::Idle
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Text currently shown on the prompt line.
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// Command being typed, or the last one typed.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Output block, when visible.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Start typing `command`. Returns `false` (and changes nothing) while
    /// another command is still typing.
    ///
    /// A visible output from the previous command keeps its own timer.
    pub fn start(&mut self, command: &str) -> bool {
        if self.typing {
            return false;
        }

        self.command = command.to_owned();
        self.displayed.clear();
        self.revealed = 0;
        self.since_reveal = Duration::ZERO;
        self.typing = true;
        self.reveal_next();
        true
    }

    /// Advance by `dt`.
    ///
    /// Characters appear one per cadence; the output is shown one cadence
    /// after the last character and hidden after `output_duration`.
    pub fn tick(&mut self, dt: Duration, settings: &TypewriterSettings) -> Vec<TypewriterEvent> {
        let mut events = Vec::new();

        if self.output.is_some() {
            self.output_remaining = self.output_remaining.saturating_sub(dt);
            if self.output_remaining.is_zero() {
                self.output = None;
                events.push(TypewriterEvent::OutputHidden);
            }
        }

        if !self.typing {
            return events;
        }

        let cadence = settings.typing_cadence.max(Duration::from_micros(1));
        self.since_reveal += dt;
        while self.since_reveal >= cadence {
            self.since_reveal -= cadence;
            if !self.reveal_next() {
                self.finish_typing(settings);
                events.push(TypewriterEvent::OutputShown);
                break;
            }
        }

        events
    }

    /// Reveal one more character. Returns `false` when nothing was left.
    fn reveal_next(&mut self) -> bool {
        match self.command.chars().nth(self.revealed) {
            Some(ch) => {
                self.displayed.push(ch);
                self.revealed += 1;
                true
            }
            None => false,
        }
    }

    fn finish_typing(&mut self, settings: &TypewriterSettings) {
        self.typing = false;
        self.since_reveal = Duration::ZERO;
        self.output = Some(output_for(&self.command).into_owned());
        self.output_remaining = settings.output_duration;
    }
}

/// Uniform random choice over the command list.
#[derive(Resource)]
pub struct CommandPicker {
    rng: StdRng,
}

impl Default for CommandPicker {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl CommandPicker {
    /// Picker with a fixed seed, for reproducible sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self) -> &'static str {
        COMMANDS[self.rng.gen_range(0..COMMANDS.len())]
    }
}

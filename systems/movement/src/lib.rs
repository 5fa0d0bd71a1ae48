#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement system translating directional input into world commands.
//!
//! A freshly pressed direction moves the player immediately. Holding the key
//! repeats the move once the initial delay has elapsed and then once per
//! repeat interval, using the simulated frame delta so replays stay
//! deterministic.

use std::time::Duration;

use maze_game_core::{Command, Direction, Event, PlayState};

const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);
const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(250);
const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

/// Key repeat timing used while a direction is held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatConfig {
    initial_delay: Duration,
    repeat_interval: Duration,
}

impl RepeatConfig {
    /// Creates a repeat configuration.
    ///
    /// The repeat interval is clamped to at least one millisecond.
    #[must_use]
    pub fn new(initial_delay: Duration, repeat_interval: Duration) -> Self {
        Self {
            initial_delay,
            repeat_interval: repeat_interval.max(MIN_REPEAT_INTERVAL),
        }
    }

    /// Time a direction must be held before it starts repeating.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Time between repeated moves once repeating has started.
    #[must_use]
    pub const fn repeat_interval(&self) -> Duration {
        self.repeat_interval
    }
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_DELAY, DEFAULT_REPEAT_INTERVAL)
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementInput {
    /// Direction whose key went down on this frame.
    pub pressed: Option<Direction>,
    /// Direction whose key is currently held down.
    pub held: Option<Direction>,
    /// Indicates whether the player asked for a new maze on this frame.
    pub new_maze: bool,
}

impl MovementInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(pressed: Option<Direction>, held: Option<Direction>, new_maze: bool) -> Self {
        Self {
            pressed,
            held,
            new_maze,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct HeldKey {
    direction: Direction,
    held_for: Duration,
    next_repeat: Duration,
}

impl HeldKey {
    fn new(direction: Direction, config: RepeatConfig) -> Self {
        Self {
            direction,
            held_for: Duration::ZERO,
            next_repeat: config.initial_delay,
        }
    }
}

/// Movement system that turns held and pressed directions into move commands.
#[derive(Debug, Clone)]
pub struct Movement {
    config: RepeatConfig,
    play_state: PlayState,
    held: Option<HeldKey>,
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(RepeatConfig::default())
    }
}

impl Movement {
    /// Creates a new movement system using the supplied repeat timing.
    #[must_use]
    pub const fn new(config: RepeatConfig) -> Self {
        Self {
            config,
            play_state: PlayState::Playing,
            held: None,
        }
    }

    /// Consumes world events, the frame delta and adapter input to emit commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        dt: Duration,
        input: MovementInput,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::PlayStateChanged { state } => self.play_state = *state,
                Event::MazeGenerated { .. } => self.held = None,
                _ => {}
            }
        }

        if input.new_maze {
            self.held = None;
            out.push(Command::NewMaze);
            return;
        }

        if self.play_state != PlayState::Playing {
            self.held = None;
            return;
        }

        if let Some(direction) = input.pressed {
            out.push(Command::MovePlayer { direction });
            self.held = Some(HeldKey::new(direction, self.config));
            return;
        }

        let Some(direction) = input.held else {
            self.held = None;
            return;
        };

        let config = self.config;
        if !matches!(self.held, Some(held) if held.direction == direction) {
            self.held = Some(HeldKey::new(direction, config));
        }
        let Some(held) = self.held.as_mut() else {
            return;
        };
        held.held_for = held.held_for.saturating_add(dt);
        while held.held_for >= held.next_repeat {
            out.push(Command::MovePlayer { direction });
            held.next_repeat = held.next_repeat.saturating_add(config.repeat_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(commands: &[Command]) -> usize {
        commands
            .iter()
            .filter(|command| matches!(command, Command::MovePlayer { .. }))
            .count()
    }

    #[test]
    fn repeat_interval_is_never_zero() {
        let config = RepeatConfig::new(Duration::ZERO, Duration::ZERO);
        assert_eq!(config.repeat_interval(), MIN_REPEAT_INTERVAL);
    }

    #[test]
    fn maze_generation_forgets_the_held_key() {
        let mut movement = Movement::default();
        let mut out = Vec::new();
        movement.handle(
            &[],
            Duration::ZERO,
            MovementInput::new(Some(Direction::East), Some(Direction::East), false),
            &mut out,
        );
        assert!(movement.held.is_some());

        let generated = Event::MazeGenerated {
            size: maze_game_core::MazeSize::DEFAULT,
            seed: 1,
            start: maze_game_core::CellCoord::new(0, 0),
            goal: maze_game_core::CellCoord::new(3, 3),
        };
        out.clear();
        movement.handle(
            &[generated],
            Duration::from_millis(300),
            MovementInput::new(None, Some(Direction::East), false),
            &mut out,
        );

        assert_eq!(moves(&out), 0, "held key restarted its initial delay");
        let held = movement.held.expect("key still held");
        assert_eq!(held.held_for, Duration::from_millis(300));
    }
}

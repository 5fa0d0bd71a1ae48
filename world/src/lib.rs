#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Maze Game.
//!
//! The [`World`] owns the current maze, the player's cell, the run timer and
//! the play state. All mutations flow through [`apply`], which broadcasts
//! [`Event`] values describing what changed; adapters read state back through
//! the [`query`] module.

use std::time::Duration;

use maze_game_core::{
    CellCoord, Command, Direction, Event, GoalPlacement, Maze, MazeSize, PlayState,
    WELCOME_BANNER,
};
use maze_game_system_carving::carve;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Parameters used to build a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Dimensions of every maze generated by the world.
    pub size: MazeSize,
    /// Fixed seed reused on every reset, or `None` to draw fresh seeds.
    pub seed: Option<u64>,
    /// Strategy used to place the goal.
    pub placement: GoalPlacement,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: MazeSize::DEFAULT,
            seed: None,
            placement: GoalPlacement::default(),
        }
    }
}

#[derive(Debug)]
enum SeedSource {
    Fixed(u64),
    Random(ChaCha8Rng),
}

impl SeedSource {
    fn from_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Fixed(seed),
            None => Self::Random(ChaCha8Rng::from_entropy()),
        }
    }

    fn next_seed(&mut self) -> u64 {
        match self {
            Self::Fixed(seed) => *seed,
            Self::Random(rng) => rng.next_u64(),
        }
    }

    fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

/// Represents the authoritative Maze Game session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    maze: Maze,
    player: CellCoord,
    play_state: PlayState,
    elapsed: Duration,
    moves: u32,
    placement: GoalPlacement,
    seeds: SeedSource,
}

impl World {
    /// Creates a world with the default configuration and a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a world from the provided configuration, carving its first maze.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        let mut seeds = SeedSource::from_option(config.seed);
        let maze = carve(config.size, seeds.next_seed(), config.placement);
        let mut world = Self {
            banner: WELCOME_BANNER,
            player: maze.start(),
            maze,
            play_state: PlayState::Playing,
            elapsed: Duration::ZERO,
            moves: 0,
            placement: config.placement,
            seeds,
        };
        if world.player == world.maze.goal() {
            world.play_state = PlayState::Won;
        }
        world
    }

    fn regenerate(&mut self, size: MazeSize, out_events: &mut Vec<Event>) {
        let seed = self.seeds.next_seed();
        self.maze = carve(size, seed, self.placement);
        self.player = self.maze.start();
        self.elapsed = Duration::ZERO;
        self.moves = 0;
        out_events.push(Event::MazeGenerated {
            size,
            seed,
            start: self.maze.start(),
            goal: self.maze.goal(),
        });

        if self.play_state != PlayState::Playing {
            self.play_state = PlayState::Playing;
            out_events.push(Event::PlayStateChanged {
                state: PlayState::Playing,
            });
        }

        let _ = check_goal(self, out_events);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMaze {
            size,
            seed,
            placement,
        } => {
            world.seeds = SeedSource::from_option(seed);
            world.placement = placement;
            world.regenerate(size, out_events);
        }
        Command::NewMaze => {
            let size = world.maze.size();
            world.regenerate(size, out_events);
        }
        Command::Tick { dt } => {
            if world.play_state == PlayState::Playing {
                world.elapsed = world.elapsed.saturating_add(dt);
            }
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { direction } => {
            let _ = attempt_move(world, direction, out_events);
        }
    }
}

/// Emits the events describing the world's current maze as if it had just
/// been generated.
///
/// Construction carves the first maze without an event buffer, so systems
/// that learn about the session from events call this once before the first
/// frame. A single-cell maze is already won, which is reported with the same
/// [`Event::GoalReached`] and [`Event::PlayStateChanged`] pair a reset emits.
pub fn announce(world: &World, out_events: &mut Vec<Event>) {
    out_events.push(Event::MazeGenerated {
        size: world.maze.size(),
        seed: world.maze.seed(),
        start: world.maze.start(),
        goal: world.maze.goal(),
    });
    if world.play_state == PlayState::Won {
        out_events.push(Event::GoalReached {
            size: world.maze.size(),
            seed: world.maze.seed(),
            elapsed: world.elapsed,
            moves: world.moves,
        });
        out_events.push(Event::PlayStateChanged {
            state: PlayState::Won,
        });
    }
}

/// Attempts to move the player a single cell in `direction`.
///
/// Returns `true` when the player moved. Bumping into a wall leaves the world
/// untouched apart from a [`Event::MoveBlocked`] notification. Moves are
/// ignored entirely once the goal has been reached.
pub fn attempt_move(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) -> bool {
    if world.play_state != PlayState::Playing {
        return false;
    }

    let from = world.player;
    let destination = if world.maze.is_open(from, direction) {
        world.maze.size().neighbor(from, direction)
    } else {
        None
    };

    let Some(to) = destination else {
        out_events.push(Event::MoveBlocked {
            direction,
            at: from,
        });
        return false;
    };

    world.player = to;
    world.moves = world.moves.saturating_add(1);
    out_events.push(Event::PlayerMoved {
        direction,
        from,
        to,
    });

    let _ = check_goal(world, out_events);
    true
}

/// Reports whether the player stands on the goal, finishing the run if so.
///
/// The first successful check while playing freezes the timer, switches the
/// world to [`PlayState::Won`] and emits [`Event::GoalReached`]. Later checks
/// keep returning `true` without emitting anything.
pub fn check_goal(world: &mut World, out_events: &mut Vec<Event>) -> bool {
    let reached = world.player == world.maze.goal();
    if reached && world.play_state == PlayState::Playing {
        world.play_state = PlayState::Won;
        out_events.push(Event::GoalReached {
            size: world.maze.size(),
            seed: world.maze.seed(),
            elapsed: world.elapsed,
            moves: world.moves,
        });
        out_events.push(Event::PlayStateChanged {
            state: PlayState::Won,
        });
    }
    reached
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use maze_game_core::{CellCoord, GoalPlacement, Maze, PlayState};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the current maze.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.player
    }

    /// Cell the player must reach.
    #[must_use]
    pub fn goal(world: &World) -> CellCoord {
        world.maze.goal()
    }

    /// Side-effect free variant of [`check_goal`](super::check_goal).
    #[must_use]
    pub fn is_at_goal(world: &World) -> bool {
        world.player == world.maze.goal()
    }

    /// Active play state.
    #[must_use]
    pub fn play_state(world: &World) -> PlayState {
        world.play_state
    }

    /// Simulated time spent on the current maze, frozen once the goal is reached.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Number of successful moves made on the current maze.
    #[must_use]
    pub fn moves(world: &World) -> u32 {
        world.moves
    }

    /// Goal placement strategy used for new mazes.
    #[must_use]
    pub fn goal_placement(world: &World) -> GoalPlacement {
        world.placement
    }

    /// Reports whether resets reuse a fixed seed.
    #[must_use]
    pub fn seed_is_fixed(world: &World) -> bool {
        world.seeds.is_fixed()
    }
}

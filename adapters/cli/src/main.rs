#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Game experience.

mod config;
mod logger;
mod maze_code;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use maze_game_core::GoalPlacement;
use maze_game_rendering::RenderingBackend;
use maze_game_rendering_macroquad::MacroquadBackend;
use maze_game_system_movement::Movement;
use maze_game_world::{query, World, WorldConfig};

use crate::{config::Settings, maze_code::MazeCode, simulation::Simulation};

/// Goal placement accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GoalArg {
    /// The cell farthest from the start along the passages.
    Farthest,
    /// The corner opposite the start.
    Corner,
}

impl From<GoalArg> for GoalPlacement {
    fn from(value: GoalArg) -> Self {
        match value {
            GoalArg::Farthest => GoalPlacement::FarthestFromStart,
            GoalArg::Corner => GoalPlacement::OppositeCorner,
        }
    }
}

/// Command-line arguments for the Maze Game binary.
#[derive(Debug, Parser)]
#[command(name = "maze-game", about = "Find your way through a randomly carved maze")]
struct Args {
    /// Maze width in cells.
    #[arg(long)]
    width: Option<u32>,
    /// Maze height in cells.
    #[arg(long)]
    height: Option<u32>,
    /// Fixed seed reused whenever a new maze is generated.
    #[arg(long)]
    seed: Option<u64>,
    /// Where the goal is placed.
    #[arg(long, value_enum)]
    goal: Option<GoalArg>,
    /// TOML file with game settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Reproduce the maze described by a shared maze code.
    #[arg(
        long,
        value_name = "CODE",
        conflicts_with_all = ["width", "height", "seed", "goal"]
    )]
    maze_code: Option<String>,
    /// Print the maze code of the first maze before starting.
    #[arg(long)]
    print_code: bool,
    /// Render as fast as possible instead of waiting for the display refresh.
    #[arg(long)]
    no_vsync: bool,
    /// Print frame timing once per second.
    #[arg(long)]
    show_fps: bool,
    /// Suppress log output.
    #[arg(long)]
    quiet: bool,
}

impl Args {
    /// Overlays the flags given on the command line onto `settings`.
    fn apply(&self, settings: &mut Settings) -> Result<()> {
        if let Some(code) = &self.maze_code {
            let code = MazeCode::decode(code).context("invalid --maze-code")?;
            settings.width = code.size.width();
            settings.height = code.size.height();
            settings.seed = Some(code.seed);
            settings.goal = code.placement;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(goal) = self.goal {
            settings.goal = goal.into();
        }
        if self.no_vsync {
            settings.vsync = false;
        }
        if self.show_fps {
            settings.show_fps = true;
        }
        Ok(())
    }
}

/// Share code reproducing the maze the world is currently showing.
fn current_maze_code(world: &World) -> MazeCode {
    let maze = query::maze(world);
    MazeCode {
        size: maze.size(),
        seed: maze.seed(),
        placement: query::goal_placement(world),
    }
}

/// Entry point for the Maze Game command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(!args.quiet);

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings)?;
    let size = settings.maze_size().context("invalid maze dimensions")?;

    let world = World::with_config(WorldConfig {
        size,
        seed: settings.seed,
        placement: settings.goal,
    });
    log!("{}", query::welcome_banner(&world));

    log!(
        "{}x{} mazes, {} seed",
        size.width(),
        size.height(),
        if query::seed_is_fixed(&world) {
            "fixed"
        } else {
            "random"
        }
    );

    if args.print_code {
        let code = current_maze_code(&world)
            .encode()
            .context("failed to encode maze code")?;
        println!("{code}");
    }

    let presentation = simulation::build_presentation(&world, &settings)?;
    let mut simulation = Simulation::new(world, Movement::new(settings.repeat_config()));
    let backend = MacroquadBackend::new()
        .with_vsync(settings.vsync)
        .with_show_fps(settings.show_fps);

    backend.run(presentation, move |dt, input, scene| {
        simulation.advance(dt, input, scene);
    })?;

    log!("goodbye");
    Ok(())
}

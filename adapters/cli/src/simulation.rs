//! Glue between the engine and the rendering backend.
//!
//! Each frame the movement system consumes the previous frame's events and
//! the adapter input, the world applies a tick plus the emitted commands, and
//! the scoreboard records any finished run before the scene is refreshed.

use std::time::Duration;

use anyhow::{Context, Result};
use maze_game_core::{Command, Event, WINDOW_TITLE};
use maze_game_rendering::{
    FrameInput, HudPresentation, MarkerPresentation, MazePresentation, Presentation, Scene,
    WinDialog, BACKGROUND_COLOR, GOAL_COLOR, PLAYER_COLOR, WALL_COLOR,
};
use maze_game_system_movement::{Movement, MovementInput};
use maze_game_system_scoreboard::{RunRecord, Scoreboard};
use maze_game_world::{self as world, query, World};

use crate::{config::Settings, log};

/// Builds the initial presentation mirroring the world's first maze.
pub(crate) fn build_presentation(world: &World, settings: &Settings) -> Result<Presentation> {
    let maze = MazePresentation::new(
        query::maze(world),
        settings.passage_width,
        settings.wall_thickness,
        WALL_COLOR,
    )
    .context("invalid maze geometry in settings")?;

    let scene = Scene::new(
        maze,
        MarkerPresentation::new(query::player(world), settings.marker_radius, PLAYER_COLOR),
        MarkerPresentation::new(query::goal(world), settings.marker_radius, GOAL_COLOR),
        HudPresentation::new(query::elapsed(world), query::moves(world)),
        None,
    );

    Ok(Presentation::new(WINDOW_TITLE, BACKGROUND_COLOR, scene))
}

/// Owns the session and advances it one frame at a time.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    movement: Movement,
    scoreboard: Scoreboard,
    pending_events: Vec<Event>,
    queued_commands: Vec<Command>,
    last_run: Option<RunRecord>,
}

impl Simulation {
    /// Creates a simulation driving `world` with the supplied movement system.
    ///
    /// The world's opening maze is announced right away so the first frame's
    /// systems see the same events a reset would produce.
    pub(crate) fn new(world: World, movement: Movement) -> Self {
        let mut simulation = Self {
            world,
            movement,
            scoreboard: Scoreboard::new(),
            pending_events: Vec::new(),
            queued_commands: Vec::new(),
            last_run: None,
        };
        world::announce(&simulation.world, &mut simulation.pending_events);
        simulation.record_events();
        simulation
    }

    /// Advances the session by `dt` and mirrors the result into `scene`.
    pub(crate) fn advance(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        self.step(dt, input);
        self.populate_scene(scene);
    }

    fn step(&mut self, dt: Duration, input: FrameInput) {
        let movement_input = MovementInput::new(input.pressed, input.held, input.new_maze);
        self.queued_commands.clear();
        self.movement.handle(
            &self.pending_events,
            dt,
            movement_input,
            &mut self.queued_commands,
        );

        self.pending_events.clear();
        world::apply(
            &mut self.world,
            Command::Tick { dt },
            &mut self.pending_events,
        );
        for command in self.queued_commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.pending_events);
        }
        self.record_events();
    }

    fn record_events(&mut self) {
        for event in &self.pending_events {
            if let Event::MazeGenerated {
                size,
                seed,
                goal,
                ..
            } = event
            {
                self.last_run = None;
                log!(
                    "generated {}x{} maze with seed {seed}, goal at ({}, {})",
                    size.width(),
                    size.height(),
                    goal.column(),
                    goal.row()
                );
            }
        }

        for run in self.scoreboard.handle(&self.pending_events) {
            log!(
                "maze solved in {:.2} seconds with {} moves{}",
                run.elapsed.as_secs_f64(),
                run.moves,
                if run.new_best { " (new best)" } else { "" }
            );
            self.last_run = Some(*run);
        }
    }

    fn populate_scene(&self, scene: &mut Scene) {
        let generated = self
            .pending_events
            .iter()
            .any(|event| matches!(event, Event::MazeGenerated { .. }));
        if generated {
            scene.maze.refresh(query::maze(&self.world));
        }

        scene.player.cell = query::player(&self.world);
        scene.goal.cell = query::goal(&self.world);
        scene.hud = HudPresentation::new(query::elapsed(&self.world), query::moves(&self.world));
        scene.win_dialog = query::is_at_goal(&self.world).then(|| {
            let size = query::maze(&self.world).size();
            WinDialog::new(
                query::elapsed(&self.world),
                query::moves(&self.world),
                self.scoreboard.best_for(size),
                self.last_run.is_some_and(|run| run.new_best),
            )
        });
    }
}

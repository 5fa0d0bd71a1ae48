#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Game.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The win dialog is drawn with plain shapes and text. Its geometry and hit
//! testing come from the backend-agnostic rendering crate; everything that
//! touches Macroquad's drawing calls lives in the local `dialog` module.

mod dialog;

use self::dialog::{dialog_click, draw_win_dialog};
use anyhow::Result;
use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use maze_game_core::Direction;
use maze_game_rendering::{
    DialogButton, DialogLayout, FrameInput, HudPresentation, Presentation, RenderingBackend,
    Scene,
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

const MIN_WINDOW_WIDTH: f32 = 320.0;
const MIN_WINDOW_HEIGHT: f32 = 240.0;
const HUD_FONT_SIZE: f32 = 20.0;
const HUD_MARGIN: f32 = 4.0;

/// Tracks dialog-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct DialogInputState {
    new_game_latched: bool,
    exit_latched: bool,
}

impl DialogInputState {
    /// Returns whether the dialog requested a new game and clears the latch so
    /// the action fires only once.
    pub fn take_new_game(&mut self) -> bool {
        let latched = self.new_game_latched;
        self.new_game_latched = false;
        latched
    }

    /// Returns whether the dialog requested an exit and clears the latch.
    pub fn take_exit(&mut self) -> bool {
        let latched = self.exit_latched;
        self.exit_latched = false;
        latched
    }

    /// Records a click on one of the dialog buttons.
    pub fn register(&mut self, button: DialogButton) {
        match button {
            DialogButton::NewGame => self.new_game_latched = true,
            DialogButton::Exit => self.exit_latched = true,
        }
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Escape` quits the game loop.
    quit_requested: bool,
    /// `R` generates a fresh maze.
    reset_requested: bool,
    /// Arrow key that went down this frame.
    pressed: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape);
        let reset_requested = is_key_pressed(KeyCode::R);
        let pressed = Direction::ALL
            .into_iter()
            .find(|direction| is_key_pressed(arrow_key(*direction)));

        Self {
            quit_requested,
            reset_requested,
            pressed,
        }
    }
}

fn arrow_key(direction: Direction) -> KeyCode {
    match direction {
        Direction::North => KeyCode::Up,
        Direction::East => KeyCode::Right,
        Direction::South => KeyCode::Down,
        Direction::West => KeyCode::Left,
    }
}

/// Remembers which arrow key the player is holding.
///
/// The most recently pressed key wins while it stays down. When it is released
/// while another arrow is still held, that other arrow takes over.
#[derive(Clone, Copy, Debug, Default)]
struct HeldArrow {
    current: Option<Direction>,
}

impl HeldArrow {
    fn observe<F>(&mut self, pressed: Option<Direction>, is_down: F) -> Option<Direction>
    where
        F: Fn(Direction) -> bool,
    {
        if let Some(direction) = pressed {
            self.current = Some(direction);
        } else if !self.current.is_some_and(&is_down) {
            self.current = Direction::ALL.into_iter().find(|direction| is_down(*direction));
        }
        self.current
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            let Some(removed) = self.frame_times.pop_front() else {
                break;
            };
            self.window_duration = self.window_duration.saturating_sub(removed);
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_simulation: self.simulation_accum / frames.max(1),
            avg_render: self.render_accum / frames.max(1),
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.total_width().max(MIN_WINDOW_WIDTH).ceil() as i32,
            window_height: scene.total_height().max(MIN_WINDOW_HEIGHT).ceil() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut dialog_input = DialogInputState::default();
            let mut held_arrow = HeldArrow::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested || dialog_input.take_exit() {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let held = held_arrow.observe(keyboard.pressed, |direction| {
                    is_key_down(arrow_key(direction))
                });
                let frame_input = FrameInput {
                    pressed: keyboard.pressed,
                    held,
                    new_maze: keyboard.reset_requested || dialog_input.take_new_game(),
                };

                let simulation_start = Instant::now();
                update_scene(frame_dt, frame_input, &mut scene);
                let simulation_duration = simulation_start.elapsed();

                let render_start = Instant::now();
                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                draw_maze(&scene, &metrics);
                draw_markers(&scene, &metrics);
                draw_hud(&scene, &metrics);

                if let Some(win_dialog) = scene.win_dialog {
                    let layout = DialogLayout::centered(screen_width, screen_height);
                    let (cursor_x, cursor_y) = mouse_position();
                    let cursor = Vec2::new(cursor_x, cursor_y);
                    draw_win_dialog(&win_dialog, &layout, cursor);

                    if is_mouse_button_pressed(MouseButton::Left) {
                        if let Some(button) = dialog_click(&layout, cursor) {
                            dialog_input.register(button);
                        }
                    }
                }
                let render_duration = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation: simulation_duration,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_simulation,
                        avg_render,
                    }) = fps_metrics
                    {
                        println!(
                            "FPS: {:.2} (10s avg: {:.2}) | sim: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_simulation.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Uniform scale and offset fitting the scene into the window.
#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let world_width = scene.total_width();
        let world_height = scene.total_height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        Self {
            scale,
            offset_x: ((screen_width - world_width * scale) * 0.5).max(0.0),
            offset_y: ((screen_height - world_height * scale) * 0.5).max(0.0),
        }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }
}

fn draw_maze(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(scene.maze.wall_color);
    for segment in scene.maze.wall_segments() {
        let origin = metrics.to_screen(segment.origin());
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            segment.width * metrics.scale,
            segment.height * metrics.scale,
            color,
        );
    }
}

fn draw_markers(scene: &Scene, metrics: &SceneMetrics) {
    for marker in [scene.goal, scene.player] {
        let center = metrics.to_screen(scene.maze.cell_center(marker.cell));
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            marker.radius * metrics.scale,
            to_macroquad_color(marker.color),
        );
    }
}

fn draw_hud(scene: &Scene, metrics: &SceneMetrics) {
    let baseline = Vec2::new(
        HUD_MARGIN,
        scene.maze.height() + HudPresentation::HEIGHT - HUD_MARGIN,
    );
    let position = metrics.to_screen(baseline);
    let _ = macroquad::text::draw_text(
        &scene.hud.text(),
        position.x,
        position.y,
        HUD_FONT_SIZE * metrics.scale,
        to_macroquad_color(scene.maze.wall_color),
    );
}

fn to_macroquad_color(color: maze_game_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_game_core::{CellCoord, Maze, MazeSize};
    use maze_game_rendering::{
        MarkerPresentation, MazePresentation, GOAL_COLOR, PLAYER_COLOR, WALL_COLOR,
    };

    fn scene(width: u32, height: u32) -> Scene {
        let maze = Maze::closed(MazeSize::new(width, height).expect("valid size"), 0);
        let presentation = MazePresentation::new(
            &maze,
            MazePresentation::DEFAULT_PASSAGE_WIDTH,
            MazePresentation::DEFAULT_WALL_THICKNESS,
            WALL_COLOR,
        )
        .expect("valid geometry");
        Scene::new(
            presentation,
            MarkerPresentation::new(CellCoord::new(0, 0), 8.0, PLAYER_COLOR),
            MarkerPresentation::new(CellCoord::new(width - 1, height - 1), 8.0, GOAL_COLOR),
            HudPresentation::new(Duration::ZERO, 0),
            None,
        )
    }

    #[test]
    fn scene_metrics_keep_native_size_when_the_window_matches() {
        let scene = scene(40, 40);
        let metrics =
            SceneMetrics::from_scene(&scene, scene.total_width(), scene.total_height());

        assert!((metrics.scale - 1.0).abs() <= 1e-6);
        assert_eq!(metrics.offset_x, 0.0);
        assert_eq!(metrics.offset_y, 0.0);
    }

    #[test]
    fn scene_metrics_scale_small_mazes_up_and_centre_them() {
        let scene = scene(4, 4);
        let metrics = SceneMetrics::from_scene(&scene, 640.0, 480.0);
        let scaled_width = scene.total_width() * metrics.scale;
        let scaled_height = scene.total_height() * metrics.scale;

        assert!(metrics.scale > 1.0);
        assert!((scaled_height - 480.0).abs() <= 1e-3);
        assert!((metrics.offset_x - (640.0 - scaled_width) * 0.5).abs() <= 1e-3);
        assert_eq!(
            metrics.to_screen(Vec2::ZERO),
            Vec2::new(metrics.offset_x, 0.0)
        );
    }

    #[test]
    fn held_arrow_prefers_the_latest_press() {
        let mut held = HeldArrow::default();
        let down = |keys: &'static [Direction]| move |direction: Direction| keys.contains(&direction);

        assert_eq!(
            held.observe(Some(Direction::East), down(&[Direction::East])),
            Some(Direction::East)
        );
        assert_eq!(
            held.observe(
                Some(Direction::South),
                down(&[Direction::East, Direction::South])
            ),
            Some(Direction::South)
        );
        assert_eq!(
            held.observe(None, down(&[Direction::East])),
            Some(Direction::East)
        );
        assert_eq!(held.observe(None, down(&[])), None);
    }

    #[test]
    fn dialog_latch_fires_once() {
        let mut state = DialogInputState::default();
        state.register(DialogButton::NewGame);

        assert!(!state.take_exit());
        assert!(state.take_new_game());
        assert!(!state.take_new_game());
    }

    #[test]
    fn fps_counter_reports_average_frames_per_second() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            ..FrameBreakdown::default()
        };
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());

        let metrics = counter
            .record_frame(frame(250))
            .expect("should report FPS after one second of samples");
        assert!((metrics.per_second - 4.0).abs() <= 1e-3);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() <= 1e-3);
        assert!(counter.record_frame(frame(250)).is_none());
    }

    #[test]
    fn fps_counter_tracks_trailing_ten_second_average() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            ..FrameBreakdown::default()
        };

        for _ in 0..10 {
            for sample in 0..5 {
                let metrics = counter.record_frame(frame(200));
                if sample == 4 {
                    let metrics = metrics.expect("should report every second");
                    assert!((metrics.per_second - 5.0).abs() <= 1e-3);
                } else {
                    assert!(metrics.is_none());
                }
            }
        }

        for sample in 0..10 {
            let metrics = counter.record_frame(frame(100));
            if sample == 9 {
                let metrics = metrics.expect("should report every second");
                assert!((metrics.per_second - 10.0).abs() <= 1e-3);
                assert!((metrics.trailing_ten_seconds - 5.5).abs() <= 1e-3);
            } else {
                assert!(metrics.is_none());
            }
        }
    }
}

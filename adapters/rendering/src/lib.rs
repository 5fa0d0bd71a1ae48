#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Game adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_game_core::{CellCoord, Direction, Maze, Walls};
use std::{error::Error, fmt, time::Duration};

/// Color used to clear the window behind the maze.
pub const BACKGROUND_COLOR: Color = Color::from_rgb_u8(240, 240, 255);
/// Color used for maze walls.
pub const WALL_COLOR: Color = Color::from_rgb_u8(0, 0, 0);
/// Color used for the player marker.
pub const PLAYER_COLOR: Color = Color::from_rgb_u8(0, 0, 180);
/// Color used for the goal marker.
pub const GOAL_COLOR: Color = Color::from_rgb_u8(0, 180, 0);

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction whose key went down on this frame.
    pub pressed: Option<Direction>,
    /// Direction whose key is currently held.
    pub held: Option<Direction>,
    /// Whether the player asked for a fresh maze on this frame.
    pub new_maze: bool,
}

/// Axis-aligned rectangle expressed in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl ScreenRect {
    /// Creates a rectangle from its top-left corner and extent.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Reports whether `point` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }
}

/// Describes the maze grid and its walls in screen pixels.
///
/// Each cell spans one passage plus one wall thickness. A wall strip of
/// `wall_thickness` runs along the north and west border so the full grid
/// measures `columns * cell_length + wall_thickness` across.
#[derive(Clone, Debug, PartialEq)]
pub struct MazePresentation {
    /// Number of columns contained in the maze.
    pub columns: u32,
    /// Number of rows contained in the maze.
    pub rows: u32,
    /// Width of the open corridor inside each cell.
    pub passage_width: f32,
    /// Thickness of every wall line.
    pub wall_thickness: f32,
    /// Wall flags in row-major order.
    pub cells: Vec<Walls>,
    /// Color used when drawing walls.
    pub wall_color: Color,
}

impl MazePresentation {
    /// Default width of a passage in pixels.
    pub const DEFAULT_PASSAGE_WIDTH: f32 = 12.0;

    /// Default thickness of a wall in pixels.
    pub const DEFAULT_WALL_THICKNESS: f32 = 3.0;

    /// Creates a maze descriptor mirroring the walls of `maze`.
    ///
    /// Returns an error when the passage width is not strictly positive or the
    /// wall thickness is negative.
    pub fn new(
        maze: &Maze,
        passage_width: f32,
        wall_thickness: f32,
        wall_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if !passage_width.is_finite() || passage_width <= 0.0 {
            return Err(RenderingError::InvalidPassageWidth { passage_width });
        }
        if !wall_thickness.is_finite() || wall_thickness < 0.0 {
            return Err(RenderingError::InvalidWallThickness { wall_thickness });
        }

        Ok(Self {
            columns: maze.size().width(),
            rows: maze.size().height(),
            passage_width,
            wall_thickness,
            cells: maze.cells().to_vec(),
            wall_color,
        })
    }

    /// Replaces the wall flags and dimensions with those of `maze`.
    pub fn refresh(&mut self, maze: &Maze) {
        self.columns = maze.size().width();
        self.rows = maze.size().height();
        self.cells.clear();
        self.cells.extend_from_slice(maze.cells());
    }

    /// Distance between the origins of two adjacent cells.
    #[must_use]
    pub fn cell_length(&self) -> f32 {
        self.passage_width + self.wall_thickness
    }

    /// Total width of the maze including the border walls.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length() + self.wall_thickness
    }

    /// Total height of the maze including the border walls.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length() + self.wall_thickness
    }

    /// Screen position of the centre of a cell's passage.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        let offset = self.wall_thickness + self.passage_width * 0.5;
        Vec2::new(
            cell.column() as f32 * self.cell_length() + offset,
            cell.row() as f32 * self.cell_length() + offset,
        )
    }

    /// Rectangles covering every standing wall.
    ///
    /// The north and west border strips come first, followed by the east and
    /// south walls of each cell in row-major order.
    #[must_use]
    pub fn wall_segments(&self) -> Vec<ScreenRect> {
        let length = self.cell_length();
        let thickness = self.wall_thickness;
        let mut segments = vec![
            ScreenRect::new(0.0, 0.0, self.width(), thickness),
            ScreenRect::new(0.0, 0.0, thickness, self.height()),
        ];

        let columns = self.columns.max(1) as usize;
        for (index, walls) in self.cells.iter().enumerate() {
            let column = (index % columns) as f32;
            let row = (index / columns) as f32;
            let x = column * length;
            let y = row * length;

            if walls.contains(Direction::East) {
                segments.push(ScreenRect::new(
                    x + length,
                    y,
                    thickness,
                    length + thickness,
                ));
            }
            if walls.contains(Direction::South) {
                segments.push(ScreenRect::new(
                    x,
                    y + length,
                    length + thickness,
                    thickness,
                ));
            }
        }

        segments
    }
}

/// Filled circle marking a cell, used for the player and the goal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPresentation {
    /// Cell the marker is drawn in.
    pub cell: CellCoord,
    /// Radius of the marker in pixels.
    pub radius: f32,
    /// Fill color.
    pub color: Color,
}

impl MarkerPresentation {
    /// Default marker radius in pixels.
    pub const DEFAULT_RADIUS: f32 = 8.0;

    /// Creates a new marker descriptor.
    #[must_use]
    pub const fn new(cell: CellCoord, radius: f32, color: Color) -> Self {
        Self {
            cell,
            radius,
            color,
        }
    }
}

/// Status line drawn underneath the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Time spent on the current maze.
    pub elapsed: Duration,
    /// Moves made on the current maze.
    pub moves: u32,
}

impl HudPresentation {
    /// Height reserved for the status line below the maze.
    pub const HEIGHT: f32 = 24.0;

    /// Creates a new status line descriptor.
    #[must_use]
    pub const fn new(elapsed: Duration, moves: u32) -> Self {
        Self { elapsed, moves }
    }

    /// Text shown in the status line.
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "Time: {:.2} s   Moves: {}",
            self.elapsed.as_secs_f64(),
            self.moves
        )
    }
}

/// Modal summary shown once the goal has been reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WinDialog {
    /// Final time of the run.
    pub elapsed: Duration,
    /// Moves made during the run.
    pub moves: u32,
    /// Best time recorded for this maze size, including this run.
    pub best: Option<Duration>,
    /// Whether this run set the best time.
    pub new_best: bool,
}

impl WinDialog {
    /// Creates a new win dialog descriptor.
    #[must_use]
    pub const fn new(elapsed: Duration, moves: u32, best: Option<Duration>, new_best: bool) -> Self {
        Self {
            elapsed,
            moves,
            best,
            new_best,
        }
    }

    /// Text lines shown above the buttons, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "You won!".to_owned(),
            format!("Time: {:.2} seconds", self.elapsed.as_secs_f64()),
            format!("Moves: {}", self.moves),
        ];
        if self.new_best {
            lines.push("New best time!".to_owned());
        } else if let Some(best) = self.best {
            lines.push(format!("Best: {:.2} seconds", best.as_secs_f64()));
        }
        lines
    }
}

/// Buttons offered by the win dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogButton {
    /// Generates a fresh maze and resumes play.
    NewGame,
    /// Closes the game.
    Exit,
}

impl DialogButton {
    /// Caption drawn on the button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewGame => "New Game",
            Self::Exit => "Exit",
        }
    }
}

/// Screen geometry of the win dialog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialogLayout {
    /// Dialog background.
    pub panel: ScreenRect,
    /// Button closing the game.
    pub exit: ScreenRect,
    /// Button starting a new maze.
    pub new_game: ScreenRect,
}

impl DialogLayout {
    const WIDTH: f32 = 300.0;
    const HEIGHT: f32 = 200.0;
    const BUTTON_WIDTH: f32 = 80.0;
    const BUTTON_HEIGHT: f32 = 40.0;
    const BUTTON_TOP: f32 = 140.0;
    const TEXT_LEFT: f32 = 50.0;
    const TEXT_TOP: f32 = 30.0;
    const LINE_SPACING: f32 = 24.0;

    /// Centres the dialog on a screen of the given size.
    #[must_use]
    pub fn centered(screen_width: f32, screen_height: f32) -> Self {
        let x = ((screen_width - Self::WIDTH) * 0.5).floor();
        let y = ((screen_height - Self::HEIGHT) * 0.5).floor();

        Self {
            panel: ScreenRect::new(x, y, Self::WIDTH, Self::HEIGHT),
            exit: ScreenRect::new(
                x + 50.0,
                y + Self::BUTTON_TOP,
                Self::BUTTON_WIDTH,
                Self::BUTTON_HEIGHT,
            ),
            new_game: ScreenRect::new(
                x + 170.0,
                y + Self::BUTTON_TOP,
                Self::BUTTON_WIDTH,
                Self::BUTTON_HEIGHT,
            ),
        }
    }

    /// Baseline origin of the text line at `index`.
    #[must_use]
    pub fn line_origin(&self, index: usize) -> Vec2 {
        Vec2::new(
            self.panel.x + Self::TEXT_LEFT,
            self.panel.y + Self::TEXT_TOP + index as f32 * Self::LINE_SPACING,
        )
    }

    /// Rectangle occupied by `button`.
    #[must_use]
    pub const fn button(&self, button: DialogButton) -> ScreenRect {
        match button {
            DialogButton::NewGame => self.new_game,
            DialogButton::Exit => self.exit,
        }
    }

    /// Button under `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: Vec2) -> Option<DialogButton> {
        [DialogButton::Exit, DialogButton::NewGame]
            .into_iter()
            .find(|button| self.button(*button).contains(point))
    }
}

/// Scene description combining the maze, its markers and overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Maze walls.
    pub maze: MazePresentation,
    /// Player marker.
    pub player: MarkerPresentation,
    /// Goal marker.
    pub goal: MarkerPresentation,
    /// Status line below the maze.
    pub hud: HudPresentation,
    /// Win dialog shown while the run is finished.
    pub win_dialog: Option<WinDialog>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        maze: MazePresentation,
        player: MarkerPresentation,
        goal: MarkerPresentation,
        hud: HudPresentation,
        win_dialog: Option<WinDialog>,
    ) -> Self {
        Self {
            maze,
            player,
            goal,
            hud,
            win_dialog,
        }
    }

    /// Width of the entire scene.
    #[must_use]
    pub fn total_width(&self) -> f32 {
        self.maze.width()
    }

    /// Height of the entire scene including the status line.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.maze.height() + HudPresentation::HEIGHT
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Game scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Passages must be wider than zero pixels.
    InvalidPassageWidth {
        /// Provided width that failed validation.
        passage_width: f32,
    },
    /// Walls cannot have a negative or non-finite thickness.
    InvalidWallThickness {
        /// Provided thickness that failed validation.
        wall_thickness: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPassageWidth { passage_width } => {
                write!(f, "passage width must be positive (received {passage_width})")
            }
            Self::InvalidWallThickness { wall_thickness } => {
                write!(
                    f,
                    "wall thickness must be zero or more (received {wall_thickness})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

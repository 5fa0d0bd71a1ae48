//! Layered game settings: built-in defaults, an optional TOML file, then flags.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use maze_game_core::{GoalPlacement, MazeSize};
use maze_game_rendering::{MarkerPresentation, MazePresentation};
use maze_game_system_movement::RepeatConfig;
use serde::Deserialize;
use thiserror::Error;

/// Settings that shape a play session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Maze width in cells.
    pub(crate) width: u32,
    /// Maze height in cells.
    pub(crate) height: u32,
    /// Fixed seed reused on every reset; random when absent.
    pub(crate) seed: Option<u64>,
    /// Goal placement strategy.
    pub(crate) goal: GoalPlacement,
    /// Milliseconds an arrow key must be held before it repeats.
    pub(crate) initial_delay_ms: u64,
    /// Milliseconds between repeated moves.
    pub(crate) repeat_interval_ms: u64,
    /// Whether presentation waits for the display refresh.
    pub(crate) vsync: bool,
    /// Whether frame timing is printed once per second.
    pub(crate) show_fps: bool,
    /// Wall thickness in pixels.
    pub(crate) wall_thickness: f32,
    /// Passage width in pixels.
    pub(crate) passage_width: f32,
    /// Radius of the player and goal markers in pixels.
    pub(crate) marker_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let repeat = RepeatConfig::default();
        Self {
            width: MazeSize::DEFAULT.width(),
            height: MazeSize::DEFAULT.height(),
            seed: None,
            goal: GoalPlacement::default(),
            initial_delay_ms: millis(repeat.initial_delay()),
            repeat_interval_ms: millis(repeat.repeat_interval()),
            vsync: true,
            show_fps: false,
            wall_thickness: MazePresentation::DEFAULT_WALL_THICKNESS,
            passage_width: MazePresentation::DEFAULT_PASSAGE_WIDTH,
            marker_radius: MarkerPresentation::DEFAULT_RADIUS,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Settings {
    /// Loads settings from `path`, or returns the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses settings from TOML text; missing keys keep their defaults.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validated maze dimensions.
    pub(crate) fn maze_size(&self) -> Result<MazeSize, maze_game_core::MazeError> {
        MazeSize::new(self.width, self.height)
    }

    /// Key repeat timing for the movement system.
    pub(crate) fn repeat_config(&self) -> RepeatConfig {
        RepeatConfig::new(
            Duration::from_millis(self.initial_delay_ms),
            Duration::from_millis(self.repeat_interval_ms),
        )
    }
}

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("could not read config file {}", .path.display())]
    Read {
        /// Location of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file was not valid settings TOML.
    #[error("could not parse config file")]
    Parse(#[from] toml::de::Error),
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Game engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. The [`Maze`] grid itself also lives here so the
//! generator, the world and the renderers agree on a single layout format.

use std::{collections::VecDeque, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title used for the game window.
pub const WINDOW_TITLE: &str = "Maze Game";

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Game.";

/// Phase of a single maze run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayState {
    /// The player is navigating the maze and the timer is running.
    Playing,
    /// The player reached the goal; the timer is frozen until the next maze.
    Won,
}

/// Strategy used to choose the goal cell once a maze has been carved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalPlacement {
    /// The reachable cell with the longest passage distance from the start.
    #[default]
    #[serde(rename = "farthest")]
    FarthestFromStart,
    /// The corner diagonally opposite the start cell.
    #[serde(rename = "corner")]
    OppositeCorner,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the maze configuration and generates a fresh maze from it.
    ConfigureMaze {
        /// Dimensions of the maze measured in cells.
        size: MazeSize,
        /// Fixed seed reused on every reset, or `None` to draw a new seed each time.
        seed: Option<u64>,
        /// Strategy used to place the goal.
        placement: GoalPlacement,
    },
    /// Discards the current maze and generates the next one.
    NewMaze,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player advance a single cell in the specified direction.
    MovePlayer {
        /// Direction of travel for the attempted move.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new maze replaced the previous one.
    MazeGenerated {
        /// Dimensions of the new maze.
        size: MazeSize,
        /// Seed that produced the layout.
        seed: u64,
        /// Cell the player starts on.
        start: CellCoord,
        /// Cell the player must reach.
        goal: CellCoord,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved between two adjacent cells.
    PlayerMoved {
        /// Direction the player travelled.
        direction: Direction,
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Reports that a move was stopped by a wall.
    MoveBlocked {
        /// Direction the player attempted to travel.
        direction: Direction,
        /// Cell the player remains on.
        at: CellCoord,
    },
    /// Announces that the player reached the goal.
    GoalReached {
        /// Dimensions of the completed maze.
        size: MazeSize,
        /// Seed of the completed maze.
        seed: u64,
        /// Frozen timer value at the moment of arrival.
        elapsed: Duration,
        /// Number of successful moves made during the run.
        moves: u32,
    },
    /// Announces that the run entered a new play state.
    PlayStateChanged {
        /// State that became active after processing commands.
        state: PlayState,
    },
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    const fn wall_bit(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Validated maze dimensions measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MazeSize {
    width: u32,
    height: u32,
}

impl MazeSize {
    /// Size of the maze used when no configuration is supplied.
    pub const DEFAULT: MazeSize = MazeSize {
        width: 40,
        height: 40,
    };

    /// Largest number of columns or rows a maze may have.
    pub const MAX_DIMENSION: u32 = 1024;

    /// Validates and creates a maze size.
    ///
    /// Both dimensions must lie in `1..=MAX_DIMENSION`, which keeps the
    /// generator's scratch memory bounded and cell indices well inside `u32`.
    pub fn new(width: u32, height: u32) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::EmptyDimensions { width, height });
        }

        if width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
            return Err(MazeError::TooLarge { width, height });
        }

        Ok(Self { width, height })
    }

    /// Number of columns in the maze.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the maze.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells in the maze.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the cell lies inside the maze.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Row-major index of the cell, or `None` when it lies outside the maze.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Cell located at the provided row-major index.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cell_count() {
            return None;
        }
        let width = self.width as usize;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Adjacent cell in the provided direction, if it lies inside the maze.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        if !self.contains(cell) {
            return None;
        }

        let candidate = match direction {
            Direction::North => CellCoord::new(cell.column(), cell.row().checked_sub(1)?),
            Direction::East => CellCoord::new(cell.column().checked_add(1)?, cell.row()),
            Direction::South => CellCoord::new(cell.column(), cell.row().checked_add(1)?),
            Direction::West => CellCoord::new(cell.column().checked_sub(1)?, cell.row()),
        };

        self.contains(candidate).then_some(candidate)
    }

    /// Corner cell diagonally opposite the origin.
    #[must_use]
    pub const fn opposite_corner(&self) -> CellCoord {
        CellCoord::new(self.width - 1, self.height - 1)
    }
}

/// Errors reported when validating maze parameters.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// At least one dimension was zero.
    #[error("maze dimensions must be positive (received {width}x{height})")]
    EmptyDimensions {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// A dimension exceeds [`MazeSize::MAX_DIMENSION`].
    #[error("maze of {width}x{height} cells is too large (at most {max} per side)", max = MazeSize::MAX_DIMENSION)]
    TooLarge {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
}

/// Wall flags surrounding a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Walls(u8);

impl Walls {
    /// Cell enclosed on all four sides.
    pub const ALL: Walls = Walls(0b1111);

    /// Reports whether a wall stands on the provided side.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.wall_bit() != 0
    }

    /// Returns the flags with the wall on the provided side removed.
    #[must_use]
    pub const fn without(self, direction: Direction) -> Self {
        Self(self.0 & !direction.wall_bit())
    }
}

/// Rectangular grid of cells whose passages form the maze.
///
/// Wall flags are kept symmetric: a passage between two neighbours is open on
/// both sides. Boundary walls are never removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    size: MazeSize,
    seed: u64,
    cells: Vec<Walls>,
    start: CellCoord,
    goal: CellCoord,
}

impl Maze {
    /// Creates a maze where every cell is enclosed, starting and ending at the origin.
    #[must_use]
    pub fn closed(size: MazeSize, seed: u64) -> Self {
        let origin = CellCoord::new(0, 0);
        Self {
            size,
            seed,
            cells: vec![Walls::ALL; size.cell_count()],
            start: origin,
            goal: origin,
        }
    }

    /// Dimensions of the maze.
    #[must_use]
    pub const fn size(&self) -> MazeSize {
        self.size
    }

    /// Seed that produced the layout.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Cell the player starts on.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell the player must reach.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    /// Wall flags of every cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Walls] {
        &self.cells
    }

    /// Wall flags of a single cell.
    #[must_use]
    pub fn walls(&self, cell: CellCoord) -> Option<Walls> {
        self.size
            .index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the player may leave `cell` in `direction`.
    ///
    /// Cells outside the maze and boundary sides are always closed.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord, direction: Direction) -> bool {
        self.walls(cell)
            .map_or(false, |walls| !walls.contains(direction))
    }

    /// Removes the wall between `cell` and its neighbour in `direction`.
    ///
    /// Returns `false` without mutating anything when the neighbour lies
    /// outside the maze.
    pub fn carve(&mut self, cell: CellCoord, direction: Direction) -> bool {
        let Some(neighbor) = self.size.neighbor(cell, direction) else {
            return false;
        };
        let (Some(from), Some(to)) = (self.size.index(cell), self.size.index(neighbor)) else {
            return false;
        };

        self.cells[from] = self.cells[from].without(direction);
        self.cells[to] = self.cells[to].without(direction.opposite());
        true
    }

    /// Moves the goal to the provided cell. Cells outside the maze are ignored.
    pub fn set_goal(&mut self, goal: CellCoord) {
        if self.size.contains(goal) {
            self.goal = goal;
        }
    }

    /// Cells reachable from `cell` through a single open side.
    pub fn passages(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            if self.is_open(cell, direction) {
                self.size.neighbor(cell, direction)
            } else {
                None
            }
        })
    }

    /// Number of interior walls removed while carving.
    #[must_use]
    pub fn removed_wall_count(&self) -> usize {
        self.cells
            .iter()
            .map(|walls| {
                usize::from(!walls.contains(Direction::East))
                    + usize::from(!walls.contains(Direction::South))
            })
            .sum()
    }

    /// Passage distances from `origin` to every cell in row-major order.
    ///
    /// Distances are computed with a breadth-first search over open sides.
    /// Unreachable cells report `None`.
    #[must_use]
    pub fn distances_from(&self, origin: CellCoord) -> Vec<Option<u32>> {
        let mut distances = vec![None; self.size.cell_count()];
        let Some(origin_index) = self.size.index(origin) else {
            return distances;
        };

        distances[origin_index] = Some(0);
        let mut queue = VecDeque::from([origin]);

        while let Some(cell) = queue.pop_front() {
            let Some(current) = self.size.index(cell).and_then(|index| distances[index]) else {
                continue;
            };

            for neighbor in self.passages(cell) {
                let Some(index) = self.size.index(neighbor) else {
                    continue;
                };
                if distances[index].is_some() {
                    continue;
                }
                distances[index] = Some(current + 1);
                queue.push_back(neighbor);
            }
        }

        distances
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, GoalPlacement, Maze, MazeError, MazeSize, Walls};
    use serde::{de::DeserializeOwned, Serialize};

    fn size(width: u32, height: u32) -> MazeSize {
        MazeSize::new(width, height).expect("valid size")
    }

    #[test]
    fn maze_size_rejects_zero_dimensions() {
        assert_eq!(
            MazeSize::new(0, 5),
            Err(MazeError::EmptyDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(MazeSize::new(5, 0).is_err());
    }

    #[test]
    fn maze_size_caps_each_dimension() {
        let max = MazeSize::MAX_DIMENSION;

        assert!(MazeSize::new(max, max).is_ok());
        assert_eq!(
            MazeSize::new(max + 1, 2),
            Err(MazeError::TooLarge {
                width: max + 1,
                height: 2
            })
        );
        assert!(MazeSize::new(3, max + 1).is_err());
        assert!(MazeSize::new(65_535, 65_535).is_err());
    }

    #[test]
    fn neighbor_stays_inside_bounds() {
        let size = size(3, 2);
        let corner = CellCoord::new(0, 0);

        assert_eq!(size.neighbor(corner, Direction::North), None);
        assert_eq!(size.neighbor(corner, Direction::West), None);
        assert_eq!(
            size.neighbor(corner, Direction::East),
            Some(CellCoord::new(1, 0))
        );
        assert_eq!(
            size.neighbor(CellCoord::new(2, 1), Direction::South),
            None
        );
        assert_eq!(size.neighbor(CellCoord::new(5, 5), Direction::North), None);
    }

    #[test]
    fn index_and_cell_at_agree() {
        let size = size(4, 3);
        for index in 0..size.cell_count() {
            let cell = size.cell_at(index).expect("index inside maze");
            assert_eq!(size.index(cell), Some(index));
        }
        assert_eq!(size.cell_at(size.cell_count()), None);
    }

    #[test]
    fn carving_opens_both_sides_of_a_wall() {
        let mut maze = Maze::closed(size(2, 2), 0);
        let origin = CellCoord::new(0, 0);

        assert!(maze.carve(origin, Direction::East));
        assert!(maze.is_open(origin, Direction::East));
        assert!(maze.is_open(CellCoord::new(1, 0), Direction::West));
        assert!(!maze.is_open(origin, Direction::South));
        assert_eq!(maze.removed_wall_count(), 1);
    }

    #[test]
    fn carving_never_opens_the_boundary() {
        let mut maze = Maze::closed(size(2, 2), 0);

        assert!(!maze.carve(CellCoord::new(0, 0), Direction::North));
        assert_eq!(maze.walls(CellCoord::new(0, 0)), Some(Walls::ALL));
    }

    #[test]
    fn distances_follow_passages_only() {
        let mut maze = Maze::closed(size(3, 1), 0);
        assert!(maze.carve(CellCoord::new(0, 0), Direction::East));

        let distances = maze.distances_from(CellCoord::new(0, 0));

        assert_eq!(distances, vec![Some(0), Some(1), None]);
    }

    #[test]
    fn set_goal_ignores_cells_outside_the_maze() {
        let mut maze = Maze::closed(size(2, 2), 0);
        maze.set_goal(CellCoord::new(1, 1));
        maze.set_goal(CellCoord::new(7, 7));

        assert_eq!(maze.goal(), CellCoord::new(1, 1));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn goal_placement_round_trips_through_bincode() {
        assert_round_trip(&GoalPlacement::OppositeCorner);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
    }
}

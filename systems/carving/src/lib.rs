#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure maze generator that carves perfect mazes from a seed.
//!
//! Carving is a randomized depth-first traversal driven by an explicit stack:
//! starting from the maze's start cell, the carver repeatedly steps into a
//! random unvisited neighbour, removing the wall between the two cells, and
//! backtracks once the current cell has no unvisited neighbours left. Every
//! cell is visited exactly once, so the carved passages form a spanning tree.

use maze_game_core::{CellCoord, Direction, GoalPlacement, Maze, MazeSize};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Carves a perfect maze of the provided size.
///
/// The same `size`, `seed` and `placement` always produce the same layout.
#[must_use]
pub fn carve(size: MazeSize, seed: u64, placement: GoalPlacement) -> Maze {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut maze = Maze::closed(size, seed);
    let mut visited = vec![false; size.cell_count()];
    let mut stack: Vec<CellCoord> = Vec::with_capacity(size.cell_count());
    let mut candidates: Vec<(Direction, usize)> = Vec::with_capacity(Direction::ALL.len());

    let start = maze.start();
    if let Some(index) = size.index(start) {
        visited[index] = true;
        stack.push(start);
    }

    while let Some(&current) = stack.last() {
        candidates.clear();
        for direction in Direction::ALL {
            let Some(index) = size
                .neighbor(current, direction)
                .and_then(|neighbor| size.index(neighbor))
            else {
                continue;
            };
            if !visited[index] {
                candidates.push((direction, index));
            }
        }

        let Some(&(direction, index)) = candidates.choose(&mut rng) else {
            let _ = stack.pop();
            continue;
        };
        let Some(next) = size.cell_at(index) else {
            let _ = stack.pop();
            continue;
        };

        let carved = maze.carve(current, direction);
        debug_assert!(carved, "carving stays inside the maze");
        visited[index] = true;
        stack.push(next);
    }

    let goal = place_goal(&maze, placement);
    maze.set_goal(goal);
    maze
}

/// Chooses the goal cell for a carved maze.
///
/// [`GoalPlacement::FarthestFromStart`] picks the cell with the greatest
/// passage distance from the start; ties resolve to the lowest row-major
/// index so the choice is deterministic.
#[must_use]
pub fn place_goal(maze: &Maze, placement: GoalPlacement) -> CellCoord {
    match placement {
        GoalPlacement::OppositeCorner => maze.size().opposite_corner(),
        GoalPlacement::FarthestFromStart => {
            let mut farthest = (0, maze.start());
            for (index, distance) in maze.distances_from(maze.start()).into_iter().enumerate() {
                let Some(distance) = distance else {
                    continue;
                };
                if distance <= farthest.0 {
                    continue;
                }
                if let Some(cell) = maze.size().cell_at(index) {
                    farthest = (distance, cell);
                }
            }
            farthest.1
        }
    }
}

use maze_game_core::{CellCoord, Direction, GoalPlacement, Maze, MazeSize};
use maze_game_system_carving::carve;

const SIZES: [(u32, u32); 6] = [(1, 1), (2, 2), (5, 5), (1, 9), (12, 3), (40, 40)];
const SEEDS: [u64; 4] = [0, 1, 42, 0xdead_beef];

fn size(width: u32, height: u32) -> MazeSize {
    MazeSize::new(width, height).expect("valid size")
}

fn reachable_cells(maze: &Maze) -> usize {
    maze.distances_from(maze.start())
        .into_iter()
        .filter(Option::is_some)
        .count()
}

#[test]
fn every_cell_is_reachable_from_the_start() {
    for (width, height) in SIZES {
        for seed in SEEDS {
            let maze = carve(size(width, height), seed, GoalPlacement::FarthestFromStart);
            assert_eq!(
                reachable_cells(&maze),
                maze.size().cell_count(),
                "{width}x{height} seed {seed} left isolated cells"
            );
        }
    }
}

#[test]
fn carved_mazes_form_spanning_trees() {
    for (width, height) in SIZES {
        for seed in SEEDS {
            let maze = carve(size(width, height), seed, GoalPlacement::FarthestFromStart);
            assert_eq!(
                maze.removed_wall_count(),
                maze.size().cell_count() - 1,
                "{width}x{height} seed {seed} is not a perfect maze"
            );
        }
    }
}

#[test]
fn boundary_walls_remain_standing() {
    let maze = carve(size(10, 6), 99, GoalPlacement::FarthestFromStart);
    let maze_size = maze.size();

    for column in 0..maze_size.width() {
        assert!(!maze.is_open(CellCoord::new(column, 0), Direction::North));
        assert!(!maze.is_open(
            CellCoord::new(column, maze_size.height() - 1),
            Direction::South
        ));
    }
    for row in 0..maze_size.height() {
        assert!(!maze.is_open(CellCoord::new(0, row), Direction::West));
        assert!(!maze.is_open(
            CellCoord::new(maze_size.width() - 1, row),
            Direction::East
        ));
    }
}

#[test]
fn wall_flags_are_symmetric() {
    let maze = carve(size(8, 8), 5, GoalPlacement::FarthestFromStart);
    let maze_size = maze.size();

    for index in 0..maze_size.cell_count() {
        let cell = maze_size.cell_at(index).expect("cell inside maze");
        for direction in Direction::ALL {
            if let Some(neighbor) = maze_size.neighbor(cell, direction) {
                assert_eq!(
                    maze.is_open(cell, direction),
                    maze.is_open(neighbor, direction.opposite()),
                );
            }
        }
    }
}

#[test]
fn same_seed_reproduces_the_same_layout() {
    let first = carve(size(5, 5), 42, GoalPlacement::FarthestFromStart);
    let second = carve(size(5, 5), 42, GoalPlacement::FarthestFromStart);

    assert_eq!(first, second);
    assert_eq!(first.seed(), 42);
    assert_eq!(first.start(), CellCoord::new(0, 0));
}

#[test]
fn large_mazes_carve_without_recursion_limits() {
    let maze = carve(size(400, 400), 8, GoalPlacement::FarthestFromStart);

    assert_eq!(maze.removed_wall_count(), maze.size().cell_count() - 1);
}

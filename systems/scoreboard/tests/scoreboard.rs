use std::time::Duration;

use maze_game_core::{Command, Direction, Event, GoalPlacement, MazeSize};
use maze_game_system_scoreboard::Scoreboard;
use maze_game_world::{self as world, query, World, WorldConfig};

fn corridor_world(seed: u64) -> World {
    World::with_config(WorldConfig {
        size: MazeSize::new(4, 1).expect("valid size"),
        seed: Some(seed),
        placement: GoalPlacement::FarthestFromStart,
    })
}

fn run_corridor(world: &mut World, frame: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..3 {
        world::apply(world, Command::Tick { dt: frame }, &mut events);
        world::apply(
            world,
            Command::MovePlayer {
                direction: Direction::East,
            },
            &mut events,
        );
    }
    events
}

#[test]
fn records_runs_and_tracks_the_best_time_per_size() {
    let mut world = corridor_world(11);
    let mut scoreboard = Scoreboard::new();
    let size = query::maze(&world).size();

    let events = run_corridor(&mut world, Duration::from_millis(300));
    let appended = scoreboard.handle(&events).to_vec();
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].elapsed, Duration::from_millis(900));
    assert_eq!(appended[0].moves, 3);
    assert_eq!(appended[0].seed, 11);
    assert!(appended[0].new_best);

    let mut events = Vec::new();
    world::apply(&mut world, Command::NewMaze, &mut events);
    events.extend(run_corridor(&mut world, Duration::from_millis(500)));
    let slower = scoreboard.handle(&events).to_vec();
    assert_eq!(slower.len(), 1);
    assert!(!slower[0].new_best);

    let mut events = Vec::new();
    world::apply(&mut world, Command::NewMaze, &mut events);
    events.extend(run_corridor(&mut world, Duration::from_millis(100)));
    assert!(scoreboard.handle(&events)[0].new_best);

    assert_eq!(scoreboard.runs().len(), 3);
    assert_eq!(scoreboard.best_for(size), Some(Duration::from_millis(300)));
    assert_eq!(
        scoreboard.last_run().map(|run| run.elapsed),
        Some(Duration::from_millis(300))
    );
}

#[test]
fn best_times_are_kept_separately_for_each_size() {
    let mut scoreboard = Scoreboard::new();
    let small = MazeSize::new(3, 3).expect("valid size");
    let large = MazeSize::new(30, 30).expect("valid size");

    let _ = scoreboard.handle(&[
        Event::GoalReached {
            size: small,
            seed: 1,
            elapsed: Duration::from_secs(4),
            moves: 4,
        },
        Event::GoalReached {
            size: large,
            seed: 2,
            elapsed: Duration::from_secs(90),
            moves: 120,
        },
    ]);

    assert_eq!(scoreboard.best_for(small), Some(Duration::from_secs(4)));
    assert_eq!(scoreboard.best_for(large), Some(Duration::from_secs(90)));
    assert_eq!(
        scoreboard.best_for(MazeSize::new(3, 4).expect("valid size")),
        None
    );
}

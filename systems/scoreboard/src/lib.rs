#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scoreboard system recording finished runs and the best time per maze size.

use std::{collections::BTreeMap, time::Duration};

use maze_game_core::{Event, MazeSize};

/// Summary of a single completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunRecord {
    /// Dimensions of the maze that was solved.
    pub size: MazeSize,
    /// Seed that produced the maze.
    pub seed: u64,
    /// Simulated time from maze generation to reaching the goal.
    pub elapsed: Duration,
    /// Successful moves made during the run.
    pub moves: u32,
    /// Whether the run set a new best time for its maze size.
    pub new_best: bool,
}

/// Pure scoreboard system that observes world events and keeps session records.
#[derive(Debug, Default)]
pub struct Scoreboard {
    runs: Vec<RunRecord>,
    best: BTreeMap<(u32, u32), Duration>,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events, recording a run for every goal reached.
    ///
    /// Returns the records appended during this call.
    pub fn handle(&mut self, events: &[Event]) -> &[RunRecord] {
        let first_new = self.runs.len();

        for event in events {
            if let Event::GoalReached {
                size,
                seed,
                elapsed,
                moves,
            } = event
            {
                let key = (size.width(), size.height());
                let new_best = match self.best.get(&key) {
                    Some(best) => elapsed < best,
                    None => true,
                };
                if new_best {
                    let _ = self.best.insert(key, *elapsed);
                }
                self.runs.push(RunRecord {
                    size: *size,
                    seed: *seed,
                    elapsed: *elapsed,
                    moves: *moves,
                    new_best,
                });
            }
        }

        &self.runs[first_new..]
    }

    /// Every run recorded so far, oldest first.
    #[must_use]
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Most recently completed run.
    #[must_use]
    pub fn last_run(&self) -> Option<&RunRecord> {
        self.runs.last()
    }

    /// Fastest time recorded for mazes of the given size.
    #[must_use]
    pub fn best_for(&self, size: MazeSize) -> Option<Duration> {
        self.best.get(&(size.width(), size.height())).copied()
    }
}

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use maze_gen::grid::{Cell, CellState, Pos};
use maze_gen::render::{compose, Ink};
use maze_gen::{Config, Maze};

#[test]
fn generates_and_solves_end_to_end() {
    let cfg = Config::new(10, 12, 1, 2024);
    let mut maze = Maze::new(&cfg);
    maze.generate();

    let stats = *maze.stats();
    assert_eq!(stats.maze_len, 10 * 12 - 1);
    assert!(stats.num_paths >= 1);
    assert!(stats.num_solves >= 1);
    assert!(stats.solve_len > 0);

    maze.solve();
    let (entry, exit) = maze.openings();
    let grid = maze.grid();
    assert_eq!(grid.get(Pos { row: 1, col: entry }), CellState::Solved);
    assert_eq!(
        grid.get(Pos { row: grid.rows() - 2, col: exit }),
        CellState::Solved
    );
    // The committed openings deliver the length the optimizer reported.
    assert_eq!(maze.stats().solve_len, stats.solve_len);
    assert_eq!(maze.stats().turn_cnt, stats.turn_cnt);
}

#[test]
fn same_seed_reproduces_the_maze() {
    let cfg = Config::new(8, 8, 2, 7);
    let mut a = Maze::new(&cfg);
    let mut b = Maze::new(&cfg);
    a.generate();
    b.generate();
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.openings(), b.openings());

    a.solve();
    b.solve();
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn every_cell_is_carved() {
    for seed in [1, 2, 3] {
        let cfg = Config::new(12, 20, 0, seed);
        let mut maze = Maze::new(&cfg);
        maze.generate();
        for row in 0..12 {
            for col in 0..20 {
                assert_eq!(
                    maze.grid().get(Cell { row, col }.pos()),
                    CellState::Path,
                    "uncarved cell ({row},{col}) seed={seed}"
                );
            }
        }
    }
}

#[test]
fn frame_hook_receives_updates() {
    let cfg = Config::new(5, 5, 1, 9);
    let mut maze = Maze::new(&cfg);
    let frames = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&frames);
    maze.set_frame_hook(Box::new(move |grid, _stats| {
        assert_eq!(grid.height(), 5);
        counter.fetch_add(1, Ordering::Relaxed);
    }));
    maze.generate();
    // At least one frame per carved connection.
    assert!(frames.load(Ordering::Relaxed) >= 24);
}

#[test]
fn solved_maze_renders_with_solution_ink() {
    let cfg = Config::new(6, 6, 1, 77);
    let mut maze = Maze::new(&cfg);
    maze.generate();
    maze.solve();

    let lines = compose(maze.grid(), false);
    assert_eq!(lines.len(), 2 * 6 + 1);
    for line in &lines {
        assert_eq!(line.len(), 4 * 6 + 1);
    }
    let solved = lines
        .iter()
        .flatten()
        .filter(|&&(_, ink)| ink == Ink::Solved)
        .count();
    // The solution spans at least its reported length in glyphs.
    assert!(solved as i32 >= maze.stats().solve_len);
}

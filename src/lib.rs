//! Procedural maze generator and solver.
//!
//! Carves a perfect maze (every cell reachable, exactly one route between
//! any two cells) with a randomized depth-first walk guided by bounded
//! look-ahead, normalizes ambiguous wall openings, and picks the entry/exit
//! pair with the longest solution. Rendering targets the terminal with
//! Unicode box drawing.

pub mod config;
pub mod grid;
pub mod maze;
pub mod render;

pub use config::Config;
pub use maze::{Maze, Stats};

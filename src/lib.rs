//! # Tile Puzzle Solver Library
//!
//! This library provides the state model for the generalized N×N sliding-tile
//! puzzle and an A* best-first search that solves it under a pluggable heuristic.
//!
//! It is used by three binaries:
//! - `astar_solver`: Shuffles (or loads) a board and reports the search statistics.
//! - `human_player`: Allows interactive play via the command line.
//! - `heuristic_evaluator`: Compares the built-in heuristics over seeded random boards.
//!
//! ## Modules
//! - `engine`: The puzzle representation (`Board`, `PuzzleState`), moves (`Action`),
//!   successor generation, the goal test and the seeded shuffler.
//! - `heuristics`: The `Heuristic` trait and the built-in estimates.
//! - `solver`: Provides `a_star` and `a_star_with_options` plus the result types.
//! - `utils`: Parsing boards from text and files, and the solvability check.
//! - `error`: `PuzzleError` and `BoardDefect`.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

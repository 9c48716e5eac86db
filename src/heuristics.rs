//! Heuristics estimating how many moves separate a state from the goal.
//!
//! A heuristic is anything implementing [`Heuristic`]; plain closures of type
//! `Fn(&PuzzleState) -> f64` qualify, so the solver never needs to know which
//! estimate it is running with.
use crate::engine::PuzzleState;
use clap::ValueEnum;
use std::fmt;

/// Estimates the remaining cost from a state to the goal.
///
/// Implementations must be pure and must return a finite, non-negative value
/// for every reachable state; the solver does not check this.
pub trait Heuristic {
    fn estimate(&self, state: &PuzzleState) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&PuzzleState) -> f64,
{
    fn estimate(&self, state: &PuzzleState) -> f64 {
        self(state)
    }
}

/// Sums, over every cell including the blank, the row and column distance
/// between a value and its home cell `(v / N, v % N)`.
///
/// Counting the blank means a single slide changes the total by exactly 0 or 2.
///
/// # Examples
/// ```
/// use tile_puzzle_solver::engine::{Action, PuzzleState};
/// use tile_puzzle_solver::heuristics::manhattan_distance;
///
/// let solved = PuzzleState::solved(3);
/// assert_eq!(manhattan_distance(&solved), 0);
/// let one_off = solved.successor(Action::Right).unwrap();
/// assert_eq!(manhattan_distance(&one_off), 2);
/// ```
pub fn manhattan_distance(state: &PuzzleState) -> u32 {
    let n = state.size();
    state
        .board()
        .cells()
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let v = v as usize;
            ((i / n).abs_diff(v / n) + (i % n).abs_diff(v % n)) as u32
        })
        .sum()
}

/// Counts the non-blank tiles that are not in their home cell.
pub fn misplaced_tiles(state: &PuzzleState) -> u32 {
    state
        .board()
        .cells()
        .iter()
        .enumerate()
        .filter(|&(i, &v)| v != 0 && v as usize != i)
        .count() as u32
}

/// Counts tiles that sit in their home row (or column) behind a larger tile
/// with the same home line.
///
/// This is the simple max-seen count: every tile smaller than the largest one
/// already scanned counts once. It can exceed the number of tiles that really
/// must leave the line; a home row read `5 3 4` counts 2 although moving the
/// 5 alone resolves it. `LinearConflict` is therefore not admissible in general.
pub fn linear_conflicts(state: &PuzzleState) -> u32 {
    let n = state.size();
    let board = state.board();
    let mut conflicts = 0;

    // Row conflicts
    for row in 0..n {
        let mut max_seen = 0;
        for col in 0..n {
            let value = board.get_tile(row, col);
            if value != 0 && value as usize / n == row {
                if value > max_seen {
                    max_seen = value;
                } else {
                    conflicts += 1;
                }
            }
        }
    }

    // Column conflicts
    for col in 0..n {
        let mut max_seen = 0;
        for row in 0..n {
            let value = board.get_tile(row, col);
            if value != 0 && value as usize % n == col {
                if value > max_seen {
                    max_seen = value;
                } else {
                    conflicts += 1;
                }
            }
        }
    }

    conflicts
}

/// Manhattan distance with the blank included. This is the default estimate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, state: &PuzzleState) -> f64 {
        manhattan_distance(state) as f64
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MisplacedTiles;

impl Heuristic for MisplacedTiles {
    fn estimate(&self, state: &PuzzleState) -> f64 {
        misplaced_tiles(state) as f64
    }
}

/// Manhattan distance plus two moves per linear conflict.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearConflict;

impl Heuristic for LinearConflict {
    fn estimate(&self, state: &PuzzleState) -> f64 {
        (manhattan_distance(state) + 2 * linear_conflicts(state)) as f64
    }
}

/// Always 0; turns A* into uniform-cost search.
#[derive(Clone, Copy, Debug, Default)]
pub struct Zero;

impl Heuristic for Zero {
    fn estimate(&self, _state: &PuzzleState) -> f64 {
        0.0
    }
}

/// Runtime selector over the built-in heuristics, used by the binaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Misplaced,
    LinearConflict,
    Zero,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::Manhattan,
        HeuristicKind::Misplaced,
        HeuristicKind::LinearConflict,
        HeuristicKind::Zero,
    ];
}

impl Heuristic for HeuristicKind {
    fn estimate(&self, state: &PuzzleState) -> f64 {
        match self {
            HeuristicKind::Manhattan => Manhattan.estimate(state),
            HeuristicKind::Misplaced => MisplacedTiles.estimate(state),
            HeuristicKind::LinearConflict => LinearConflict.estimate(state),
            HeuristicKind::Zero => Zero.estimate(state),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Misplaced => "misplaced",
            HeuristicKind::LinearConflict => "linear-conflict",
            HeuristicKind::Zero => "zero",
        };
        write!(f, "{}", s)
    }
}

//! Core state model for the sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Action`: The four directions the blank can slide in.
//! - `Board`: An N×N permutation of `0..N²`, with `0` standing for the blank.
//! - `PuzzleState`: A validated board plus the cached blank position. States are
//!   immutable; every move produces a new state with its own board.
use crate::error::{BoardDefect, PuzzleError};
use crate::heuristics::{Heuristic, Manhattan};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// A `(row, column)` coordinate on the board, both 0-based.
pub type Position = (usize, usize);

/// A move of the blank tile.
///
/// Actions are expressed with respect to the blank: `Action::Up` means the
/// blank moves one row up and the tile above it slides down into the gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
}

// Indexed by `Action as usize`.
const ACTION_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl Action {
    /// Every action, in the order `legal_actions` reports them.
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Returns the `(row_delta, col_delta)` this action applies to the blank.
    ///
    /// # Examples
    /// ```
    /// use tile_puzzle_solver::engine::Action;
    /// assert_eq!(Action::Up.offset(), (-1, 0));
    /// assert_eq!(Action::Left.offset(), (0, -1));
    /// ```
    pub fn offset(self) -> (isize, isize) {
        ACTION_OFFSETS[self as usize]
    }

    /// Returns the action that undoes this one.
    pub fn opposite(self) -> Action {
        match self {
            Action::Up => Action::Down,
            Action::Right => Action::Left,
            Action::Down => Action::Up,
            Action::Left => Action::Right,
        }
    }

    /// Parses the single-letter command form (`u`, `r`, `d`, `l`, case-insensitive).
    pub fn from_char(c: char) -> Option<Action> {
        match c.to_ascii_lowercase() {
            'u' => Some(Action::Up),
            'r' => Some(Action::Right),
            'd' => Some(Action::Down),
            'l' => Some(Action::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Up => "Up",
            Action::Right => "Right",
            Action::Down => "Down",
            Action::Left => "Left",
        };
        write!(f, "{}", s)
    }
}

/// Largest side length whose cells still fit in `u16` tile values.
pub const MAX_SIZE: usize = 256;

/// An N×N grid of tiles stored row-major.
///
/// A `Board` obtained from this crate always holds each value of `0..N²`
/// exactly once; the only ways to build one are `Board::solved` and the
/// validating `Board::from_tiles`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<u16>,
}

impl Board {
    /// Creates the canonical solved board, `board[i][j] == i * size + j`.
    ///
    /// # Panics
    /// Panics if `size` is 0 or larger than `MAX_SIZE`.
    pub fn solved(size: usize) -> Self {
        assert!(
            size > 0 && size <= MAX_SIZE,
            "board size must be in 1..={}, got {}",
            MAX_SIZE,
            size
        );
        Board {
            size,
            cells: (0..size * size).map(|v| v as u16).collect(),
        }
    }

    /// Builds a board from row-major values, checking the permutation invariant.
    ///
    /// # Arguments
    /// * `size`: The side length N.
    /// * `values`: Exactly N² values, row by row.
    ///
    /// # Returns
    /// * `Ok(Board)` if `values` is a permutation of `0..N²`.
    /// * `Err(BoardDefect)` describing the first violation found otherwise.
    pub fn from_tiles(size: usize, values: &[u32]) -> Result<Self, BoardDefect> {
        if size == 0 || values.is_empty() {
            return Err(BoardDefect::Empty);
        }
        if size > MAX_SIZE {
            return Err(BoardDefect::TooLarge { size });
        }
        let cell_count = size * size;
        if values.len() != cell_count {
            // Report the first row that comes up short or runs over.
            let row = (values.len() / size).min(size - 1);
            return Err(BoardDefect::NotSquare {
                row,
                len: values.len() - row * size,
                expected: size,
            });
        }

        let max = (cell_count - 1) as u32;
        let mut seen = vec![false; cell_count];
        let mut cells = Vec::with_capacity(cell_count);
        for &value in values {
            if value > max {
                return Err(BoardDefect::ValueOutOfRange { value, max });
            }
            if seen[value as usize] {
                return Err(BoardDefect::DuplicateValue {
                    value: value as u16,
                });
            }
            seen[value as usize] = true;
            cells.push(value as u16);
        }
        Ok(Board { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> u16 {
        assert!(r < self.size && c < self.size, "({}, {}) is off the board", r, c);
        self.cells[r * self.size + c]
    }

    /// The cells in row-major order.
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    /// Returns true if every cell holds its own row-major index.
    pub fn is_solved(&self) -> bool {
        self.cells.iter().enumerate().all(|(i, &v)| v as usize == i)
    }

    fn position_of(&self, value: u16) -> Option<Position> {
        self.cells
            .iter()
            .position(|&v| v == value)
            .map(|i| (i / self.size, i % self.size))
    }

    fn swap(&mut self, a: Position, b: Position) {
        self.cells.swap(a.0 * self.size + a.1, b.0 * self.size + b.1);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells.len() - 1).to_string().len();
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:>width$}", ".", width = width)
                    } else {
                        format!("{:>width$}", v, width = width)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// A vertex of the puzzle's state graph: a board and the location of its blank.
///
/// Two states compare equal exactly when their boards do.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    board: Board,
    blank: Position,
}

impl PuzzleState {
    /// The goal state for an N×N puzzle, with the blank in the top-left corner.
    ///
    /// # Panics
    /// Panics if `size` is 0 or larger than `MAX_SIZE`.
    ///
    /// # Examples
    /// ```
    /// use tile_puzzle_solver::engine::PuzzleState;
    /// let state = PuzzleState::solved(3);
    /// assert!(state.is_goal());
    /// assert_eq!(state.blank_position(), (0, 0));
    /// ```
    pub fn solved(size: usize) -> Self {
        PuzzleState {
            board: Board::solved(size),
            blank: (0, 0),
        }
    }

    /// Validates externally supplied rows and builds a state from them.
    ///
    /// The number of rows decides N; every row must then have N values.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, PuzzleError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardDefect::Empty.into());
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(BoardDefect::NotSquare {
                row,
                len: r.len(),
                expected: size,
            }
            .into());
        }
        let values: Vec<u32> = rows.iter().flatten().copied().collect();
        Self::from_tiles(size, &values)
    }

    /// Validates row-major values for an N×N board and builds a state from them.
    pub fn from_tiles(size: usize, values: &[u32]) -> Result<Self, PuzzleError> {
        let board = Board::from_tiles(size, values)?;
        // A valid permutation always contains the blank.
        let blank = board.position_of(0).ok_or(BoardDefect::Empty)?;
        Ok(PuzzleState { board, blank })
    }

    /// Builds a start state by making `moves` random legal moves from the goal.
    ///
    /// The walk never immediately reverses its previous move, so short walks
    /// do not waste steps undoing themselves. The result is always solvable.
    ///
    /// # Panics
    /// Panics if `size` is 0 or larger than `MAX_SIZE`.
    pub fn shuffled(size: usize, moves: usize, rng: &mut impl Rng) -> Self {
        let mut state = PuzzleState::solved(size);
        let mut previous: Option<Action> = None;
        let mut candidates = Vec::with_capacity(4);
        for _ in 0..moves {
            candidates.clear();
            candidates.extend(
                state
                    .legal_actions()
                    .filter(|a| previous.map_or(true, |p| *a != p.opposite())),
            );
            let Some(&action) = candidates.choose(rng) else {
                // Only a 1×1 board has no moves at all.
                break;
            };
            state = state.slide(action);
            previous = Some(action);
        }
        state
    }

    /// Same as `shuffled`, seeded so the resulting board is reproducible.
    pub fn shuffled_with_seed(size: usize, moves: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::shuffled(size, moves, &mut rng)
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn blank_position(&self) -> Position {
        self.blank
    }

    /// Returns where the blank would land after `action`, if that is on the board.
    fn target(&self, action: Action) -> Option<Position> {
        let (dr, dc) = action.offset();
        let r = self.blank.0.checked_add_signed(dr)?;
        let c = self.blank.1.checked_add_signed(dc)?;
        let size = self.size();
        (r < size && c < size).then_some((r, c))
    }

    pub fn is_legal(&self, action: Action) -> bool {
        self.target(action).is_some()
    }

    /// Yields every action that keeps the blank on the board, in `Action::ALL` order.
    ///
    /// Corner blanks allow 2 actions, edge blanks 3 and interior blanks 4.
    /// The iterator is computed afresh on every call.
    pub fn legal_actions(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(move |&a| self.is_legal(a))
    }

    /// Returns the state reached by applying `action`, leaving `self` untouched.
    ///
    /// # Errors
    /// Returns `PuzzleError::IllegalMove` if `action` would move the blank off the board.
    pub fn successor(&self, action: Action) -> Result<PuzzleState, PuzzleError> {
        if !self.is_legal(action) {
            return Err(PuzzleError::IllegalMove {
                action,
                row: self.blank.0,
                col: self.blank.1,
            });
        }
        Ok(self.slide(action))
    }

    /// Lazily yields each legal action together with the child it produces.
    pub fn successors(&self) -> impl Iterator<Item = (Action, PuzzleState)> + '_ {
        self.legal_actions().map(move |a| (a, self.slide(a)))
    }

    // Callers must have checked legality.
    fn slide(&self, action: Action) -> PuzzleState {
        let target = match self.target(action) {
            Some(t) => t,
            None => unreachable!("{} is not legal from {:?}", action, self.blank),
        };
        let mut board = self.board.clone();
        board.swap(self.blank, target);
        PuzzleState {
            board,
            blank: target,
        }
    }

    pub fn is_goal(&self) -> bool {
        self.board.is_solved()
    }

    /// The default heuristic value of this state (Manhattan distance, blank included).
    pub fn heuristic(&self) -> f64 {
        Manhattan.estimate(self)
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

use crate::engine::PuzzleState;
use crate::error::PuzzleError;
use std::fs;
use std::path::Path;

/// Parses an array of string slices into a `PuzzleState`.
///
/// Each non-blank string is one row of whitespace-separated integers, starting
/// from row 0. The number of rows decides the board size; `0` is the blank.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`), one per row.
///
/// # Returns
/// * `Ok(PuzzleState)` if every token is an integer and the rows form a valid board.
/// * `Err(PuzzleError::Parse)` if a token is not a non-negative integer.
/// * `Err(PuzzleError::MalformedBoard)` if the values are not an N×N permutation of `0..N²`.
///
/// # Examples
/// ```
/// use tile_puzzle_solver::utils::board_from_str_array;
///
/// let state = board_from_str_array(&[
///     "1 0 2",
///     "3 4 5",
///     "6 7 8",
/// ]).unwrap();
/// assert_eq!(state.blank_position(), (0, 1));
///
/// assert!(board_from_str_array(&["0 1", "1 2"]).is_err()); // duplicate 1
/// assert!(board_from_str_array(&["0 x", "2 3"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<PuzzleState, PuzzleError> {
    let rows = s
        .iter()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(r, line)| {
            line.split_whitespace()
                .map(|token| {
                    token.parse::<u32>().map_err(|_| PuzzleError::Parse {
                        row: r,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<u32>, PuzzleError>>()
        })
        .collect::<Result<Vec<Vec<u32>>, PuzzleError>>()?;
    PuzzleState::from_rows(&rows)
}

/// Reads a board file in the `board_from_str_array` format.
pub fn read_board_file(path: impl AsRef<Path>) -> Result<PuzzleState, PuzzleError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    board_from_str_array(&lines)
}

/// Returns true if the goal is reachable from `state`.
///
/// Uses the inversion count of the non-blank tiles in row-major order. On odd
/// boards that count must be even; on even boards the count plus the blank's
/// row must be even, since the goal keeps the blank in row 0.
pub fn is_solvable(state: &PuzzleState) -> bool {
    let tiles: Vec<u16> = state
        .board()
        .cells()
        .iter()
        .copied()
        .filter(|&v| v != 0)
        .collect();
    let inversions: usize = tiles
        .iter()
        .enumerate()
        .map(|(i, &v)| tiles[i + 1..].iter().filter(|&&next| next < v).count())
        .sum();

    if state.size() % 2 == 1 {
        inversions % 2 == 0
    } else {
        (inversions + state.blank_position().0) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardDefect;
    use std::io::Write;

    #[test]
    fn test_board_from_str_array_valid() {
        let state = board_from_str_array(&[
            " 1  2  3  0",
            " 4  5  6  7",
            " 8  9 10 11",
            "12 13 14 15",
        ])
        .unwrap();
        assert_eq!(state.size(), 4);
        assert_eq!(state.blank_position(), (0, 3));
        assert_eq!(state.board().get_tile(2, 2), 10);
    }

    #[test]
    fn test_board_from_str_array_skips_blank_lines() {
        let state = board_from_str_array(&["", "0 1", "   ", "2 3", ""]).unwrap();
        assert!(state.is_goal());
    }

    #[test]
    fn test_board_from_str_array_invalid_token() {
        let result = board_from_str_array(&["0 1 2", "3 -4 5", "6 7 8"]);
        match result.unwrap_err() {
            PuzzleError::Parse { row, token } => {
                assert_eq!(row, 1);
                assert_eq!(token, "-4");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_board_from_str_array_duplicate() {
        let result = board_from_str_array(&["0 1 2", "3 4 5", "6 8 8"]);
        assert!(matches!(
            result.unwrap_err(),
            PuzzleError::MalformedBoard(BoardDefect::DuplicateValue { value: 8 })
        ));
    }

    #[test]
    fn test_board_from_str_array_not_square() {
        let result = board_from_str_array(&["0 1 2", "3 4 5"]);
        assert!(matches!(
            result.unwrap_err(),
            PuzzleError::MalformedBoard(BoardDefect::NotSquare { row: 0, .. })
        ));
        assert!(matches!(
            board_from_str_array(&[]).unwrap_err(),
            PuzzleError::MalformedBoard(BoardDefect::Empty)
        ));
    }

    #[test]
    fn test_read_board_file() {
        let path = std::env::temp_dir().join(format!(
            "tile_puzzle_solver_board_{}.txt",
            std::process::id()
        ));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "3 1 2").unwrap();
            writeln!(file, "0 4 5").unwrap();
            writeln!(file, "6 7 8").unwrap();
        }
        let state = read_board_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(state.blank_position(), (1, 0));

        assert!(matches!(
            read_board_file(path.with_extension("missing")).unwrap_err(),
            PuzzleError::Io(_)
        ));
    }

    #[test]
    fn test_shuffled_boards_are_solvable() {
        for size in 2..=5 {
            for seed in 0..20 {
                let state = PuzzleState::shuffled_with_seed(size, 60, seed);
                assert!(is_solvable(&state), "{}x{} seed {}\n{}", size, size, seed, state);
            }
        }
    }

    #[test]
    fn test_swapped_tiles_are_unsolvable() {
        for size in 2..=5 {
            let mut values: Vec<u32> = (0..(size * size) as u32).collect();
            values.swap(1, 2);
            let state = PuzzleState::from_tiles(size, &values).unwrap();
            assert!(!is_solvable(&state), "{}x{}", size, size);
        }
        let state = board_from_str_array(&["0 2", "1 3"]).unwrap();
        assert!(!is_solvable(&state));
    }
}

use clap::Parser;
use std::io::{self, BufRead, Write};
use tile_puzzle_solver::engine::{Action, PuzzleState};
use tile_puzzle_solver::heuristics::Manhattan;
use tile_puzzle_solver::solver::{a_star_with_options, SearchOptions};

/// Expansion budget for the `h` hint so a far-off board cannot hang the prompt.
const HINT_EXPANSION_LIMIT: usize = 200_000;

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Command(char),
    Invalid,
    /// stdin is closed; nothing more will arrive.
    EndOfInput,
    ReadError,
}

fn read_command(reader: &mut impl BufRead) -> Input {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => Input::EndOfInput,
        Ok(_) => {
            let mut chars = input.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Input::Command(c),
                _ => Input::Invalid,
            }
        }
        Err(_) => Input::ReadError,
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the sliding-tile puzzle in the terminal")]
struct Args {
    #[clap(short, long, default_value_t = 3)]
    size: usize,

    #[clap(short = 'm', long, default_value_t = 20)]
    shuffle_moves: usize,

    #[clap(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.size < 2 {
        eprintln!("Puzzle size must be at least 2.");
        return;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut state = PuzzleState::shuffled_with_seed(args.size, args.shuffle_moves, seed);
    let mut history: Vec<PuzzleState> = Vec::new();
    println!("Welcome to the {}-puzzle! (seed {})", args.size * args.size - 1, seed);

    loop {
        println!("---------------------");
        println!("Moves: {}, Manhattan distance: {}", history.len(), state.heuristic());
        println!("{}", state);

        if state.is_goal() {
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total moves: {}", history.len());
            println!("---------------------");
            break;
        }

        print!("Move the blank (u/r/d/l), 'z' to undo, 'h' for a hint, 'q' to quit: ");
        io::stdout().flush().unwrap();

        let command = match read_command(&mut io::stdin().lock()) {
            Input::Command(c) => c,
            Input::Invalid => {
                println!("Invalid input format. Enter a single letter.");
                continue;
            }
            Input::EndOfInput => {
                println!();
                println!("Thanks for playing!");
                break;
            }
            Input::ReadError => {
                println!("Error reading input. Please try again.");
                continue;
            }
        };

        match command {
            'q' => {
                println!("Thanks for playing!");
                break;
            }
            'z' => match history.pop() {
                Some(previous) => {
                    state = previous;
                    println!("Move undone.");
                }
                None => println!("Cannot undo further (no moves made)."),
            },
            'h' => {
                let options = SearchOptions {
                    duplicate_detection: true,
                    expansion_limit: Some(HINT_EXPANSION_LIMIT),
                    ..SearchOptions::default()
                };
                let result = a_star_with_options(&state, &Manhattan, &options);
                match result.solution_moves {
                    Some(moves) => println!("The goal is {} moves away.", moves),
                    None => println!("No hint found within {} expansions.", result.nodes_explored),
                }
            }
            c => match Action::from_char(c) {
                Some(action) => match state.successor(action) {
                    Ok(next) => history.push(std::mem::replace(&mut state, next)),
                    Err(e) => println!("Invalid move: {}", e),
                },
                None => println!("Unknown command '{}'.", c),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_command_single_letter() {
        let mut reader = Cursor::new("r\n  z  \n");
        assert_eq!(read_command(&mut reader), Input::Command('r'));
        assert_eq!(read_command(&mut reader), Input::Command('z'));
    }

    #[test]
    fn test_read_command_rejects_words_and_blank_lines() {
        let mut reader = Cursor::new("up\n\n");
        assert_eq!(read_command(&mut reader), Input::Invalid);
        assert_eq!(read_command(&mut reader), Input::Invalid);
    }

    #[test]
    fn test_read_command_reports_closed_stdin() {
        let mut reader = Cursor::new("q");
        assert_eq!(read_command(&mut reader), Input::Command('q'));
        assert_eq!(read_command(&mut reader), Input::EndOfInput);
        assert_eq!(read_command(&mut Cursor::new("")), Input::EndOfInput);
    }
}

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;
use tile_puzzle_solver::engine::{PuzzleState, MAX_SIZE};
use tile_puzzle_solver::heuristics::HeuristicKind;
use tile_puzzle_solver::solver::{a_star_with_options, PriorityRule, SearchOptions};
use tile_puzzle_solver::utils::{is_solvable, read_board_file};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Priority {
    /// parent path cost + h(child)
    Parent,
    /// parent path cost + 1 + h(child)
    Child,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Side length of the puzzle
    #[clap(short, long, default_value_t = 4)]
    size: usize,

    /// Number of random moves applied to the solved board
    #[clap(short = 'm', long, default_value_t = 40)]
    shuffle_moves: usize,

    /// Seed for the shuffle; a random seed is drawn if omitted
    #[clap(long)]
    seed: Option<u64>,

    /// Heuristic guiding the search
    #[clap(short = 'H', long, value_enum, default_value_t = HeuristicKind::Manhattan)]
    heuristic: HeuristicKind,

    /// Frontier ranking formula
    #[clap(long, value_enum, default_value = "parent")]
    priority: Priority,

    /// Skip boards that were already expanded
    #[clap(long)]
    dedup: bool,

    /// Give up after this many expansions
    #[clap(long)]
    limit: Option<usize>,

    /// Read the start board from a file (rows of whitespace-separated integers)
    board_file: Option<PathBuf>,
}

/// Loads the board file if one was given, otherwise shuffles a fresh board.
fn start_state(args: &Args) -> anyhow::Result<PuzzleState> {
    match &args.board_file {
        Some(path) => {
            let state = read_board_file(path)
                .with_context(|| format!("Failed to read board from file: {}", path.display()))?;
            println!("Loaded board from {}\n", path.display());
            Ok(state)
        }
        None => {
            if args.size == 0 || args.size > MAX_SIZE {
                bail!("puzzle size must be in 1..={}, got {}", MAX_SIZE, args.size);
            }
            let seed = args.seed.unwrap_or_else(rand::random);
            info!(
                "shuffling a {}x{} board with {} moves (seed {})",
                args.size, args.size, args.shuffle_moves, seed
            );
            Ok(PuzzleState::shuffled_with_seed(
                args.size,
                args.shuffle_moves,
                seed,
            ))
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let start = start_state(&args)?;

    println!("Initial board state:\n{}", start);
    if !is_solvable(&start) {
        println!("Warning: this board cannot reach the goal.");
        if !args.dedup && args.limit.is_none() {
            bail!("refusing to search an unsolvable board without --dedup or --limit");
        }
    }

    let options = SearchOptions {
        priority: match args.priority {
            Priority::Parent => PriorityRule::ParentCost,
            Priority::Child => PriorityRule::ChildCost,
        },
        duplicate_detection: args.dedup,
        expansion_limit: args.limit,
    };
    println!("Searching with the {} heuristic...\n", args.heuristic);

    let result = a_star_with_options(&start, &args.heuristic, &options);

    println!("Nodes explored:     {}", result.nodes_explored);
    println!("Min priority seen:  {}", result.min_heuristic_seen);
    println!("Peak frontier size: {}", result.max_frontier_len);
    match result.solution_moves {
        Some(moves) => println!("Solution found in {} moves.", moves),
        None => println!("No solution found ({:?}).", result.termination),
    }
    Ok(())
}

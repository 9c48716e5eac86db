use clap::Parser;
use std::collections::HashMap;
use tile_puzzle_solver::engine::PuzzleState;
use tile_puzzle_solver::heuristics::HeuristicKind;
use tile_puzzle_solver::solver::{a_star_with_options, SearchOptions};

const START_SEED: u64 = 0;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare the built-in heuristics on seeded boards")]
struct Args {
    #[clap(short, long, default_value_t = 3)]
    size: usize,

    #[clap(short = 'm', long, default_value_t = 20)]
    shuffle_moves: usize,

    /// Number of boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Per-search expansion budget
    #[clap(long, default_value_t = 1_000_000)]
    limit: usize,
}

#[derive(Default)]
struct Tally {
    explored: Vec<usize>,
    solution_lengths: Vec<u32>,
    unsolved: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if args.size < 2 {
        eprintln!("Puzzle size must be at least 2.");
        return;
    }

    let options = SearchOptions {
        duplicate_detection: true,
        expansion_limit: Some(args.limit),
        ..SearchOptions::default()
    };

    let mut tallies: HashMap<HeuristicKind, Tally> = HashMap::new();

    println!("Starting heuristic evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let current_seed = START_SEED + board_idx as u64;
        let start = PuzzleState::shuffled_with_seed(args.size, args.shuffle_moves, current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for kind in HeuristicKind::ALL {
            let result = a_star_with_options(&start, &kind, &options);
            let tally = tallies.entry(kind).or_default();
            tally.explored.push(result.nodes_explored);
            match result.solution_moves {
                Some(moves) => {
                    tally.solution_lengths.push(moves);
                    println!(
                        "  Heuristic: {:<16}, Explored: {:<8}, Moves: {}",
                        kind.to_string(),
                        result.nodes_explored,
                        moves
                    );
                }
                None => {
                    tally.unsolved += 1;
                    println!(
                        "  Heuristic: {:<16}, Explored: {:<8}, gave up ({:?})",
                        kind.to_string(),
                        result.nodes_explored,
                        result.termination
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!(
        "Heuristics evaluated: {}",
        HeuristicKind::ALL
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    );
    println!("\n--- Averages ---");

    let mut averages: Vec<(HeuristicKind, f64, f64, usize)> = Vec::new();
    for (kind, tally) in &tallies {
        if tally.explored.is_empty() {
            continue;
        }
        let avg_explored =
            tally.explored.iter().sum::<usize>() as f64 / tally.explored.len() as f64;
        let avg_moves = if tally.solution_lengths.is_empty() {
            f64::NAN
        } else {
            tally.solution_lengths.iter().sum::<u32>() as f64 / tally.solution_lengths.len() as f64
        };
        averages.push((*kind, avg_explored, avg_moves, tally.unsolved));
    }

    // Fewest expansions first
    averages.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (kind, avg_explored, avg_moves, unsolved) in averages {
        println!(
            "Heuristic {:<16}: Average Explored = {:.1}, Average Moves = {:.2}, Unsolved = {}",
            kind.to_string(),
            avg_explored,
            avg_moves,
            unsolved
        );
    }
}

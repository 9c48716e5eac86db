use crate::engine::{Board, PuzzleState};
use crate::heuristics::Heuristic;
use log::{debug, trace, warn};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// How often (in expansions) a progress line is logged.
const PROGRESS_INTERVAL: usize = 10_000;

/// A state together with the number of moves taken to reach it from the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub path_cost: u32,
    pub state: PuzzleState,
}

/// Formula used to rank a freshly generated child on the frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PriorityRule {
    /// `parent.path_cost + h(child)`. Leaves out the step cost of the move
    /// itself, so every child ranks one lower than under `ChildCost`.
    #[default]
    ParentCost,
    /// `parent.path_cost + 1 + h(child)`, the textbook `g + h`.
    ChildCost,
}

/// Knobs for a search run. `SearchOptions::default()` ranks by parent cost,
/// keeps no closed set and never stops early.
#[derive(Clone, Debug, Default)]
pub struct SearchOptions {
    pub priority: PriorityRule,
    /// Keep a closed set of expanded boards and discard later pops of the same
    /// board. Discarded pops are not counted in `nodes_explored`.
    pub duplicate_detection: bool,
    /// Stop after this many expansions without a goal.
    pub expansion_limit: Option<usize>,
}

/// Why a search run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    GoalReached,
    FrontierExhausted,
    ExpansionLimit,
}

/// Statistics and outcome of one search run.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Number of nodes popped and goal-tested.
    pub nodes_explored: usize,
    /// Smallest priority popped, starting from the initial state's heuristic value.
    pub min_heuristic_seen: f64,
    /// Path cost of the goal node, if one was popped.
    pub solution_moves: Option<u32>,
    pub termination: Termination,
    /// Largest number of entries the frontier held at once.
    pub max_frontier_len: usize,
}

impl SearchResult {
    pub fn is_solved(&self) -> bool {
        self.termination == Termination::GoalReached
    }
}

/// Frontier entry. Orders so that `BinaryHeap` pops the lowest priority first
/// and, among equal priorities, the entry pushed earliest.
struct FrontierEntry {
    priority: f64,
    seq: u64,
    node: SearchNode,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority frontier with FIFO tie-breaking.
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
    max_len: usize,
}

impl Frontier {
    fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
            max_len: 0,
        }
    }

    fn push(&mut self, priority: f64, node: SearchNode) {
        self.heap.push(FrontierEntry {
            priority,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
        self.max_len = self.max_len.max(self.heap.len());
    }

    fn pop(&mut self) -> Option<(f64, SearchNode)> {
        self.heap.pop().map(|e| (e.priority, e.node))
    }
}

/// Solves the puzzle with A* using the default `SearchOptions`.
///
/// No visited set is kept, so the same board may be queued many times over;
/// on large puzzles memory, not time, is what runs out first.
///
/// # Examples
/// ```
/// use tile_puzzle_solver::engine::{Action, PuzzleState};
/// use tile_puzzle_solver::heuristics::Manhattan;
/// use tile_puzzle_solver::solver::a_star;
///
/// let start = PuzzleState::solved(3).successor(Action::Right).unwrap();
/// let result = a_star(&start, &Manhattan);
/// assert_eq!(result.solution_moves, Some(1));
/// ```
pub fn a_star<H: Heuristic + ?Sized>(initial: &PuzzleState, heuristic: &H) -> SearchResult {
    a_star_with_options(initial, heuristic, &SearchOptions::default())
}

/// Solves the puzzle with A*, ranking frontier nodes by path cost plus `heuristic`.
///
/// The loop pops the lowest-priority node, goal-tests it, and otherwise pushes
/// one child per legal action. Running out of frontier (or hitting
/// `options.expansion_limit`) is reported through `SearchResult::termination`
/// with `solution_moves == None`; it is not an error.
pub fn a_star_with_options<H: Heuristic + ?Sized>(
    initial: &PuzzleState,
    heuristic: &H,
    options: &SearchOptions,
) -> SearchResult {
    let initial_h = heuristic.estimate(initial);
    debug!(
        "A* start: {}x{} board, h = {}, {:?}",
        initial.size(),
        initial.size(),
        initial_h,
        options
    );

    let mut frontier = Frontier::new();
    frontier.push(
        initial_h,
        SearchNode {
            path_cost: 0,
            state: initial.clone(),
        },
    );

    let mut closed: HashSet<Board> = HashSet::new();
    let mut nodes_explored = 0;
    let mut min_heuristic_seen = initial_h;
    let mut solution_moves = None;
    let mut termination = Termination::FrontierExhausted;

    while let Some((priority, node)) = frontier.pop() {
        if options.duplicate_detection && !closed.insert(node.state.board().clone()) {
            continue;
        }
        if options
            .expansion_limit
            .map_or(false, |limit| nodes_explored >= limit)
        {
            warn!(
                "A* stopped after {} expansions without reaching the goal",
                nodes_explored
            );
            termination = Termination::ExpansionLimit;
            break;
        }

        nodes_explored += 1;
        if priority < min_heuristic_seen {
            min_heuristic_seen = priority;
        }
        if nodes_explored % PROGRESS_INTERVAL == 0 {
            debug!(
                "A* progress: {} explored, frontier {}, depth {}, min priority {}",
                nodes_explored,
                frontier.heap.len(),
                node.path_cost,
                min_heuristic_seen
            );
        }

        if node.state.is_goal() {
            solution_moves = Some(node.path_cost);
            termination = Termination::GoalReached;
            break;
        }

        let step_cost = match options.priority {
            PriorityRule::ParentCost => 0,
            PriorityRule::ChildCost => 1,
        };
        for (action, child) in node.state.successors() {
            let child_priority = (node.path_cost + step_cost) as f64 + heuristic.estimate(&child);
            trace!(
                "push {} at depth {} with priority {}",
                action,
                node.path_cost + 1,
                child_priority
            );
            frontier.push(
                child_priority,
                SearchNode {
                    path_cost: node.path_cost + 1,
                    state: child,
                },
            );
        }
    }

    debug!(
        "A* finished: {:?} after {} expansions, solution {:?}, peak frontier {}",
        termination, nodes_explored, solution_moves, frontier.max_len
    );

    SearchResult {
        nodes_explored,
        min_heuristic_seen,
        solution_moves,
        termination,
        max_frontier_len: frontier.max_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Action;
    use crate::heuristics::{HeuristicKind, LinearConflict, Manhattan, MisplacedTiles, Zero};

    fn walk(size: usize, actions: &[Action]) -> PuzzleState {
        actions
            .iter()
            .try_fold(PuzzleState::solved(size), |s, &a| s.successor(a))
            .unwrap()
    }

    use Action::{Down as D, Left as L, Right as R, Up as U};

    #[test_log::test]
    fn test_already_solved() {
        let start = PuzzleState::from_rows(&[vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]).unwrap();
        let result = a_star(&start, &Manhattan);
        assert_eq!(result.solution_moves, Some(0));
        assert_eq!(result.nodes_explored, 1);
        assert_eq!(result.min_heuristic_seen, 0.0);
        assert_eq!(result.termination, Termination::GoalReached);
    }

    #[test]
    fn test_one_move_from_solved() {
        let start = walk(3, &[R]);
        let result = a_star(&start, &Manhattan);
        assert_eq!(result.solution_moves, Some(1));
        assert_eq!(result.nodes_explored, 2);
        // The goal child is ranked parent cost 0 + h 0.
        assert_eq!(result.min_heuristic_seen, 0.0);
    }

    #[test]
    fn test_child_cost_rule_ranks_goal_at_one() {
        let start = walk(3, &[R]);
        let options = SearchOptions {
            priority: PriorityRule::ChildCost,
            ..SearchOptions::default()
        };
        let result = a_star_with_options(&start, &Manhattan, &options);
        assert_eq!(result.solution_moves, Some(1));
        assert_eq!(result.nodes_explored, 2);
        assert_eq!(result.min_heuristic_seen, 1.0);
    }

    #[test_log::test]
    fn test_five_move_walk() {
        let moves = [R, R, D, D, L];
        let start = walk(3, &moves);
        assert_eq!(start.board().cells(), &[1, 2, 5, 3, 4, 8, 6, 0, 7]);

        let result = a_star(&start, &Manhattan);
        let solution = result.solution_moves.unwrap();
        assert!(solution <= moves.len() as u32);
        assert_eq!(solution, 5);
        assert_eq!(result.nodes_explored, 7);
        assert_eq!(result.min_heuristic_seen, 4.0);
    }

    #[test]
    fn test_eight_move_walk_with_every_heuristic() {
        let start = walk(3, &[R, R, D, D, L, L, U, U]);
        let expected_explored = [
            (HeuristicKind::Manhattan, 22),
            (HeuristicKind::Misplaced, 10),
            (HeuristicKind::LinearConflict, 22),
        ];
        for (kind, explored) in expected_explored {
            let result = a_star(&start, &kind);
            assert_eq!(result.solution_moves, Some(8), "{}", kind);
            assert_eq!(result.nodes_explored, explored, "{}", kind);
        }
    }

    #[test]
    fn test_duplicate_detection_reduces_expansions() {
        let start = walk(3, &[D, R, D, R, U, L, D, L, U, R]);
        let plain = a_star(&start, &Manhattan);
        let options = SearchOptions {
            duplicate_detection: true,
            ..SearchOptions::default()
        };
        let deduped = a_star_with_options(&start, &Manhattan, &options);
        assert_eq!(plain.solution_moves, Some(10));
        assert_eq!(deduped.solution_moves, Some(10));
        assert_eq!(plain.nodes_explored, 53);
        assert_eq!(deduped.nodes_explored, 25);
    }

    #[test]
    fn test_uniform_cost_search_is_optimal() {
        let start = walk(3, &[R, D, L, U]);
        let options = SearchOptions {
            duplicate_detection: true,
            ..SearchOptions::default()
        };
        let result = a_star_with_options(&start, &Zero, &options);
        assert_eq!(result.solution_moves, Some(4));
        assert_eq!(result.nodes_explored, 25);
        assert_eq!(result.min_heuristic_seen, 0.0);
    }

    #[test]
    fn test_min_heuristic_bounded_by_initial() {
        for seed in 0..10 {
            let start = PuzzleState::shuffled_with_seed(3, 8, seed);
            let h0 = Manhattan.estimate(&start);
            let result = a_star(&start, &Manhattan);
            assert!(result.is_solved());
            assert!(result.min_heuristic_seen <= h0, "seed {}", seed);
            assert!(result.solution_moves.unwrap() <= 16);
        }
    }

    #[test]
    fn test_min_heuristic_never_rises_with_more_expansions() {
        let start = walk(3, &[D, R, D, R, U, L, D, L, U, R]);
        let full = a_star(&start, &Manhattan);
        let mut previous = Manhattan.estimate(&start);
        for limit in 1..=full.nodes_explored {
            let options = SearchOptions {
                expansion_limit: Some(limit),
                ..SearchOptions::default()
            };
            let result = a_star_with_options(&start, &Manhattan, &options);
            assert_eq!(result.nodes_explored, limit);
            assert!(
                result.min_heuristic_seen <= previous,
                "limit {} raised the minimum from {} to {}",
                limit,
                previous,
                result.min_heuristic_seen
            );
            previous = result.min_heuristic_seen;
        }
        assert_eq!(previous, full.min_heuristic_seen);
        assert_eq!(full.min_heuristic_seen, 9.0);
    }

    #[test]
    fn test_unsolvable_board_exhausts_frontier() {
        let start = PuzzleState::from_rows(&[vec![0, 2], vec![1, 3]]).unwrap();
        let options = SearchOptions {
            duplicate_detection: true,
            ..SearchOptions::default()
        };
        let result = a_star_with_options(&start, &Manhattan, &options);
        assert_eq!(result.termination, Termination::FrontierExhausted);
        assert_eq!(result.solution_moves, None);
        assert_eq!(result.nodes_explored, 12);
        assert!(!result.is_solved());
    }

    #[test_log::test]
    fn test_expansion_limit_stops_search() {
        let start = walk(3, &[R, R, D, D, L, L, U, U]);
        let options = SearchOptions {
            expansion_limit: Some(5),
            ..SearchOptions::default()
        };
        let result = a_star_with_options(&start, &Manhattan, &options);
        assert_eq!(result.termination, Termination::ExpansionLimit);
        assert_eq!(result.solution_moves, None);
        assert_eq!(result.nodes_explored, 5);
    }

    #[test]
    fn test_closure_heuristic_and_trait_object() {
        let start = walk(2, &[R, D]);
        let closure = |s: &PuzzleState| MisplacedTiles.estimate(s);
        assert_eq!(a_star(&start, &closure).solution_moves, Some(2));

        let boxed: Box<dyn Heuristic> = Box::new(LinearConflict);
        let result = a_star(&start, boxed.as_ref());
        assert_eq!(result.solution_moves, Some(2));
        assert_eq!(result.nodes_explored, 3);
    }

    #[test]
    fn test_frontier_breaks_ties_fifo() {
        let mut frontier = Frontier::new();
        let node = |cost| SearchNode {
            path_cost: cost,
            state: PuzzleState::solved(2),
        };
        frontier.push(3.0, node(0));
        frontier.push(1.0, node(1));
        frontier.push(3.0, node(2));
        frontier.push(1.0, node(3));
        let order: Vec<u32> = std::iter::from_fn(|| frontier.pop())
            .map(|(_, n)| n.path_cost)
            .collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        assert_eq!(frontier.max_len, 4);
    }
}

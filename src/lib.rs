//! Optimal 8-puzzle solving with A* search.
//!
//! Boards are parsed into [`State`] values, gated by inversion parity with
//! [`check_reachable`], and solved by [`Solver`] using either the Manhattan
//! or misplaced-tiles [`Heuristic`].

pub mod error;
pub mod heuristic;
pub mod puzzle;
pub mod search;

pub use error::{PuzzleError, Result};
pub use heuristic::{manhattan_distance, misplaced_tiles, GoalLayout, Heuristic};
pub use puzzle::{check_reachable, is_solvable_class, moves_along, parse, Move, State};
pub use search::{reconstruct_path, search, solve, PredecessorMap, SearchOutcome, Solver};

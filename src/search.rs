use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::Result;
use crate::heuristic::{GoalLayout, Heuristic};
use crate::puzzle::{check_reachable, moves_along, Move, State};

/// Child to parent links of the search tree. The start maps to `None`.
pub type PredecessorMap = FxHashMap<State, Option<State>>;

/// Result of one search. `path` runs start to goal inclusive and is empty
/// when `found` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub path: Vec<State>,
    pub expanded: usize,
    pub found: bool,
    /// The expansion limit stopped the search before it finished.
    pub hit_limit: bool,
}

impl SearchOutcome {
    pub fn move_count(&self) -> Option<usize> {
        self.found.then(|| self.path.len() - 1)
    }

    pub fn moves(&self) -> Vec<Move> {
        moves_along(&self.path).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    estimate: u32,
    cost: u32,
    state: State,
}

// Reversed so the max-heap pops the lowest estimate, then the lowest cost,
// then the lowest board.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* over blank moves. Every call owns its frontier and bookkeeping, so a
/// `Solver` can be shared and reused freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    heuristic: Heuristic,
    expansion_limit: Option<usize>,
}

impl Solver {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            expansion_limit: None,
        }
    }

    /// Give up once `limit` states have been expanded without reaching the goal.
    /// The goal itself is always expanded, so a found path may report one
    /// expansion over the limit.
    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.expansion_limit = Some(limit);
        self
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn expansion_limit(&self) -> Option<usize> {
        self.expansion_limit
    }

    pub fn search(&self, start: &State, goal: &State) -> SearchOutcome {
        let layout = GoalLayout::new(goal);
        let heuristic = self.heuristic;

        debug!(
            "searching {:?} -> {:?} with {} heuristic",
            start.tiles(),
            goal.tiles(),
            heuristic
        );

        self.search_with(start, goal, |state| heuristic.estimate(state, &layout))
    }

    fn search_with<F>(&self, start: &State, goal: &State, mut estimate_of: F) -> SearchOutcome
    where
        F: FnMut(&State) -> u32,
    {
        let mut frontier = BinaryHeap::new();
        let mut g_score: FxHashMap<State, u32> = FxHashMap::default();
        let mut predecessors = PredecessorMap::default();
        let mut closed: FxHashSet<State> = FxHashSet::default();
        let mut expanded = 0;

        frontier.push(FrontierEntry {
            estimate: estimate_of(start),
            cost: 0,
            state: *start,
        });
        g_score.insert(*start, 0);
        predecessors.insert(*start, None);

        while let Some(FrontierEntry {
            estimate,
            cost,
            state: current,
        }) = frontier.pop()
        {
            // Superseded entries stay queued and are dropped here.
            if closed.contains(&current) {
                continue;
            }

            if current != *goal && self.expansion_limit.is_some_and(|limit| expanded >= limit) {
                debug!("expansion limit reached after {} states", expanded);
                return SearchOutcome {
                    path: Vec::new(),
                    expanded,
                    found: false,
                    hit_limit: true,
                };
            }

            closed.insert(current);
            expanded += 1;
            trace!("expanding {:?} g={} f={}", current.tiles(), cost, estimate);

            if current == *goal {
                let path = reconstruct_path(&predecessors, goal);
                debug!(
                    "found {} move solution after expanding {} states",
                    path.len() - 1,
                    expanded
                );
                return SearchOutcome {
                    path,
                    expanded,
                    found: true,
                    hit_limit: false,
                };
            }

            let tentative = cost + 1;
            for neighbor in current.neighbors() {
                let known = g_score.get(&neighbor).copied();

                if closed.contains(&neighbor) {
                    if known.is_some_and(|g| tentative >= g) {
                        continue;
                    }
                    // Only an inconsistent estimate could get here.
                    closed.remove(&neighbor);
                }

                if known.map_or(true, |g| tentative < g) {
                    predecessors.insert(neighbor, Some(current));
                    g_score.insert(neighbor, tentative);
                    frontier.push(FrontierEntry {
                        estimate: tentative + estimate_of(&neighbor),
                        cost: tentative,
                        state: neighbor,
                    });
                }
            }
        }

        debug!("frontier exhausted after expanding {} states", expanded);
        SearchOutcome {
            path: Vec::new(),
            expanded,
            found: false,
            hit_limit: false,
        }
    }
}

/// Walks parent links back from `goal` and returns the path start first.
pub fn reconstruct_path(predecessors: &PredecessorMap, goal: &State) -> Vec<State> {
    let mut path: Vec<State> = std::iter::successors(Some(*goal), |state| {
        predecessors.get(state).copied().flatten()
    })
    .collect();
    path.reverse();
    path
}

/// Unbounded search with the heuristic picked by name token.
pub fn search(start: &State, goal: &State, heuristic_name: &str) -> SearchOutcome {
    Solver::new(Heuristic::from_name(heuristic_name)).search(start, goal)
}

/// Rejects start and goal from different parity classes, then searches.
pub fn solve(start: &State, goal: &State, heuristic: Heuristic) -> Result<SearchOutcome> {
    check_reachable(start, goal)?;
    Ok(Solver::new(heuristic).search(start, goal))
}

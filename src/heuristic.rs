use log::warn;
use std::fmt;

use crate::puzzle::{State, BLANK, SIZE, TILE_COUNT};

/// Distance estimate used to order the A* frontier. Both variants are
/// admissible and consistent for unit-cost blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Misplaced,
}

impl Heuristic {
    /// Resolves a selector token. Unknown tokens fall back to Manhattan.
    pub fn from_name(name: &str) -> Self {
        match name {
            "manhattan" => Heuristic::Manhattan,
            "misplaced" | "misplaced_tiles" => Heuristic::Misplaced,
            other => {
                warn!("unknown heuristic `{}`, using manhattan", other);
                Heuristic::Manhattan
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Misplaced => "misplaced",
        }
    }

    pub fn estimate(&self, state: &State, goal: &GoalLayout) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan_distance(state, goal),
            Heuristic::Misplaced => misplaced_tiles(state, goal.goal()),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Goal board plus where each tile value sits in it, built once per search.
#[derive(Debug, Clone)]
pub struct GoalLayout {
    goal: State,
    positions: [(usize, usize); TILE_COUNT],
}

impl GoalLayout {
    pub fn new(goal: &State) -> Self {
        let mut positions = [(0, 0); TILE_COUNT];
        for (index, &tile) in goal.tiles().iter().enumerate() {
            positions[tile as usize] = (index / SIZE, index % SIZE);
        }

        Self {
            goal: *goal,
            positions,
        }
    }

    pub fn goal(&self) -> &State {
        &self.goal
    }

    pub fn position_of(&self, tile: u8) -> (usize, usize) {
        self.positions[tile as usize]
    }
}

pub fn manhattan_distance(state: &State, goal: &GoalLayout) -> u32 {
    let mut distance = 0;
    for (index, &tile) in state.tiles().iter().enumerate() {
        if tile != BLANK {
            let (target_row, target_col) = goal.position_of(tile);
            distance += (index / SIZE).abs_diff(target_row);
            distance += (index % SIZE).abs_diff(target_col);
        }
    }
    distance as u32
}

pub fn misplaced_tiles(state: &State, goal: &State) -> u32 {
    state
        .tiles()
        .iter()
        .zip(goal.tiles().iter())
        .filter(|&(&tile, &target)| tile != BLANK && tile != target)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(tiles: [u8; TILE_COUNT]) -> State {
        State::try_from(tiles).unwrap()
    }

    #[test_log::test]
    fn selects_by_name_with_manhattan_fallback() {
        assert_eq!(Heuristic::from_name("manhattan"), Heuristic::Manhattan);
        assert_eq!(Heuristic::from_name("misplaced"), Heuristic::Misplaced);
        assert_eq!(Heuristic::from_name("misplaced_tiles"), Heuristic::Misplaced);
        assert_eq!(Heuristic::from_name("euclidean"), Heuristic::Manhattan);
        assert_eq!(Heuristic::from_name(""), Heuristic::Manhattan);
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);
    }

    #[test_log::test]
    fn goal_layout_maps_values_to_cells() {
        let layout = GoalLayout::new(&state([1, 2, 3, 8, 0, 4, 7, 6, 5]));
        assert_eq!(layout.position_of(0), (1, 1));
        assert_eq!(layout.position_of(8), (1, 0));
        assert_eq!(layout.position_of(5), (2, 2));
    }

    #[test_log::test]
    fn both_heuristics_are_zero_at_goal() {
        let goal = state([1, 2, 3, 8, 0, 4, 7, 6, 5]);
        let layout = GoalLayout::new(&goal);
        assert_eq!(Heuristic::Manhattan.estimate(&goal, &layout), 0);
        assert_eq!(Heuristic::Misplaced.estimate(&goal, &layout), 0);
    }

    #[test_log::test]
    fn scores_textbook_instance() {
        let start = state([2, 8, 3, 1, 6, 4, 7, 0, 5]);
        let layout = GoalLayout::new(&state([1, 2, 3, 8, 0, 4, 7, 6, 5]));

        // 2, 8, 1 and 6 are off; 8 is two cells away
        assert_eq!(manhattan_distance(&start, &layout), 5);
        assert_eq!(misplaced_tiles(&start, layout.goal()), 4);
    }

    #[test_log::test]
    fn blank_never_counts() {
        let solved = State::solved();
        let layout = GoalLayout::new(&solved);
        let one_move = solved.neighbors()[0];

        assert_eq!(manhattan_distance(&one_move, &layout), 1);
        assert_eq!(misplaced_tiles(&one_move, &solved), 1);
    }
}

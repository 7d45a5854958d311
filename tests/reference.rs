use std::collections::{HashMap, VecDeque};

use eight_puzzle::{
    check_reachable, is_solvable_class, manhattan_distance, misplaced_tiles, moves_along, search,
    GoalLayout, Heuristic, Move, PuzzleError, Solver, State,
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Half of 9!: the size of each parity class.
const REACHABLE_STATES: usize = 181_440;

/// Breadth-first distances from `goal` to every board that can reach it.
/// Moves are reversible, so these are also the distances to the goal.
fn distances_from(goal: &State) -> (HashMap<State, u32>, Vec<State>) {
    let mut distances = HashMap::with_capacity(REACHABLE_STATES);
    let mut order = Vec::with_capacity(REACHABLE_STATES);
    let mut queue = VecDeque::new();

    distances.insert(*goal, 0);
    queue.push_back(*goal);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        let next = distances[&current] + 1;
        for neighbor in current.neighbors() {
            if !distances.contains_key(&neighbor) {
                distances.insert(neighbor, next);
                queue.push_back(neighbor);
            }
        }
    }

    (distances, order)
}

fn textbook_goal() -> State {
    State::parse("1 2 3\n8 0 4\n7 6 5").unwrap()
}

fn random_permutation(rng: &mut StdRng) -> State {
    let mut tiles: [u8; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    tiles.shuffle(rng);
    State::try_from(tiles).unwrap()
}

#[test_log::test]
fn parse_matches_tiles_for_random_permutations() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let expected = random_permutation(&mut rng).tiles();
        let text = expected
            .iter()
            .map(|tile| tile.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let parsed = State::parse(&text).unwrap();
        assert_eq!(parsed.tiles(), expected);

        // drop one tile, then duplicate another in its place
        let missing = rng.gen_range(0..9);
        let mut short = expected.to_vec();
        short.remove(missing);
        let short_text = short.iter().map(u8::to_string).collect::<Vec<_>>().join(" ");
        assert_eq!(
            State::parse(&short_text),
            Err(PuzzleError::MalformedInput { count: 8 })
        );

        short.push(short[0]);
        assert!(matches!(
            State::try_from(&short[..]),
            Err(PuzzleError::InvalidTiles { .. })
        ));
    }
}

#[test_log::test]
fn parity_class_predicts_reachability() {
    let goal = State::solved();
    let (distances, _) = distances_from(&goal);
    assert_eq!(distances.len(), REACHABLE_STATES);

    assert!(distances.keys().all(|state| is_solvable_class(state)));

    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let state = random_permutation(&mut rng);
        assert_eq!(
            distances.contains_key(&state),
            is_solvable_class(&state) == is_solvable_class(&goal)
        );
        assert_eq!(
            check_reachable(&state, &goal).is_ok(),
            distances.contains_key(&state)
        );
    }
}

#[test_log::test]
fn heuristics_never_overestimate() {
    let goal = textbook_goal();
    let layout = GoalLayout::new(&goal);
    let (distances, order) = distances_from(&goal);

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..2_000 {
        let state = order[rng.gen_range(0..order.len())];
        let actual = distances[&state];
        assert!(manhattan_distance(&state, &layout) <= actual);
        assert!(misplaced_tiles(&state, &goal) <= actual);
    }
}

#[test_log::test]
fn search_paths_are_optimal_and_legal() {
    let goal = textbook_goal();
    let (distances, order) = distances_from(&goal);

    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..25 {
        let start = order[rng.gen_range(0..order.len())];
        let shortest = distances[&start] as usize;

        let mut heuristics = vec![Heuristic::Manhattan];
        // misplaced tiles is weak enough to be slow on deep boards
        if shortest <= 18 {
            heuristics.push(Heuristic::Misplaced);
        }

        for heuristic in heuristics {
            let outcome = Solver::new(heuristic).search(&start, &goal);
            assert!(outcome.found);
            assert_eq!(outcome.path.first(), Some(&start));
            assert_eq!(outcome.path.last(), Some(&goal));
            assert_eq!(outcome.move_count(), Some(shortest), "{heuristic} on {start:?}");

            let moves = moves_along(&outcome.path).expect("consecutive boards one move apart");
            assert_eq!(moves.len(), shortest);
        }
    }
}

#[test_log::test]
fn textbook_instance_takes_five_moves() {
    let start = State::parse("2 8 3\n1 6 4\n7 0 5").unwrap();
    let goal = textbook_goal();

    // both boards have an odd inversion count, so they share a class
    assert!(!is_solvable_class(&start));
    assert!(!is_solvable_class(&goal));

    let (distances, _) = distances_from(&goal);
    assert_eq!(distances[&start], 5);

    let outcome = search(&start, &goal, "manhattan");
    assert!(outcome.found);
    assert_eq!(outcome.path.len(), 6);
    assert_eq!(outcome.moves()[0], Move::Up);
}

#[test_log::test]
fn swapped_tiles_are_in_the_other_class() {
    let start = State::parse("1 2 3 4 5 6 8 7 0").unwrap();
    let goal = State::parse("1 2 3 4 5 6 7 8 0").unwrap();

    assert_ne!(is_solvable_class(&start), is_solvable_class(&goal));
    assert_eq!(
        check_reachable(&start, &goal),
        Err(PuzzleError::UnreachableGoal)
    );
}

#[test_log::test]
fn unreachable_goal_exhausts_the_class_and_terminates() {
    let start = State::parse("1 2 3 4 5 6 8 7 0").unwrap();
    let goal = State::solved();

    let outcome = search(&start, &goal, "manhattan");
    assert!(!outcome.found);
    assert!(!outcome.hit_limit);
    assert!(outcome.path.is_empty());
    assert_eq!(outcome.expanded, REACHABLE_STATES);
}

#[test_log::test]
fn searching_twice_gives_identical_results() {
    let goal = State::solved();
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..3 {
        let start = State::shuffled_like(&goal, &mut rng);
        for name in ["manhattan", "misplaced"] {
            let first = search(&start, &goal, name);
            let second = search(&start, &goal, name);
            assert_eq!(first.path, second.path);
            assert_eq!(first.expanded, second.expanded);
        }
    }
}

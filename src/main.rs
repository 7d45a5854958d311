use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::style::{style, Stylize};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use eight_puzzle::puzzle::{BLANK, SIZE};
use eight_puzzle::{check_reachable, Heuristic, Solver, State};

#[derive(Debug, Parser)]
#[command(name = "eight-puzzle", version, about = "Solve the 8-puzzle with A* search")]
struct Args {
    /// Start board, nine numbers with 0 as the blank
    #[arg(long, default_value = "2 8 3 1 6 4 7 0 5")]
    start: String,

    /// Goal board, nine numbers with 0 as the blank
    #[arg(long, default_value = "1 2 3 8 0 4 7 6 5")]
    goal: String,

    /// `manhattan` or `misplaced`; anything else means manhattan
    #[arg(long, default_value = "manhattan")]
    heuristic: String,

    /// Ignore --start and shuffle a board that can reach the goal
    #[arg(long)]
    random: bool,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Stop after expanding this many states
    #[arg(long)]
    max_expansions: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let goal = State::parse(&args.goal).context("Parsing goal board")?;
    let start = if args.random {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        State::shuffled_like(&goal, &mut rng)
    } else {
        State::parse(&args.start).context("Parsing start board")?
    };

    println!("Start:\n{}", start);
    println!("Goal:\n{}", goal);

    check_reachable(&start, &goal).context("Checking start and goal parity")?;

    let heuristic = Heuristic::from_name(&args.heuristic);
    let mut solver = Solver::new(heuristic);
    if let Some(limit) = args.max_expansions {
        solver = solver.with_expansion_limit(limit);
    }

    info!("Solving with {} heuristic", heuristic);
    let outcome = solver.search(&start, &goal);

    if !outcome.found {
        if outcome.hit_limit {
            bail!("Gave up after expanding {} states", outcome.expanded);
        }
        bail!("No solution found after expanding {} states", outcome.expanded);
    }

    let moves = outcome.moves();
    println!(
        "Found optimal solution with {} moves ({} states expanded, {} heuristic)\n",
        moves.len(),
        outcome.expanded,
        heuristic
    );

    for (step, (pair, movement)) in outcome.path.windows(2).zip(&moves).enumerate() {
        println!("Step {} / {}: {}", step + 1, moves.len(), movement);
        // the tile that slid now sits where the blank was
        print_board(&pair[1], pair[0].blank_index());
    }

    Ok(())
}

fn print_board(state: &State, highlight: usize) {
    for (index, &tile) in state.tiles().iter().enumerate() {
        let cell = if tile == BLANK {
            "  ".to_string()
        } else {
            format!("{:2}", tile)
        };

        if index == highlight {
            print!("{} ", style(cell).bold().yellow());
        } else {
            print!("{} ", cell);
        }

        if index % SIZE == SIZE - 1 {
            println!();
        }
    }
    println!();
}

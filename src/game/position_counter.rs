use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::board::StartingPosition;
use crate::evaluate::HeuristicEvaluator;
use crate::game::engine::EngineError;
use crate::move_generator::MoveGenerator;
use crate::search_tree::{SearchConfig, SearchTree};
use crate::snapshot::BoardSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountPositionsStrategy {
    /// Every line of play, no tree.
    All,
    /// Nodes the search tree creates at each depth.
    Search,
}

impl FromStr for CountPositionsStrategy {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CountPositionsStrategy::All),
            "search" => Ok(CountPositionsStrategy::Search),
            _ => Err("invalid strategy; options are: all, search"),
        }
    }
}

pub fn run_count_positions(
    depth: u8,
    strategy: CountPositionsStrategy,
    starting_position: &StartingPosition,
    search: SearchConfig,
) -> Result<(), EngineError> {
    let move_generator = MoveGenerator::default();
    let snapshot = BoardSnapshot::from_setup(starting_position)?;
    let evaluator = HeuristicEvaluator::default();

    let mut total_positions = 0;
    let mut total_duration = Duration::from_secs(0);

    for depth in 1..=depth {
        let starting_time = Instant::now();
        let count = match strategy {
            CountPositionsStrategy::All => move_generator.count_positions(&snapshot, depth),
            CountPositionsStrategy::Search => {
                let mut tree = SearchTree::new(snapshot.clone(), search.clone())?;
                tree.search(depth, &evaluator)?;
                tree.stats().nodes_created()
            }
        };
        let duration = starting_time.elapsed();
        let positions_per_second = count as f64 / duration.as_secs_f64();

        total_positions += count;
        total_duration += duration;

        println!(
            "depth: {}, positions: {}, positions per second: {:.0}",
            depth, count, positions_per_second
        );
    }

    println!(
        "total positions: {}, total duration: {:?}, positions per second: {:.0}",
        total_positions,
        total_duration,
        total_positions as f64 / total_duration.as_secs_f64()
    );
    Ok(())
}

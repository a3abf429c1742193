//! Count positions command - count reachable positions at a given depth.

use amazons::game::position_counter::{run_count_positions, CountPositionsStrategy};
use structopt::StructOpt;

use super::util::SearchArgs;
use super::Command;

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(flatten)]
    pub search: SearchArgs,
    #[structopt(long, default_value = "all")]
    pub strategy: CountPositionsStrategy,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        let result = run_count_positions(
            self.search.depth,
            self.strategy,
            &self.search.starting_position,
            self.search.search_config(),
        );
        if let Err(err) = result {
            eprintln!("Failed to count positions: {}", err);
        }
    }
}

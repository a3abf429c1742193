//! Play command - play a game against the engine.

use std::path::PathBuf;

use amazons::board::side::Side;
use amazons::game::input_source::{ConditionalInput, HumanInput};
use amazons::game::renderer::ConditionalStatsRenderer;
use amazons::game::session::PlayerRegistry;
use structopt::StructOpt;

use super::util::{create_config, run_game_loop, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(flatten)]
    pub search: SearchArgs,
    #[structopt(short, long, default_value = "random")]
    pub side: Side,
    #[structopt(long, help = "Write every committed move to this file, one per line", parse(from_os_str))]
    pub record: Option<PathBuf>,
}

impl Command for PlayArgs {
    fn execute(self) {
        let players = PlayerRegistry::human_against_engine(self.side);
        let config = create_config(&self.search, players);
        run_game_loop(
            ConditionalInput { human: HumanInput },
            ConditionalStatsRenderer,
            config,
            self.record,
        );
    }
}

//! Watch command - watch the engine play against itself.

use std::path::PathBuf;
use std::time::Duration;

use amazons::game::input_source::EngineInput;
use amazons::game::renderer::StatsRenderer;
use amazons::game::session::PlayerRegistry;
use structopt::StructOpt;

use super::util::{create_config, run_game_loop, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(flatten)]
    pub search: SearchArgs,
    #[structopt(
        long = "delay",
        default_value = "1000",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
    #[structopt(long, help = "Write every committed move to this file, one per line", parse(from_os_str))]
    pub record: Option<PathBuf>,
}

impl Command for WatchArgs {
    fn execute(self) {
        let config = create_config(&self.search, PlayerRegistry::engines());
        let renderer = StatsRenderer {
            delay_between_moves: Some(Duration::from_millis(self.delay_ms)),
        };
        run_game_loop(EngineInput, renderer, config, self.record);
    }
}

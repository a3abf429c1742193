//! Shared utilities for CLI commands.

use std::path::PathBuf;

use amazons::board::StartingPosition;
use amazons::game::engine::EngineConfig;
use amazons::game::game_loop::GameLoop;
use amazons::game::input_source::InputSource;
use amazons::game::recorder::MoveRecorder;
use amazons::game::renderer::GameRenderer;
use amazons::game::session::PlayerRegistry;
use amazons::search_tree::SearchConfig;
use structopt::StructOpt;

/// Search options shared by every command that runs the engine.
#[derive(StructOpt)]
pub struct SearchArgs {
    #[structopt(short, long, default_value = "2")]
    pub depth: u8,
    #[structopt(long = "board", default_value = "standard")]
    pub starting_position: StartingPosition,
    #[structopt(long, help = "Worker threads for parallel search (0 uses every core)", default_value = "0")]
    pub threads: usize,
    #[structopt(long, help = "Expand children one at a time on the calling thread")]
    pub sequential: bool,
    #[structopt(long = "no-pruning", help = "Expand every child instead of cutting off refuted branches")]
    pub no_pruning: bool,
    #[structopt(long, help = "Seed for the evaluation tie-break")]
    pub seed: Option<u64>,
}

impl SearchArgs {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            parallel: !self.sequential,
            pruning: !self.no_pruning,
            threads: self.threads,
        }
    }
}

pub(crate) fn create_config(args: &SearchArgs, players: PlayerRegistry) -> EngineConfig {
    EngineConfig {
        search_depth: args.depth,
        starting_position: args.starting_position.clone(),
        search: args.search_config(),
        seed: args.seed,
        players,
    }
}

pub(crate) fn run_game_loop<I, R>(
    input_source: I,
    renderer: R,
    config: EngineConfig,
    record: Option<PathBuf>,
) where
    I: InputSource,
    R: GameRenderer,
{
    let mut game = match GameLoop::new(input_source, renderer, config) {
        Ok(game) => game,
        Err(error) => {
            eprintln!("Failed to start the game: {}", error);
            std::process::exit(1);
        }
    };

    if let Some(path) = record {
        match MoveRecorder::create(&path) {
            Ok(recorder) => game = game.with_recorder(recorder),
            Err(error) => {
                eprintln!("Failed to open {}: {}", path.display(), error);
                std::process::exit(1);
            }
        }
    }

    game.run();
}

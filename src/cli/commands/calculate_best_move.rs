//! Calculate best move command - determine the best move from a position.

use std::path::PathBuf;

use amazons::game::engine::Engine;
use amazons::game::recorder::read_record;
use amazons::game::renderer::format_stats;
use amazons::game::session::PlayerRegistry;
use structopt::StructOpt;

use super::util::{create_config, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(flatten)]
    pub search: SearchArgs,
    #[structopt(
        long,
        help = "Replay a recorded game (one move per line) before searching",
        parse(from_os_str)
    )]
    pub moves: Option<PathBuf>,
    #[structopt(long, help = "Also print search statistics to stderr")]
    pub stats: bool,
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) {
        let config = create_config(&self.search, PlayerRegistry::engines());
        let mut engine = match Engine::with_config(config) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("Failed to set up the position: {}", err);
                return;
            }
        };

        if let Some(path) = &self.moves {
            let replayed = std::fs::read_to_string(path)
                .map_err(|err| err.to_string())
                .and_then(|contents| {
                    read_record(&contents, engine.side_to_move()).map_err(|err| err.to_string())
                });
            let moves = match replayed {
                Ok(moves) => moves,
                Err(err) => {
                    eprintln!("Failed to read {}: {}", path.display(), err);
                    return;
                }
            };
            for amazons_move in moves {
                if let Err(err) = engine.commit(amazons_move) {
                    eprintln!("Cannot replay {}: {}", amazons_move, err);
                    return;
                }
            }
        }

        if let Some(ending) = engine.check_game_over() {
            eprintln!("The game is already over, side {} won.", ending.winner());
            return;
        }

        match engine.get_best_move() {
            Ok(best_move) => {
                println!("{}", best_move);
                if self.stats {
                    eprintln!("{}", format_stats(&engine.get_search_stats()));
                }
            }
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}

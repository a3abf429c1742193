//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    calculate_best_move::CalculateBestMoveArgs, count_positions::CountPositionsArgs,
    play::PlayArgs, watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "amazons",
    about = "A Game of the Amazons engine: move a queen, then burn a tile"
)]
pub enum Amazons {
    #[structopt(
        name = "play",
        about = "Play a game against the engine, which expands its search tree `--depth` plies (default: 2) below the current position. Your side is chosen at random unless you specify one with `--side`. The board is picked with `--board` (standard, small, or a ROWSxCOLS:layout string)."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "watch",
        about = "Watch the engine play against itself at the given `--depth` (default: 2), pausing `--delay` milliseconds between moves."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "calculate-best-move",
        about = "Print the engine's best move from the position given with `--board`, searching `--depth` plies (default: 2)."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
    #[structopt(
        name = "count-positions",
        about = "Count reachable positions for each depth up to `--depth` (default: 2) and report the time it took. By default every line of play is counted; `--strategy search` counts the nodes the search tree creates instead."
    )]
    CountPositions(CountPositionsArgs),
}

impl crate::cli::commands::Command for Amazons {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
            Watch(cmd),
            CalculateBestMove(cmd),
            CountPositions(cmd),
        }
    }
}

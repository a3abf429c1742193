mod cli;

use cli::commands::Command;
use cli::Amazons;
use structopt::StructOpt;

fn main() {
    env_logger::init();

    #[cfg(feature = "instrumentation")]
    amazons::instrumentation::init_tracing();

    Amazons::from_args().execute();

    #[cfg(feature = "instrumentation")]
    amazons::instrumentation::print_timing_statistics();
}

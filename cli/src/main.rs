mod commands;
mod input;
mod output;
mod terminal;

use commands::{CommandLine, Commands, check, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.command.verbose());

    match commands.command {
        Commands::Scan(args) => {
            print::header("starting virtual host scan");
            scan::scan(args).await
        }
        Commands::Check(args) => {
            print::header("starting host check");
            check::check(args).await
        }
    }
}

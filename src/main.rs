//! dupehunter command-line entry point.

use clap::Parser;
use dupehunter::{cli::Cli, error::ExitCode, logging::init_logging, signal};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = signal::install_handler() {
        log::warn!("{}", e);
    }

    match dupehunter::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::from_error(&err);
            if exit_code == ExitCode::Interrupted {
                signal::announce_quit();
            } else {
                eprintln!("Error: {:#}", err);
            }
            std::process::exit(exit_code.as_i32());
        }
    }
}

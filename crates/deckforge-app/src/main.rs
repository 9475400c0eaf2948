//! Deckforge command-line entry point.

use clap::Parser;
use deckforge_app::AppArgs;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Deckforge");

    let args = AppArgs::parse();
    match deckforge_app::run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

//! RAX image server - Entry Point

use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use rax_image_server::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let cli = Cli::parse();
    info!("Launching image server: {}", cli.command.name());

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

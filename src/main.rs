use std::process::ExitCode;

use clap::Parser;
use weather_hospital_gateway::cli::{self, Cli, Commands};
use weather_hospital_gateway::infra;

#[tokio::main]
async fn main() -> ExitCode {
    infra::logging::init();

    let cli = Cli::parse();
    cli::run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

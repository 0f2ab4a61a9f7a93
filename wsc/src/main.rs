use clap::Parser;
use colored::Colorize;
use tracing::debug;
use wsc_logging::LogSettings;

mod cli;
mod commands;

use cli::Args;
use commands::execute_command;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_guard = if args.debug {
        let settings = LogSettings {
            level: "debug".to_string(),
            ..LogSettings::from_env()
        };
        wsc_logging::init_with(&settings)
    } else {
        wsc_logging::init_subscriber()
    };

    debug!("Running {:?}", args.command);

    let result = execute_command(args).await;
    drop(log_guard);

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

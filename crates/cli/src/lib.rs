pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::product::ProductCommand;

#[derive(Debug, Parser)]
#[command(
    name = "pricecheck",
    about = "Pricecheck catalog administration CLI",
    long_about = "Manage the product catalog behind the barcode lookup service.",
    after_help = "Examples:\n  pricecheck migrate\n  pricecheck seed\n  \
                  pricecheck product show --barcode 0123456789012\n  pricecheck doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo catalog and verify it was stored")]
    Seed,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, DB connectivity, and catalog schema readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Create, edit, remove, and inspect catalog products")]
    Product {
        #[command(subcommand)]
        command: ProductCommand,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Product { command } => commands::product::run(command),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

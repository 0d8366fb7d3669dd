use std::path::Path;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser, Subcommand};
use pomo_core::DEFAULT_CONFIG_FILE;

mod commands;
mod logging;

const EXAMPLES: &str = "\
Examples:
  pomo work 25m      25 minutes of work
  pomo work 25       25 minutes (short form)
  pomo short 5m      5 minute short break
  pomo cycle 4       4 pomodoros before the long break";

#[derive(Parser)]
#[command(name = "pomo", version, about = "🍅 pomo - Pomodoro timer", after_help = EXAMPLES)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the timer (Ctrl+C to stop)
    Start,
    #[command(flatten)]
    Config(commands::config::ConfigAction),
}

fn print_usage() {
    let _ = Cli::command().print_help();
}

/// The offending token recorded in a clap parse error.
fn offending_token(e: &clap::Error, kind: ContextKind) -> String {
    match e.get(kind) {
        Some(ContextValue::String(token)) => token.clone(),
        _ => String::new(),
    }
}

fn main() {
    logging::init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::InvalidSubcommand => {
                let name = offending_token(&e, ContextKind::InvalidSubcommand);
                println!("Unrecognized command: {name}");
                print_usage();
                return;
            }
            ErrorKind::UnknownArgument => {
                let arg = offending_token(&e, ContextKind::InvalidArg);
                println!("Unexpected argument: {arg}");
                print_usage();
                return;
            }
            ErrorKind::MissingRequiredArgument => {
                let name = std::env::args().nth(1).unwrap_or_default();
                println!("Usage: pomo {name} <value>");
                return;
            }
            _ => e.exit(),
        },
    };

    let Some(command) = cli.command else {
        print_usage();
        return;
    };

    let path = Path::new(DEFAULT_CONFIG_FILE);
    let result = match command {
        Commands::Start => commands::timer::run(path),
        Commands::Config(action) => commands::config::run(action, path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

//! visited-map - render a world map of the countries a user has visited
//!
//! Usage:
//!   visited-map render --visited France,Japan -o map.png
//!   visited-map render --user 42                 Use stored countries
//!   visited-map add --user 42 France             Record a visit
//!   visited-map remove --user 42 France          Forget a visit
//!   visited-map list --user 42                   Print stored countries
//!   visited-map bounds --dataset countries.geo.json

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use cli::{
    BoundsArgs, CliError, Config, CountryArgs, ListArgs, RenderArgs,
    cmd_add, cmd_bounds, cmd_list, cmd_remove, cmd_render,
};

#[derive(Debug, Parser)]
#[command(name = "visited-map", version, about = "Render a world map of visited countries")]
struct Cli {
    /// YAML config file (dataset, store, output)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the map to PNG
    Render(RenderArgs),
    /// Print the map extent of a dataset as JSON
    Bounds(BoundsArgs),
    /// Record a visited country for a user
    Add(CountryArgs),
    /// Remove a visited country from a user
    Remove(CountryArgs),
    /// List a user's visited countries as JSON
    List(ListArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Render(args) => cmd_render(args, &config),
        Command::Bounds(args) => cmd_bounds(args, &config),
        Command::Add(args) => cmd_add(args, &config),
        Command::Remove(args) => cmd_remove(args, &config),
        Command::List(args) => cmd_list(args, &config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

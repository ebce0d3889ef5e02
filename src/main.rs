mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod telemetry;
mod workflow;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::generate::{self, GenerateArgs};
use crate::config::{AppConfig, CONFIG_ENV_VAR, config_file_path};
use crate::error::AppResult;

#[derive(Parser)]
#[command(
    name = "changelog",
    author,
    version,
    about = "Changelog generator for merged pull requests"
)]
struct Cli {
    /// Configuration file to use instead of the one in the user config directory.
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the changelog for pull requests merged in <from>..<to>.
    Generate(GenerateArgs),
    /// Manage the component registry and section rules.
    Config(ConfigArgs),
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(telemetry::level_for(cli.verbose));

    match cli.command {
        Commands::Config(args) => {
            let path = match cli.config {
                Some(path) => path,
                None => config_file_path()?,
            };
            config_cmd::run(args.command, &path)
        }
        Commands::Generate(args) => {
            let config = AppConfig::load(cli.config.as_deref())?;
            let report = generate::run(args, config)?;
            print!("{report}");
            Ok(())
        }
    }
}

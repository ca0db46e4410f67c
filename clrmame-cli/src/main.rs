//! clrmame CLI
//!
//! Command-line interface for inspecting ClrMamePro and Logiqx XML DAT files.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_path, run_config_set, run_config_show};
use commands::games::run_games;
use commands::header::run_header;
use commands::tree::run_tree;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli.command) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Plain messages at info, a level prefix for everything else. `RUST_LOG`
/// overrides the level chosen by the flags.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            if record.level() == log::Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
        })
        .init();
}

fn run(command: Commands) -> Result<(), CliError> {
    let settings = settings::load();

    match command {
        Commands::Tree { dat, container } => run_tree(
            &dat.file,
            dat.format.unwrap_or(settings.output.format),
            container.unwrap_or(settings.parse.container),
        ),
        Commands::Games { dat, name, limit } => run_games(
            &dat.file,
            dat.format.unwrap_or(settings.output.format),
            name.as_deref(),
            limit,
        ),
        Commands::Header { dat } => {
            run_header(&dat.file, dat.format.unwrap_or(settings.output.format))
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                run_config_show();
                Ok(())
            }
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
            ConfigAction::Set { key, value } => run_config_set(&key, &value),
        },
    }
}

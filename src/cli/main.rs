//! Command-line interface entry point for `CourseScope`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use course_scope::config::Config;
use course_scope::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use course_scope::{error, info};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    if !config.logging.file.is_empty() {
        let log_path = PathBuf::from(&config.logging.file);
        let display_path = log_path.to_string_lossy();
        if init_file_logging(&log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults)
        }
        Command::Eligible {
            search,
            level,
            difficulty,
            credits,
            completed,
            in_progress,
            planned,
            skip,
            format,
            explain,
            output,
        } => commands::eligible::run(
            &config,
            &commands::eligible::EligibleArgs {
                search,
                levels: level,
                difficulties: difficulty,
                credits,
                completed,
                in_progress,
                planned,
                skip,
                format,
                explain,
                output,
            },
        ),
        Command::Check {
            codes,
            satisfied,
            format,
        } => commands::check::run(&config, &codes, &satisfied, format),
        Command::Plan { subcommand } => commands::plan::run(subcommand, &config),
        Command::Progress { requirements } => {
            commands::progress::run(&config, requirements.as_deref())
        }
        Command::State { subcommand } => commands::state::run(subcommand, &config),
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

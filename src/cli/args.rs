//! CLI argument definitions for `CourseScope`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use course_scope::config::ConfigOverrides;
use course_scope::logger::Level;
use course_scope::models::Difficulty;
use course_scope::report::ReportFormat;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Level::from(*self).as_str())
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// A KEY shows one value; a section name (`logging`, `data`, `planning`) shows that section.
    Get {
        /// Key or section (e.g., `catalog`, `data.state`, `planning`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Key to set, bare or qualified (e.g., `state`, `data.catalog`)
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum PlanSubcommand {
    /// Add courses to the plan.
    ///
    /// Only currently eligible courses are accepted unless --force is given.
    Add {
        /// Course codes (e.g., "CS 141")
        #[arg(value_name = "CODES", num_args = 1..)]
        codes: Vec<String>,
        /// Add even if prerequisites are unmet
        #[arg(long)]
        force: bool,
    },
    /// Remove courses from the plan.
    Remove {
        /// Course codes to remove
        #[arg(value_name = "CODES", num_args = 1..)]
        codes: Vec<String>,
    },
    /// Show the plan with its credit total and workload balance.
    Show,
    /// Remove every planned course.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum StateSubcommand {
    /// Show the saved planning state.
    Show,
    /// Choose a major; clears all course selections.
    Major {
        /// Major identifier
        #[arg(long)]
        id: u32,
        /// Major name
        #[arg(long)]
        name: String,
        /// Concentration within the major
        #[arg(long)]
        concentration: Option<String>,
    },
    /// Record completed and in-progress coursework.
    ///
    /// Each selection must contain the prerequisites of its courses; in-progress
    /// courses may also rely on completed ones.
    Set {
        /// Completed course codes (comma separated)
        #[arg(long, value_delimiter = ',', value_name = "CODES")]
        completed: Option<Vec<String>>,
        /// In-progress course codes (comma separated)
        #[arg(long, value_delimiter = ',', value_name = "CODES")]
        in_progress: Option<Vec<String>>,
        /// Save even when prerequisites are missing
        #[arg(long)]
        force: bool,
    },
    /// List courses offered when picking completed or in-progress coursework.
    Candidates {
        /// Pick in-progress courses (completed ones are excluded)
        #[arg(long)]
        in_progress: bool,
    },
    /// Skip guided planning and browse the whole catalog.
    Skip,
    /// Delete the saved state (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// Data file paths live under `[data]` and onboarding behaviour under `[planning]`.
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List courses the user can add to their plan.
    ///
    /// Coursework defaults to the saved state; the flags below replace it for this run.
    Eligible {
        /// Search course codes, titles and descriptions
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,

        /// Only these levels (e.g., 100, 200)
        #[arg(long, value_name = "LEVEL", value_delimiter = ',')]
        level: Vec<u32>,

        /// Only these difficulties (light, moderate, challenging)
        #[arg(long, value_name = "DIFFICULTY", value_delimiter = ',')]
        difficulty: Vec<Difficulty>,

        /// Only courses offering these credit hours
        #[arg(long, value_name = "CREDITS", value_delimiter = ',')]
        credits: Vec<u32>,

        /// Completed course codes (comma separated)
        #[arg(long, value_delimiter = ',', value_name = "CODES")]
        completed: Option<Vec<String>>,

        /// In-progress course codes (comma separated)
        #[arg(long, value_delimiter = ',', value_name = "CODES")]
        in_progress: Option<Vec<String>>,

        /// Planned course codes (comma separated)
        #[arg(long, value_delimiter = ',', value_name = "CODES")]
        planned: Option<Vec<String>>,

        /// Bypass prerequisite and exclusion filtering
        #[arg(long)]
        skip: bool,

        /// Output format: text, markdown (md) or json
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: ReportFormat,

        /// Also list blocked courses and their unmet prerequisites
        #[arg(long)]
        explain: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Check a course selection for missing prerequisites.
    ///
    /// Without CODES, checks the saved in-progress courses against completed ones.
    Check {
        /// Course codes forming the selection
        #[arg(value_name = "CODES")]
        codes: Vec<String>,

        /// Codes already satisfied outside the selection (comma separated)
        #[arg(long, value_delimiter = ',', value_name = "CODES")]
        satisfied: Vec<String>,

        /// Output format: text or json
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: ReportFormat,
    },
    /// Manage the draft plan.
    ///
    /// If no subcommand is provided, shows the plan.
    Plan {
        #[command(subcommand)]
        subcommand: Option<PlanSubcommand>,
    },
    /// Show progress through the selected major's required courses.
    Progress {
        /// Requirements JSON (defaults to config `requirements`)
        #[arg(value_name = "FILE")]
        requirements: Option<PathBuf>,
    },
    /// Manage the saved planning state.
    ///
    /// If no subcommand is provided, shows the state.
    State {
        #[command(subcommand)]
        subcommand: Option<StateSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "coursescope",
    about = "CourseScope prerequisite-aware course planner",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the course catalog file
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Override the major requirements file
    #[arg(long, value_name = "FILE")]
    pub requirements: Option<PathBuf>,

    /// Override the planning state file
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` fields leave the loaded configuration untouched.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.log_file.as_ref()),
            verbose: self.config_verbose,
            catalog: path_string(self.catalog.as_ref()),
            requirements: path_string(self.requirements.as_ref()),
            state: path_string(self.state.as_ref()),
        }
    }
}

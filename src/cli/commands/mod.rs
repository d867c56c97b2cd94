//! CLI command handlers for `CourseScope`.
//!
//! Each subcommand lives in its own submodule. Handlers return `Err(message)`
//! for failures the entry point should report and exit on.

pub mod check;
pub mod config;
pub mod eligible;
pub mod plan;
pub mod progress;
pub mod state;

use course_scope::config::Config;
use course_scope::models::{Catalog, UserState};
use course_scope::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;

/// Load the catalog named by the config
pub fn load_catalog(config: &Config) -> Result<Catalog, String> {
    if config.data.catalog.is_empty() {
        return Err("No catalog configured; set one with `config set catalog <FILE>`".to_string());
    }
    let catalog = Catalog::load(&config.data.catalog).map_err(|e| e.to_string())?;
    info!("Loaded {} courses from {}", catalog.len(), config.data.catalog);

    for (course, prereq) in catalog.missing_references() {
        warn!("{course} lists prerequisite {prereq}, which is not in the catalog");
    }
    Ok(catalog)
}

/// Path of the state file named by the config
pub fn state_path(config: &Config) -> Result<PathBuf, String> {
    if config.data.state.is_empty() {
        return Err("No state file configured; set one with `config set state <FILE>`".to_string());
    }
    Ok(PathBuf::from(&config.data.state))
}

/// Load the saved state, or an empty one on first run
pub fn load_state(config: &Config) -> Result<UserState, String> {
    UserState::load_or_default(state_path(config)?).map_err(|e| e.to_string())
}

/// Persist the state to the configured file
pub fn save_state(config: &Config, state: &mut UserState) -> Result<(), String> {
    let path = state_path(config)?;
    state.save(&path).map_err(|e| e.to_string())?;
    info!("State saved to {}", path.display());
    Ok(())
}

/// Ask a yes/no question on stdin
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Trim codes and drop empty ones
pub fn clean_codes<I: IntoIterator<Item = String>>(codes: I) -> Vec<String> {
    codes
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

//! Config command handler

use super::confirm;
use crate::args::ConfigSubcommand;
use course_scope::config::Config;
use course_scope::{info, warn};
use std::path::Path;

/// Dispatch config subcommands
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => show(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===\n");
    print!("{config}");
    println!("\nConfig file: {}", Config::get_config_file_path().display());
}

/// Print one value, or every value of a section such as `data`
fn show(config: &Config, key: &str) -> Result<(), String> {
    if let Some(value) = config.get(key) {
        println!("{value}");
        return Ok(());
    }

    let entries = config.section(key).ok_or_else(|| unknown_key(key))?;
    println!("[{key}]");
    for (name, value) in entries {
        println!("  {name} = {value}");
    }
    Ok(())
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key or section: '{key}'\nKnown keys:\n{}",
        Config::known_keys()
    )
}

/// Errors for unknown keys list the valid ones
fn key_error(key: &str, e: String) -> String {
    if Config::section_of(key).is_none() {
        unknown_key(key)
    } else {
        e
    }
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value).map_err(|e| key_error(key, e))?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;

    // Paths are stored expanded
    let stored = config.get(key).unwrap_or_default();
    if Config::section_of(key) == Some("data") && !stored.is_empty() && !Path::new(&stored).exists()
    {
        warn!("{key} points at {stored}, which does not exist yet");
    }
    info!("Config {key} set to {stored}");
    println!("✓ Set {key} = {stored}");
    Ok(())
}

fn unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults).map_err(|e| key_error(key, e))?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;

    println!(
        "✓ Reset {key} to default ({})",
        config.get(key).unwrap_or_default()
    );
    Ok(())
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    if confirm("Are you sure you want to reset config to defaults?") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

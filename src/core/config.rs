//! Configuration module for `CourseScope`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$COURSE_SCOPE";

/// Config sections in file order, with the keys each one holds
pub const SECTIONS: [(&str, &[&str]); 3] = [
    ("logging", &["level", "file", "verbose"]),
    ("data", &["catalog", "requirements", "state"]),
    ("planning", &["enforce_prerequisites"]),
];

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Data file locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Course catalog JSON
    #[serde(default)]
    pub catalog: String,
    /// Major requirements JSON
    #[serde(default)]
    pub requirements: String,
    /// Persisted user state JSON
    #[serde(default)]
    pub state: String,
}

/// Planning behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Hide onboarding candidates whose prerequisites are unmet
    #[serde(default = "enabled")]
    pub enforce_prerequisites: bool,
}

const fn enabled() -> bool {
    true
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            enforce_prerequisites: true,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Data file settings
    #[serde(default)]
    pub data: DataConfig,
    /// Planning settings
    #[serde(default)]
    pub planning: PlanningConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override catalog path
    pub catalog: Option<String>,
    /// Override requirements path
    pub requirements: Option<String>,
    /// Override state path
    pub state: Option<String>,
}

impl Config {
    /// Get the `$COURSE_SCOPE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/coursescope`
    /// - macOS: `~/Library/Application Support/coursescope`
    /// - Windows: `%APPDATA%\coursescope`
    #[must_use]
    pub fn get_coursescope_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coursescope")
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds.
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_coursescope_dir().join(CONFIG_FILE_NAME)
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and set in `defaults` are filled,
    /// so upgrading picks up new settings without touching user edits.
    ///
    /// # Returns
    ///
    /// `true` if any fields were filled
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let pairs = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.data.catalog, &defaults.data.catalog),
            (&mut self.data.requirements, &defaults.data.requirements),
            (&mut self.data.state, &defaults.data.state),
        ];

        let mut changed = false;
        for (field, default) in pairs {
            if field.is_empty() && !default.is_empty() {
                field.clone_from(default);
                changed = true;
            }
        }
        changed
    }

    /// Apply CLI-provided overrides for this run only
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(catalog) = &overrides.catalog {
            self.data.catalog = Self::expand_variables(catalog);
        }
        if let Some(requirements) = &overrides.requirements {
            self.data.requirements = Self::expand_variables(requirements);
        }
        if let Some(state) = &overrides.state {
            self.data.state = Self::expand_variables(state);
        }
    }

    /// Expand `$COURSE_SCOPE` to the config directory
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let expanded = Config::expand_variables("$COURSE_SCOPE/state.json");
    /// // "/home/user/.config/coursescope/state.json"
    /// ```
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_coursescope_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults; path values have
    /// `$COURSE_SCOPE` expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.data.catalog = Self::expand_variables(&config.data.catalog);
        config.data.requirements = Self::expand_variables(&config.data.requirements);
        config.data.state = Self::expand_variables(&config.data.state);

        Ok(config)
    }

    /// Load configuration from the compiled-in defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds use
    /// `DefaultCLIConfigRelease.toml`.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_default()
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `path`, creating it from defaults on first run
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !path.exists() {
            let _ = defaults.save_to(path);
            return defaults;
        }

        match fs::read_to_string(path).map(|content| Self::from_toml(&content)) {
            Ok(Ok(mut config)) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(path);
                }
                config
            }
            _ => defaults,
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to `path` as TOML
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Drop a `section.` prefix when the section really holds the key
    fn bare_key(key: &str) -> &str {
        if let Some((section, name)) = key.split_once('.') {
            let name_key = name.replace('-', "_");
            let listed = SECTIONS
                .iter()
                .any(|(s, keys)| *s == section && keys.contains(&name_key.as_str()));
            if listed {
                return name;
            }
        }
        key
    }

    /// Section holding `key`, which may be bare (`catalog`) or qualified (`data.catalog`)
    #[must_use]
    pub fn section_of(key: &str) -> Option<&'static str> {
        let name = Self::bare_key(key).replace('-', "_");
        SECTIONS
            .iter()
            .find(|(_, keys)| keys.contains(&name.as_str()))
            .map(|(section, _)| *section)
    }

    /// Key/value pairs of one section, or `None` for an unknown section
    #[must_use]
    pub fn section(&self, name: &str) -> Option<Vec<(&'static str, String)>> {
        let (_, keys) = SECTIONS.iter().find(|(section, _)| *section == name)?;
        Some(
            keys.iter()
                .filter_map(|key| self.get(key).map(|value| (*key, value)))
                .collect(),
        )
    }

    /// Every supported key, one line per section
    #[must_use]
    pub fn known_keys() -> String {
        SECTIONS
            .iter()
            .map(|(section, keys)| format!("  [{section}] {}", keys.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get a configuration value by key
    ///
    /// Keys are listed in [`SECTIONS`] and may carry their section prefix,
    /// as in `data.catalog`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match Self::bare_key(key) {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "catalog" => Some(self.data.catalog.clone()),
            "requirements" => Some(self.data.requirements.clone()),
            "state" => Some(self.data.state.clone()),
            "enforce_prerequisites" | "enforce-prerequisites" => {
                Some(self.planning.enforce_prerequisites.to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Call [`save()`](Config::save) to persist the change.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or a boolean value does not parse
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match Self::bare_key(key) {
            "level" => {
                value
                    .parse::<crate::logger::Level>()
                    .map_err(|_| format!("Invalid log level: '{value}'"))?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "catalog" => self.data.catalog = Self::expand_variables(value),
            "requirements" => self.data.requirements = Self::expand_variables(value),
            "state" => self.data.state = Self::expand_variables(value),
            "enforce_prerequisites" | "enforce-prerequisites" => {
                self.planning.enforce_prerequisites = parse_bool(key, value)?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single key to its value in `defaults`
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match Self::bare_key(key) {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "catalog" => self.data.catalog.clone_from(&defaults.data.catalog),
            "requirements" => self
                .data
                .requirements
                .clone_from(&defaults.data.requirements),
            "state" => self.data.state.clone_from(&defaults.data.state),
            "enforce_prerequisites" | "enforce-prerequisites" => {
                self.planning.enforce_prerequisites = defaults.planning.enforce_prerequisites;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the user config file so the next load recreates it
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[data]")?;
        writeln!(f, "  catalog = \"{}\"", self.data.catalog)?;
        writeln!(f, "  requirements = \"{}\"", self.data.requirements)?;
        writeln!(f, "  state = \"{}\"", self.data.state)?;

        writeln!(f, "\n[planning]")?;
        writeln!(
            f,
            "  enforce_prerequisites = {}",
            self.planning.enforce_prerequisites
        )?;

        Ok(())
    }
}

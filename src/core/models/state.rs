//! Persisted user planning state
//!
//! Mirrors the row kept per user by the hosted store: selected major plus the
//! completed, in-progress and planned course codes. The CLI keeps it in a local
//! JSON file.

use super::Plan;
use crate::eligibility::CodeSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing the state file
#[derive(Debug, Error)]
pub enum StateError {
    /// Reading or writing the file failed
    #[error("State file {path}: {source}")]
    Io {
        /// State file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The file is not a valid state document
    #[error("Malformed state file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A selectable major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
    /// Provider identifier
    pub id: u32,
    /// Major name (e.g., "Computer Science")
    pub name: String,
    /// Concentration, when the major has several
    #[serde(default)]
    pub concentration: Option<String>,
}

impl std::fmt::Display for Major {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.concentration {
            Some(c) if !c.is_empty() => write!(f, "{} ({c})", self.name),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Everything the evaluator's callers keep between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    /// Major chosen during onboarding
    #[serde(default)]
    pub selected_major: Option<Major>,
    /// Finished coursework
    #[serde(default)]
    pub completed_courses: Vec<String>,
    /// Coursework underway
    #[serde(default)]
    pub in_progress_courses: Vec<String>,
    /// Courses staged in the draft plan, in the order they were added
    #[serde(default)]
    pub planned_courses: Plan,
    /// User opted out of guided planning
    #[serde(default)]
    pub skipped_planning: bool,
    /// Last successful save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserState {
    /// Load state from a JSON file
    ///
    /// # Returns
    /// `Ok(None)` when the file does not exist yet (first run)
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>, StateError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Load state, starting fresh when no file exists
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, StateError> {
        Ok(Self::load(path)?.unwrap_or_default())
    }

    /// Write state to a JSON file, stamping `updated_at`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file written
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), StateError> {
        let path = path.as_ref();
        let io_err = |source| StateError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        self.updated_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)
    }

    /// Completed codes as a set
    #[must_use]
    pub fn completed(&self) -> CodeSet {
        self.completed_courses.iter().cloned().collect()
    }

    /// In-progress codes as a set
    #[must_use]
    pub fn in_progress(&self) -> CodeSet {
        self.in_progress_courses.iter().cloned().collect()
    }

    /// Planned codes as a set
    #[must_use]
    pub fn planned(&self) -> CodeSet {
        self.planned_courses.codes()
    }

    /// Replace the completed set (stored sorted)
    pub fn set_completed<I: IntoIterator<Item = String>>(&mut self, codes: I) {
        self.completed_courses = sorted_unique(codes);
    }

    /// Replace the in-progress set (stored sorted)
    pub fn set_in_progress<I: IntoIterator<Item = String>>(&mut self, codes: I) {
        self.in_progress_courses = sorted_unique(codes);
    }

    /// Choose a major, clearing everything that depended on the previous one
    pub fn select_major(&mut self, major: Major) {
        self.completed_courses.clear();
        self.in_progress_courses.clear();
        self.planned_courses = Plan::new();
        self.skipped_planning = false;
        self.selected_major = Some(major);
    }

    /// Skip guided planning: empty sets and browse the whole catalog
    pub fn skip_planning(&mut self) {
        self.completed_courses.clear();
        self.in_progress_courses.clear();
        self.skipped_planning = true;
    }
}

fn sorted_unique<I: IntoIterator<Item = String>>(codes: I) -> Vec<String> {
    let mut codes: Vec<String> = codes.into_iter().collect();
    codes.sort();
    codes.dedup();
    codes
}

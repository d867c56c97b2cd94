//! Course catalog loaded once per session from the course-data provider

use super::Course;
use crate::warn;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The payload is not a JSON array of course records
    #[error("Malformed catalog payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered course catalog with lookup by course code
///
/// Order is the provider's order and is preserved by every consumer.
/// Codes are unique: on duplicates the first record wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, defaulting missing fields and dropping duplicate codes
    ///
    /// # Arguments
    /// * `courses` - Course records in provider order
    #[must_use]
    pub fn new(courses: Vec<Course>) -> Self {
        let mut catalog = Self {
            courses: Vec::with_capacity(courses.len()),
            index: HashMap::with_capacity(courses.len()),
        };

        for mut course in courses {
            course.code = course.code.trim().to_string();
            if course.code.is_empty() {
                warn!("Skipping catalog record without a course code");
                continue;
            }
            if catalog.index.contains_key(&course.code) {
                warn!("Duplicate catalog entry for {}; keeping the first", course.code);
                continue;
            }
            for code in course.prerequisite_groups.iter_mut().flatten() {
                *code = code.trim().to_string();
            }
            if course.id.is_empty() {
                course.id = Course::slug(&course.code);
            }
            if course.difficulty.is_none() {
                course.difficulty = Some(course.difficulty());
            }

            catalog.index.insert(course.code.clone(), catalog.courses.len());
            catalog.courses.push(course);
        }

        catalog
    }

    /// Parse a catalog from the provider's JSON array payload
    ///
    /// # Errors
    /// Returns [`CatalogError::Json`] if the payload is not an array of course records
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let courses: Vec<Course> = serde_json::from_str(json)?;
        Ok(Self::new(courses))
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Look up a course by code
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&idx| &self.courses[idx])
    }

    /// Whether a course with this code exists
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// All courses in catalog order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Iterate courses in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Prerequisite codes that name no catalog course
    ///
    /// Such codes can never be satisfied, which leaves the referencing course
    /// permanently ineligible. Reported for diagnostics only.
    ///
    /// # Returns
    /// `(course code, missing prerequisite code)` pairs in catalog order
    #[must_use]
    pub fn missing_references(&self) -> Vec<(String, String)> {
        self.courses
            .iter()
            .flat_map(|course| {
                course
                    .prerequisite_groups
                    .iter()
                    .flatten()
                    .filter(|code| !self.contains(code))
                    .map(|code| (course.code.clone(), code.clone()))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<T: IntoIterator<Item = Course>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

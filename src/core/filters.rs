//! Catalog browsing filters: search text plus level, difficulty and credit facets

use crate::models::{Course, Difficulty};
use std::collections::BTreeSet;

/// Active catalog filters; an empty facet matches every course
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Free-text search over code, title and description
    pub search: String,
    /// Accepted course levels (100, 200, ...)
    pub levels: BTreeSet<u32>,
    /// Accepted difficulties
    pub difficulties: BTreeSet<Difficulty>,
    /// Accepted credit hours
    pub credits: BTreeSet<u32>,
}

/// Lowercase and strip all whitespace, so "cs141" finds "CS 141"
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}

impl CatalogFilter {
    /// Create a filter that matches everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Toggle a level facet value
    pub fn toggle_level(&mut self, level: u32) {
        toggle(&mut self.levels, level);
    }

    /// Toggle a difficulty facet value
    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        toggle(&mut self.difficulties, difficulty);
    }

    /// Toggle a credit facet value
    pub fn toggle_credits(&mut self, credits: u32) {
        toggle(&mut self.credits, credits);
    }

    /// Reset search and all facets
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any filter narrows the catalog
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.levels.is_empty()
            || !self.difficulties.is_empty()
            || !self.credits.is_empty()
    }

    fn search_hit(&self, needle: &str, course: &Course) -> bool {
        needle.is_empty()
            || [&course.code, &course.title, &course.description]
                .iter()
                .any(|field| normalize(field).contains(needle))
    }

    /// Whether a course passes every active filter
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        self.matches_normalized(&normalize(&self.search), course)
    }

    fn matches_normalized(&self, needle: &str, course: &Course) -> bool {
        let level_hit = self.levels.is_empty() || self.levels.contains(&course.level);
        let difficulty_hit =
            self.difficulties.is_empty() || self.difficulties.contains(&course.difficulty());
        let credits_hit = self.credits.is_empty()
            || course.credit_options().any(|c| self.credits.contains(&c));

        level_hit && difficulty_hit && credits_hit && self.search_hit(needle, course)
    }

    /// Courses passing the filter, in catalog order
    #[must_use]
    pub fn apply(&self, catalog: &[Course]) -> Vec<Course> {
        let needle = normalize(&self.search);
        catalog
            .iter()
            .filter(|course| self.matches_normalized(&needle, course))
            .cloned()
            .collect()
    }
}

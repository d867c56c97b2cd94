//! Course model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One prerequisite group: satisfying any listed course code satisfies the group
pub type PrerequisiteGroup = Vec<String>;

/// Credit value used when the catalog does not state one
pub const DEFAULT_CREDITS: u32 = 3;

/// Expected workload of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    /// Higher historic A/B rates, lighter expected workload
    Light,
    /// Balanced grade trends, steady weekly effort
    Moderate,
    /// Lower A-rate and/or heavier weekly workload
    Challenging,
}

impl Difficulty {
    /// Estimate difficulty from the course level when no grade data exists
    #[must_use]
    pub const fn estimate_from_level(level: u32) -> Self {
        if level <= 200 {
            Self::Light
        } else if level <= 300 {
            Self::Moderate
        } else {
            Self::Challenging
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "challenging" => Ok(Self::Challenging),
            _ => Err(format!("Unknown difficulty: '{s}'")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "Light"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Challenging => write!(f, "Challenging"),
        }
    }
}

/// A catalog course as served by the course-data provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course code, unique within a catalog (e.g., "CS 141")
    pub code: String,

    /// URL-friendly identifier (e.g., "cs141"); filled from `code` when absent
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Course title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Catalog description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Course level (100, 200, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: u32,

    /// Undergraduate credit hours; the provider may send text such as "3 OR 4 hours"
    #[serde(default = "default_credits", deserialize_with = "credits_or_default")]
    pub credits: u32,

    /// Undergraduate credit hours when they differ from the headline value
    #[serde(
        default,
        deserialize_with = "optional_credits",
        skip_serializing_if = "Option::is_none"
    )]
    pub credits_undergrad: Option<u32>,

    /// Graduate credit hours
    #[serde(
        default,
        deserialize_with = "optional_credits",
        skip_serializing_if = "Option::is_none"
    )]
    pub credits_grad: Option<u32>,

    /// Workload classification; estimated from `level` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Prerequisite groups: every group must be met, any code within a group meets it
    #[serde(default, deserialize_with = "null_as_default")]
    pub prerequisite_groups: Vec<PrerequisiteGroup>,

    /// Human readable prerequisite text supplied by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites_formatted: Option<String>,
}

const fn default_credits() -> u32 {
    DEFAULT_CREDITS
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Credit hours as the provider sends them: a number or free text
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCredits {
    Hours(u32),
    Text(String),
}

impl RawCredits {
    fn hours(self) -> u32 {
        match self {
            Self::Hours(hours) => hours,
            Self::Text(text) => parse_credits(&text),
        }
    }
}

fn credits_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawCredits>::deserialize(deserializer)?
        .map_or(DEFAULT_CREDITS, RawCredits::hours))
}

fn optional_credits<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawCredits>::deserialize(deserializer)?.map(RawCredits::hours))
}

impl Course {
    /// Create a course with no prerequisites and default attributes
    ///
    /// # Arguments
    /// * `code` - Course code (e.g., "CS 141")
    /// * `title` - Course title
    #[must_use]
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: Self::slug(&code),
            code,
            title: title.into(),
            description: String::new(),
            level: 0,
            credits: DEFAULT_CREDITS,
            credits_undergrad: None,
            credits_grad: None,
            difficulty: None,
            prerequisite_groups: Vec::new(),
            prerequisites_formatted: None,
        }
    }

    /// Set the course level
    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set the headline credit hours
    #[must_use]
    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    /// Set an explicit difficulty
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a prerequisite group (any one of `codes` satisfies it)
    #[must_use]
    pub fn with_prerequisite_group<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisite_groups
            .push(codes.into_iter().map(Into::into).collect());
        self
    }

    /// Build the identifier used in URLs: lowercase, whitespace removed
    ///
    /// # Returns
    /// e.g. "cs141" for "CS 141"
    #[must_use]
    pub fn slug(code: &str) -> String {
        code.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Whether the course is gated by any prerequisite group
    #[must_use]
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisite_groups.is_empty()
    }

    /// Difficulty from the catalog, or estimated from the level
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
            .unwrap_or_else(|| Difficulty::estimate_from_level(self.level))
    }

    /// Every credit value the course is offered at (headline, undergrad, grad)
    pub fn credit_options(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::once(self.credits)
            .chain(self.credits_undergrad)
            .chain(self.credits_grad)
    }

    /// Prerequisite text for display
    ///
    /// Uses the provider's text when present, otherwise renders the groups as
    /// `A and (B or C)`. Courses without prerequisites render as `None`.
    #[must_use]
    pub fn format_prerequisites(&self) -> String {
        if let Some(text) = self
            .prerequisites_formatted
            .as_deref()
            .filter(|t| !t.trim().is_empty())
        {
            return text.to_string();
        }
        format_groups(&self.prerequisite_groups)
    }
}

/// Render prerequisite groups as `A and (B or C)`; `None` when empty
#[must_use]
pub fn format_groups(groups: &[PrerequisiteGroup]) -> String {
    let parts: Vec<String> = groups.iter().map(|g| format_group(g)).collect();
    if parts.is_empty() {
        "None".to_string()
    } else {
        parts.join(" and ")
    }
}

/// Render one group: a single code bare, several codes as `(A or B)`
#[must_use]
pub fn format_group(group: &[String]) -> String {
    match group {
        [] => "(nothing)".to_string(),
        [single] => single.clone(),
        many => format!("({})", many.join(" or ")),
    }
}

/// Extract the first run of digits from a credits string (e.g. "3 OR 4 hours")
///
/// # Returns
/// The parsed value, or 3 when the text has no digits
#[must_use]
pub fn parse_credits(text: &str) -> u32 {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(DEFAULT_CREDITS)
}

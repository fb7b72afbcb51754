use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One unit of optional enrichment work a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Summary,
    Sentiment,
    Category,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Summary, Stage::Sentiment, Stage::Category];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Summary => "summary",
            Stage::Sentiment => "sentiment",
            Stage::Category => "category",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(Stage::Summary),
            "sentiment" => Ok(Stage::Sentiment),
            "category" => Ok(Stage::Category),
            other => Err(CoreError::UnknownStage(other.to_string())),
        }
    }
}

/// A subset of {summary, sentiment, category}.
///
/// The empty set is the headline-only mode: nothing is extracted or inferred.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageSet {
    summary: bool,
    sentiment: bool,
    category: bool,
}

impl StageSet {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn all() -> Self {
        Stage::ALL.into_iter().collect()
    }

    #[must_use]
    pub fn with(mut self, stage: Stage) -> Self {
        match stage {
            Stage::Summary => self.summary = true,
            Stage::Sentiment => self.sentiment = true,
            Stage::Category => self.category = true,
        }
        self
    }

    #[must_use]
    pub fn contains(&self, stage: Stage) -> bool {
        match stage {
            Stage::Summary => self.summary,
            Stage::Sentiment => self.sentiment,
            Stage::Category => self.category,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.summary || self.sentiment || self.category)
    }

    pub fn iter(&self) -> impl Iterator<Item = Stage> + '_ {
        Stage::ALL.into_iter().filter(|s| self.contains(*s))
    }

    /// Parses a comma-separated list such as `summary,category`.
    ///
    /// Blank entries are ignored, so an empty string yields the empty set.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownStage`] for any entry that is not a stage name.
    pub fn parse_list(raw: &str) -> Result<Self, CoreError> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Stage::from_str)
            .collect()
    }
}

impl FromIterator<Stage> for StageSet {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), StageSet::with)
    }
}

impl fmt::Display for StageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Stage::as_str).collect();
        f.write_str(&names.join(","))
    }
}

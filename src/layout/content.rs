use std::path::Path;

use anyhow::Context;

use crate::foundation::core::slugify;
use crate::foundation::error::{AdrasterError, AdrasterResult};

/// A headline statistic such as `"87%"` / `"job placement"`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stat {
    /// Big number.
    pub value: String,
    /// Caption.
    pub label: String,
}

/// One step of a program timeline, e.g. `"Week 1"` / `"Python Basics"`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// Short marker.
    pub label: String,
    /// Step title.
    pub title: String,
    /// Optional one-line description.
    #[serde(default)]
    pub desc: Option<String>,
}

/// Everything a creative says. Passed by value into arrangements; every field but `name` and
/// `headline` is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreativeContent {
    /// Creative name, used for export filenames.
    pub name: String,
    /// Text logo in the header bar.
    pub logo: Option<String>,
    /// Badge pill in the header bar.
    pub badge: Option<String>,
    /// Main headline.
    pub headline: String,
    /// Second headline line in the accent color.
    pub headline_accent: Option<String>,
    /// Line under the headline.
    pub subheadline: Option<String>,
    /// Running copy.
    pub body: Option<String>,
    /// Statistic cards.
    pub stats: Vec<Stat>,
    /// Timeline steps.
    pub steps: Vec<Step>,
    /// Tool or technology tags.
    pub tags: Vec<String>,
    /// Illustration key, resolved against the assets root.
    pub image: Option<String>,
    /// Course name in the footer.
    pub course_name: Option<String>,
    /// Trust line in the footer.
    pub trust_text: Option<String>,
    /// Call-to-action label.
    pub cta: Option<String>,
}

impl CreativeContent {
    /// Parse from JSON.
    pub fn from_json_str(s: &str) -> AdrasterResult<Self> {
        let c: Self = serde_json::from_str(s).map_err(|e| AdrasterError::serde(e.to_string()))?;
        c.validate()?;
        Ok(c)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: &Path) -> AdrasterResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read content '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// A creative needs a headline and a name that yields a non-empty filename slug.
    pub fn validate(&self) -> AdrasterResult<()> {
        if self.name.trim().is_empty() {
            return Err(AdrasterError::config("content name must be non-empty"));
        }
        if slugify(&self.name).is_empty() {
            return Err(AdrasterError::config(format!(
                "content name '{}' needs at least one ASCII letter or digit for export filenames",
                self.name
            )));
        }
        if self.headline.trim().is_empty() {
            return Err(AdrasterError::config("content headline must be non-empty"));
        }
        Ok(())
    }
}

/// Treat empty or whitespace-only strings as absent.
pub(crate) fn present(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/content.rs"]
mod tests;

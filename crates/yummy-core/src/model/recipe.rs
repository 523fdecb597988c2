use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ── RecipeId ────────────────────────────────────────────────────────

/// Server-assigned recipe identifier (a Mongo ObjectId string).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecipeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RecipeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Recipe ──────────────────────────────────────────────────────────

/// One ingredient line. Order within a recipe is the order the author
/// entered; the same ingredient id may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    /// Category name or id, as the server reports it.
    pub category: String,
    /// Cooking time label, e.g. `"30 min"`.
    pub time: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub thumb: Option<String>,
    pub owner: Option<String>,
    #[serde(default)]
    pub favorite_count: usize,
    pub created_at: Option<DateTime<Utc>>,
}

// ── RecipeDraft ─────────────────────────────────────────────────────

/// Structured input for `add_recipe`, as collected by a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub time: String,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

impl RecipeDraft {
    /// Reject drafts the server would refuse: a title, a description and
    /// at least one ingredient are required, and every ingredient line
    /// must name an ingredient id.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(invalid("Please enter a title for the recipe"));
        }
        if self.description.trim().is_empty() {
            return Err(invalid("Please enter a description for the recipe"));
        }
        if self.ingredients.is_empty() {
            return Err(invalid("Please enter at least one ingredient"));
        }
        if let Some(pos) = self.ingredients.iter().position(|i| i.id.trim().is_empty()) {
            return Err(invalid(&format!("ingredient #{} has no id", pos + 1)));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> CoreError {
    CoreError::ValidationFailed {
        message: message.to_owned(),
    }
}

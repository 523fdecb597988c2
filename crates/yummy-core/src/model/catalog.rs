use serde::{Deserialize, Serialize};

/// Recipe category, used to fill a draft's `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Reference ingredient, used to fill a draft's ingredient lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientInfo {
    pub id: String,
    pub name: String,
    pub thumb: Option<String>,
}

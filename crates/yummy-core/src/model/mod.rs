// ── Domain model ──
//
// View-models reconstructed from server responses. These are the types
// slices store and persist; wire shapes live in `yummy_api::models`.

pub mod catalog;
pub mod recipe;
pub mod session;

pub use catalog::{Category, IngredientInfo};
pub use recipe::{Ingredient, Recipe, RecipeDraft, RecipeId};
pub use session::{Session, Theme, UserProfile};

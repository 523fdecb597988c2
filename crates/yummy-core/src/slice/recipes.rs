use serde::{Deserialize, Serialize};

use super::Slice;
use crate::action::{Action, Operation, Payload};
use crate::model::Recipe;
use crate::persist::PersistConfig;

/// The `recipes` subtree: the signed-in user's recipes and the recipe
/// currently open for detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipesState {
    pub own_recipes: Vec<Recipe>,
    pub selected: Option<Recipe>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Slice for RecipesState {
    const PERSIST: PersistConfig = PersistConfig::new("recipes");

    fn handles(op: Operation) -> bool {
        matches!(
            op,
            Operation::GetRecipeList
                | Operation::GetRecipeById
                | Operation::AddRecipe
                | Operation::DeleteRecipe
        )
    }

    fn reduce(&mut self, action: &Action) {
        match action {
            Action::Pending(_) => {
                self.is_loading = true;
                self.error = None;
            }
            Action::Fulfilled(Payload::OwnRecipes(recipes)) => {
                self.own_recipes.clone_from(recipes);
                self.is_loading = false;
            }
            Action::Fulfilled(Payload::RecipeDetails(recipe)) => {
                self.selected = Some(recipe.clone());
                self.is_loading = false;
            }
            // The collection is refreshed by the reload that follows a
            // successful add or delete, not patched here.
            Action::Fulfilled(Payload::RecipeAdded(_) | Payload::RecipeDeleted(_)) => {
                self.is_loading = false;
            }
            Action::Rejected { reason, .. } => {
                self.is_loading = false;
                self.error = Some(reason.clone());
            }
            Action::Fulfilled(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Ingredient, RecipeId};

    fn recipe(id: &str, title: &str) -> Recipe {
        Recipe {
            id: RecipeId::new(id),
            title: title.into(),
            description: String::new(),
            category: "Soup".into(),
            time: "30".into(),
            ingredients: vec![Ingredient {
                id: "i1".into(),
                name: None,
                measure: "1 cup".into(),
            }],
            instructions: String::new(),
            thumb: None,
            owner: None,
            favorite_count: 0,
            created_at: None,
        }
    }

    #[test]
    fn list_fulfilled_replaces_collection() {
        let mut state = RecipesState {
            own_recipes: vec![recipe("old", "Old")],
            ..RecipesState::default()
        };
        state.reduce(&Action::Pending(Operation::GetRecipeList));
        assert!(state.is_loading);
        state.reduce(&Action::Fulfilled(Payload::OwnRecipes(vec![
            recipe("a", "Borscht"),
            recipe("b", "Varenyky"),
        ])));
        assert!(!state.is_loading);
        assert_eq!(state.own_recipes.len(), 2);
        assert_eq!(state.own_recipes[0].title, "Borscht");
    }

    #[test]
    fn details_fulfilled_selects_recipe() {
        let mut state = RecipesState::default();
        state.reduce(&Action::Fulfilled(Payload::RecipeDetails(recipe("a", "Borscht"))));
        assert_eq!(state.selected.map(|r| r.id), Some(RecipeId::new("a")));
    }

    #[test]
    fn add_and_delete_leave_collection_alone() {
        let mut state = RecipesState {
            own_recipes: vec![recipe("a", "Borscht")],
            ..RecipesState::default()
        };
        state.reduce(&Action::Pending(Operation::AddRecipe));
        state.reduce(&Action::Fulfilled(Payload::RecipeAdded(recipe("b", "Kvass"))));
        state.reduce(&Action::Fulfilled(Payload::RecipeDeleted(RecipeId::new("a"))));
        assert_eq!(state.own_recipes, vec![recipe("a", "Borscht")]);
        assert!(!state.is_loading);
    }

    #[test]
    fn rejection_records_reason() {
        let mut state = RecipesState::default();
        state.reduce(&Action::Pending(Operation::GetRecipeById));
        state.reduce(&Action::Rejected {
            op: Operation::GetRecipeById,
            reason: "Recipe not found".into(),
        });
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Recipe not found"));
    }
}

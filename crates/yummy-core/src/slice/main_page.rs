use serde::{Deserialize, Serialize};

use super::Slice;
use crate::action::{Action, Operation, Payload};
use crate::model::Recipe;
use crate::persist::PersistConfig;

/// The `mainPage` subtree: popular recipes for the landing view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainPageState {
    pub popular_recipes: Vec<Recipe>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Slice for MainPageState {
    const PERSIST: PersistConfig = PersistConfig::new("mainPage");

    fn handles(op: Operation) -> bool {
        op == Operation::GetPopularRecipes
    }

    fn reduce(&mut self, action: &Action) {
        match action {
            Action::Pending(_) => {
                self.is_loading = true;
                self.error = None;
            }
            Action::Fulfilled(Payload::PopularRecipes(recipes)) => {
                self.popular_recipes.clone_from(recipes);
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
    use super::*;

    #[test]
    fn popular_rejected_keeps_previous_list() {
        let mut state = MainPageState::default();
        state.reduce(&Action::Fulfilled(Payload::PopularRecipes(Vec::new())));
        state.reduce(&Action::Pending(Operation::GetPopularRecipes));
        state.reduce(&Action::Rejected {
            op: Operation::GetPopularRecipes,
            reason: "offline".into(),
        });
        assert!(state.popular_recipes.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("offline"));
    }

    #[test]
    fn only_popular_is_handled() {
        assert!(MainPageState::handles(Operation::GetPopularRecipes));
        assert!(!MainPageState::handles(Operation::GetRecipeList));
    }
}

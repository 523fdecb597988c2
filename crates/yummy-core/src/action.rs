// ── Dispatched actions ──
//
// Every executor emits `Pending(op)` before its network call and exactly
// one of `Fulfilled(payload)` / `Rejected { op, reason }` after it. Slices
// match on these to update their subtree.

use strum::{Display, EnumIter, IntoStaticStr};

use crate::model::{Recipe, RecipeId, Session, Theme, UserProfile};

/// Remote operations whose outcomes are dispatched to the store.
///
/// The `Display` form is the action type string, namespaced by the slice
/// that owns the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
pub enum Operation {
    #[strum(serialize = "auth/register")]
    Register,
    #[strum(serialize = "auth/login")]
    Login,
    #[strum(serialize = "auth/logout")]
    Logout,
    #[strum(serialize = "auth/refresh")]
    FetchCurrentUser,
    #[strum(serialize = "auth/toggleTheme")]
    ToggleTheme,
    #[strum(serialize = "auth/updateUserInfo")]
    UpdateUserInfo,
    #[strum(serialize = "recipes/addRecipe")]
    AddRecipe,
    #[strum(serialize = "recipes/deleteRecipe")]
    DeleteRecipe,
    #[strum(serialize = "recipes/ownRecipes")]
    GetRecipeList,
    #[strum(serialize = "recipes/getRecipeById")]
    GetRecipeById,
    #[strum(serialize = "mainPage/popular")]
    GetPopularRecipes,
}

/// Successful result of an operation, as seen by reducers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Registered(Session),
    LoggedIn(Session),
    LoggedOut,
    CurrentUser(UserProfile),
    ThemeChanged(Theme),
    UserUpdated(UserProfile),
    RecipeAdded(Recipe),
    RecipeDeleted(RecipeId),
    OwnRecipes(Vec<Recipe>),
    RecipeDetails(Recipe),
    PopularRecipes(Vec<Recipe>),
}

impl Payload {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Registered(_) => Operation::Register,
            Self::LoggedIn(_) => Operation::Login,
            Self::LoggedOut => Operation::Logout,
            Self::CurrentUser(_) => Operation::FetchCurrentUser,
            Self::ThemeChanged(_) => Operation::ToggleTheme,
            Self::UserUpdated(_) => Operation::UpdateUserInfo,
            Self::RecipeAdded(_) => Operation::AddRecipe,
            Self::RecipeDeleted(_) => Operation::DeleteRecipe,
            Self::OwnRecipes(_) => Operation::GetRecipeList,
            Self::RecipeDetails(_) => Operation::GetRecipeById,
            Self::PopularRecipes(_) => Operation::GetPopularRecipes,
        }
    }
}

/// An outcome event delivered to every interested slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Pending(Operation),
    Fulfilled(Payload),
    Rejected { op: Operation, reason: String },
}

impl Action {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Pending(op) | Self::Rejected { op, .. } => *op,
            Self::Fulfilled(payload) => payload.operation(),
        }
    }

    /// Action type string, e.g. `auth/login/fulfilled`.
    pub fn type_name(&self) -> String {
        let phase = match self {
            Self::Pending(_) => "pending",
            Self::Fulfilled(_) => "fulfilled",
            Self::Rejected { .. } => "rejected",
        };
        format!("{}/{phase}", self.operation())
    }
}

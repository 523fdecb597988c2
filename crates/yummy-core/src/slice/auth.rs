use serde::{Deserialize, Serialize};

use yummy_api::AuthToken;

use super::Slice;
use crate::action::{Action, Operation, Payload};
use crate::model::{Session, UserProfile};
use crate::persist::PersistConfig;

/// The `auth` subtree: the session plus request status flags.
///
/// Only `token` is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub token: Option<AuthToken>,
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
    /// `fetch_current_user` is in flight.
    pub is_refreshing: bool,
    /// register / login / profile update is in flight.
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn session(&self) -> Session {
        Session {
            token: self.token.clone(),
            is_authenticated: self.is_authenticated,
            user: self.user.clone(),
        }
    }

    fn sign_in(&mut self, session: &Session) {
        self.token.clone_from(&session.token);
        self.is_authenticated = session.is_authenticated;
        self.user.clone_from(&session.user);
        self.is_loading = false;
        self.error = None;
    }

    fn sign_out(&mut self) {
        self.token = None;
        self.is_authenticated = false;
        self.user = None;
        self.is_loading = false;
    }
}

impl Slice for AuthState {
    const PERSIST: PersistConfig = PersistConfig::new("auth").with_whitelist(&["token"]);

    fn handles(op: Operation) -> bool {
        matches!(
            op,
            Operation::Register
                | Operation::Login
                | Operation::Logout
                | Operation::FetchCurrentUser
                | Operation::ToggleTheme
                | Operation::UpdateUserInfo
        )
    }

    #[allow(clippy::match_same_arms)]
    fn reduce(&mut self, action: &Action) {
        match action {
            // ── Pending ──────────────────────────────────────────────
            Action::Pending(Operation::Register | Operation::Login | Operation::UpdateUserInfo) => {
                self.is_loading = true;
                self.error = None;
            }
            Action::Pending(Operation::FetchCurrentUser) => self.is_refreshing = true,
            Action::Pending(Operation::Logout | Operation::ToggleTheme) => {}

            // ── Fulfilled ────────────────────────────────────────────
            Action::Fulfilled(Payload::Registered(session) | Payload::LoggedIn(session)) => {
                self.sign_in(session);
            }
            Action::Fulfilled(Payload::LoggedOut) => {
                self.sign_out();
                self.error = None;
            }
            Action::Fulfilled(Payload::CurrentUser(user)) => {
                self.user = Some(user.clone());
                self.is_authenticated = true;
                self.is_refreshing = false;
            }
            Action::Fulfilled(Payload::ThemeChanged(theme)) => {
                if let Some(user) = self.user.as_mut() {
                    user.theme = *theme;
                }
            }
            Action::Fulfilled(Payload::UserUpdated(user)) => {
                self.user = Some(user.clone());
                self.is_loading = false;
            }

            // ── Rejected ─────────────────────────────────────────────
            // A failed registration leaves the session untouched and records
            // no error; the caller still receives the rejected outcome.
            Action::Rejected {
                op: Operation::Register,
                ..
            } => self.is_loading = false,
            Action::Rejected {
                op: Operation::Login | Operation::UpdateUserInfo,
                reason,
            } => {
                self.is_loading = false;
                self.error = Some(reason.clone());
            }
            // The local session is dropped even if the server call failed.
            Action::Rejected {
                op: Operation::Logout,
                reason,
            } => {
                self.sign_out();
                self.error = Some(reason.clone());
            }
            // An unreachable or refusing server keeps the persisted token so
            // the next start can retry.
            Action::Rejected {
                op: Operation::FetchCurrentUser,
                ..
            } => self.is_refreshing = false,
            Action::Rejected {
                op: Operation::ToggleTheme,
                reason,
            } => self.error = Some(reason.clone()),

            // ── Recipe operations ────────────────────────────────────
            Action::Pending(
                Operation::AddRecipe
                | Operation::DeleteRecipe
                | Operation::GetRecipeList
                | Operation::GetRecipeById
                | Operation::GetPopularRecipes,
            )
            | Action::Fulfilled(
                Payload::RecipeAdded(_)
                | Payload::RecipeDeleted(_)
                | Payload::OwnRecipes(_)
                | Payload::RecipeDetails(_)
                | Payload::PopularRecipes(_),
            )
            | Action::Rejected {
                op:
                    Operation::AddRecipe
                    | Operation::DeleteRecipe
                    | Operation::GetRecipeList
                    | Operation::GetRecipeById
                    | Operation::GetPopularRecipes,
                ..
            } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Theme;

    fn olena() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "Olena".into(),
            email: "olena@example.com".into(),
            avatar_url: None,
            theme: Theme::Light,
        }
    }

    fn signed_in() -> AuthState {
        let mut state = AuthState::default();
        state.reduce(&Action::Fulfilled(Payload::LoggedIn(Session::authenticated(
            AuthToken::new("abc"),
            olena(),
        ))));
        state
    }

    fn rejected(op: Operation) -> Action {
        Action::Rejected {
            op,
            reason: "boom".into(),
        }
    }

    #[test]
    fn login_fulfilled_authenticates() {
        let state = signed_in();
        assert!(state.is_authenticated);
        assert_eq!(state.token, Some(AuthToken::new("abc")));
        assert_eq!(state.user, Some(olena()));
        assert!(!state.is_loading);
    }

    #[test]
    fn login_rejected_records_error() {
        let mut state = AuthState::default();
        state.reduce(&Action::Pending(Operation::Login));
        assert!(state.is_loading);
        state.reduce(&rejected(Operation::Login));
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.is_authenticated);
    }

    #[test]
    fn register_rejected_changes_nothing_but_loading() {
        let mut state = AuthState::default();
        state.reduce(&Action::Pending(Operation::Register));
        state.reduce(&rejected(Operation::Register));
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn logout_clears_session_on_success_and_failure() {
        let mut ok = signed_in();
        ok.reduce(&Action::Fulfilled(Payload::LoggedOut));
        assert_eq!(ok.token, None);
        assert!(!ok.is_authenticated);

        let mut failed = signed_in();
        failed.reduce(&rejected(Operation::Logout));
        assert_eq!(failed.token, None);
        assert_eq!(failed.user, None);
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }

    #[test]
    fn refresh_rejected_keeps_token() {
        let mut state = AuthState {
            token: Some(AuthToken::new("abc")),
            ..AuthState::default()
        };
        state.reduce(&Action::Pending(Operation::FetchCurrentUser));
        assert!(state.is_refreshing);
        state.reduce(&rejected(Operation::FetchCurrentUser));
        assert!(!state.is_refreshing);
        assert_eq!(state.token, Some(AuthToken::new("abc")));
    }

    #[test]
    fn refresh_fulfilled_restores_user() {
        let mut state = AuthState {
            token: Some(AuthToken::new("abc")),
            ..AuthState::default()
        };
        state.reduce(&Action::Pending(Operation::FetchCurrentUser));
        state.reduce(&Action::Fulfilled(Payload::CurrentUser(olena())));
        assert!(state.is_authenticated);
        assert_eq!(state.user, Some(olena()));
        assert!(!state.is_refreshing);
    }

    #[test]
    fn theme_change_updates_user() {
        let mut state = signed_in();
        state.reduce(&Action::Fulfilled(Payload::ThemeChanged(Theme::Dark)));
        assert_eq!(state.user.map(|u| u.theme), Some(Theme::Dark));
    }

    #[test]
    fn theme_rejected_surfaces_reason() {
        let mut state = signed_in();
        state.reduce(&rejected(Operation::ToggleTheme));
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(state.is_authenticated);
    }

    #[test]
    fn recipe_actions_leave_session_untouched() {
        let mut state = signed_in();
        let before = state.clone();
        state.reduce(&Action::Pending(Operation::AddRecipe));
        state.reduce(&Action::Fulfilled(Payload::OwnRecipes(Vec::new())));
        state.reduce(&rejected(Operation::GetPopularRecipes));
        assert_eq!(state, before);
    }

    #[test]
    fn interest_set_excludes_recipe_operations() {
        assert!(AuthState::handles(Operation::Login));
        assert!(!AuthState::handles(Operation::AddRecipe));
        assert!(!AuthState::handles(Operation::GetPopularRecipes));
    }
}

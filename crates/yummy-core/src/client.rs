// ── Client: async action executors ──
//
// Each executor dispatches `Pending` before its single HTTP call and
// exactly one of `Fulfilled` / `Rejected` after it, then returns the same
// outcome to the caller. Side effects (adapter token, full reload) are
// applied here, never in reducers.

use std::future::Future;
use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use yummy_api::models::NewRecipeRequest;
use yummy_api::transport::{TlsMode, TransportConfig};
use yummy_api::ApiClient;

use crate::action::{Action, Operation, Payload};
use crate::config::{ClientConfig, TlsVerification};
use crate::convert::{merge_created, parse_theme};
use crate::error::CoreError;
use crate::model::{
    Category, IngredientInfo, Recipe, RecipeDraft, RecipeId, Session, Theme, UserProfile,
};
use crate::persist::{FileStorage, Storage};
use crate::store::{RootState, Store};
use crate::stream::StateStream;

// ── Outcome ──────────────────────────────────────────────────────────

/// Tagged result of an executor.
#[must_use]
#[derive(Debug)]
pub enum Outcome<T> {
    Fulfilled(T),
    Rejected(CoreError),
}

impl<T> Outcome<T> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_fulfilled()
    }

    pub fn into_result(self) -> Result<T, CoreError> {
        match self {
            Self::Fulfilled(value) => Ok(value),
            Self::Rejected(err) => Err(err),
        }
    }

    pub fn rejection(&self) -> Option<&CoreError> {
        match self {
            Self::Fulfilled(_) => None,
            Self::Rejected(err) => Some(err),
        }
    }
}

impl<T> From<Result<T, CoreError>> for Outcome<T> {
    fn from(result: Result<T, CoreError>) -> Self {
        match result {
            Ok(value) => Self::Fulfilled(value),
            Err(err) => Self::Rejected(err),
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// The main entry point for front ends.
///
/// Cheaply cloneable via `Arc<ClientInner>`. Owns the HTTP adapter (and
/// with it the bearer token) and the root store.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    api: ApiClient,
    store: Store,
}

impl Client {
    /// Build a client persisting to `config.data_dir`. Does not touch the
    /// network; call [`start()`](Self::start) to restore the session.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let api = ApiClient::new(config.api_url.clone(), &transport)?;
        let storage = Arc::new(FileStorage::new(&config.data_dir));
        Ok(Self::with_parts(api, storage))
    }

    pub fn with_parts(api: ApiClient, storage: Arc<dyn Storage>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                api,
                store: Store::new(storage),
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    // ── State observation ────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<RootState> {
        self.inner.store.snapshot()
    }

    pub fn session(&self) -> Session {
        self.snapshot().auth.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().auth.is_authenticated
    }

    pub fn subscribe(&self) -> StateStream {
        self.inner.store.subscribe()
    }

    pub fn actions(&self) -> broadcast::Receiver<Arc<Action>> {
        self.inner.store.actions()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Rehydrate persisted slices, then try to restore the session from
    /// the persisted token.
    ///
    /// A `MissingCredential` rejection is the normal result when signed out.
    pub async fn start(&self) -> Outcome<UserProfile> {
        self.inner.store.rehydrate();
        self.fetch_current_user().await
    }

    /// Full reload: drop in-memory state and the adapter token, then run
    /// startup again and refetch the user's recipes if signed in.
    pub async fn reload(&self) {
        info!("reloading client state");
        self.inner.api.clear_auth_token();
        self.inner.store.reset();

        if self.start().await.is_fulfilled() {
            if let Outcome::Rejected(e) = self.get_recipe_list().await {
                warn!(error = %e, "recipe refetch after reload failed");
            }
        }
    }

    /// Remove all persisted state and sign out locally.
    pub fn purge(&self) -> Result<(), CoreError> {
        self.inner.api.clear_auth_token();
        self.inner.store.purge()?;
        Ok(())
    }

    // ── Auth executors ───────────────────────────────────────────────

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Outcome<Session> {
        let api = &self.inner.api;
        self.execute(
            Operation::Register,
            async {
                let resp = api.signup(name, email, password).await?;
                Ok(self.adopt_session(resp.into()))
            },
            |session| Payload::Registered(session.clone()),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &SecretString) -> Outcome<Session> {
        let api = &self.inner.api;
        self.execute(
            Operation::Login,
            async {
                let resp = api.login(email, password).await?;
                Ok(self.adopt_session(resp.into()))
            },
            |session| Payload::LoggedIn(session.clone()),
        )
        .await
    }

    /// Sign out. The local token is cleared whether or not the server call
    /// succeeds; a server failure is still reported as `Rejected`.
    pub async fn logout(&self) -> Outcome<()> {
        let api = &self.inner.api;
        self.execute(
            Operation::Logout,
            async {
                let result = api.logout().await;
                api.clear_auth_token();
                if let Err(e) = &result {
                    warn!(error = %e, "server logout failed; local session cleared");
                }
                result.map_err(CoreError::from)
            },
            |_| Payload::LoggedOut,
        )
        .await
    }

    /// Restore the user from the persisted token.
    pub async fn fetch_current_user(&self) -> Outcome<UserProfile> {
        let token = self.snapshot().auth.token.clone();
        let api = &self.inner.api;
        self.execute(
            Operation::FetchCurrentUser,
            async move {
                let Some(token) = token else {
                    return Err(CoreError::MissingCredential);
                };
                api.set_auth_token(token);
                api.current_user()
                    .await
                    .map(UserProfile::from)
                    .map_err(CoreError::from)
            },
            |user| Payload::CurrentUser(user.clone()),
        )
        .await
    }

    /// Switch to the opposite of the current theme.
    pub async fn toggle_theme(&self) -> Outcome<Theme> {
        let current = self
            .snapshot()
            .auth
            .user
            .as_ref()
            .map(|u| u.theme)
            .unwrap_or_default();
        self.set_theme(current.toggled()).await
    }

    pub async fn set_theme(&self, theme: Theme) -> Outcome<Theme> {
        let api = &self.inner.api;
        self.execute(
            Operation::ToggleTheme,
            async move {
                let resp = api.update_theme(&theme.to_string()).await?;
                Ok(parse_theme(Some(&resp.theme)))
            },
            |theme| Payload::ThemeChanged(*theme),
        )
        .await
    }

    pub async fn update_user_info(&self, name: &str) -> Outcome<UserProfile> {
        let api = &self.inner.api;
        self.execute(
            Operation::UpdateUserInfo,
            async {
                api.update_user(name)
                    .await
                    .map(UserProfile::from)
                    .map_err(CoreError::from)
            },
            |user| Payload::UserUpdated(user.clone()),
        )
        .await
    }

    // ── Recipe executors ─────────────────────────────────────────────

    /// Create a recipe, then reload.
    ///
    /// Drafts that fail validation are rejected without dispatching or
    /// calling the server.
    pub async fn add_recipe(&self, draft: &RecipeDraft) -> Outcome<Recipe> {
        if let Err(e) = draft.validate() {
            debug!(error = %e, "recipe draft rejected before submit");
            return Outcome::Rejected(e);
        }

        let api = &self.inner.api;
        let body = NewRecipeRequest::from(draft);
        let outcome = self
            .execute(
                Operation::AddRecipe,
                async {
                    let created = api.create_recipe(&body).await?;
                    merge_created(&body, created)
                },
                |recipe| Payload::RecipeAdded(recipe.clone()),
            )
            .await;

        if outcome.is_fulfilled() {
            self.reload().await;
        }
        outcome
    }

    /// Delete a recipe, then reload.
    pub async fn delete_recipe(&self, id: &RecipeId) -> Outcome<RecipeId> {
        let api = &self.inner.api;
        let outcome = self
            .execute(
                Operation::DeleteRecipe,
                async {
                    api.delete_recipe(id.as_str()).await?;
                    Ok(id.clone())
                },
                |id| Payload::RecipeDeleted(id.clone()),
            )
            .await;

        if outcome.is_fulfilled() {
            self.reload().await;
        }
        outcome
    }

    pub async fn get_recipe_list(&self) -> Outcome<Vec<Recipe>> {
        let api = &self.inner.api;
        self.execute(
            Operation::GetRecipeList,
            async {
                let recipes = api.own_recipes().await?;
                Ok(recipes.into_iter().map(Recipe::from).collect())
            },
            |recipes: &Vec<Recipe>| Payload::OwnRecipes(recipes.clone()),
        )
        .await
    }

    pub async fn get_recipe_by_id(&self, id: &RecipeId) -> Outcome<Recipe> {
        let api = &self.inner.api;
        self.execute(
            Operation::GetRecipeById,
            async {
                api.recipe_by_id(id.as_str())
                    .await
                    .map(Recipe::from)
                    .map_err(CoreError::from)
            },
            |recipe| Payload::RecipeDetails(recipe.clone()),
        )
        .await
    }

    pub async fn get_popular_recipes(&self) -> Outcome<Vec<Recipe>> {
        let api = &self.inner.api;
        self.execute(
            Operation::GetPopularRecipes,
            async {
                let recipes = api.popular_recipes().await?;
                Ok(recipes.into_iter().map(Recipe::from).collect())
            },
            |recipes: &Vec<Recipe>| Payload::PopularRecipes(recipes.clone()),
        )
        .await
    }

    // ── Catalog (not dispatched) ─────────────────────────────────────

    pub async fn list_categories(&self) -> Outcome<Vec<Category>> {
        self.inner
            .api
            .categories()
            .await
            .map(|list| list.into_iter().map(Category::from).collect())
            .map_err(CoreError::from)
            .into()
    }

    pub async fn list_ingredients(&self) -> Outcome<Vec<IngredientInfo>> {
        self.inner
            .api
            .ingredients()
            .await
            .map(|list| list.into_iter().map(IngredientInfo::from).collect())
            .map_err(CoreError::from)
            .into()
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Run one executor: `Pending`, the call, then `Fulfilled` or `Rejected`.
    async fn execute<T, F, P>(&self, op: Operation, call: F, payload: P) -> Outcome<T>
    where
        F: Future<Output = Result<T, CoreError>> + Send,
        P: FnOnce(&T) -> Payload + Send,
    {
        let store = &self.inner.store;
        store.dispatch(Action::Pending(op));

        match call.await {
            Ok(value) => {
                debug!(%op, "fulfilled");
                store.dispatch(Action::Fulfilled(payload(&value)));
                Outcome::Fulfilled(value)
            }
            Err(err) => {
                debug!(%op, error = %err, "rejected");
                store.dispatch(Action::Rejected {
                    op,
                    reason: err.reason(),
                });
                Outcome::Rejected(err)
            }
        }
    }

    /// Install a freshly issued session's token on the adapter.
    fn adopt_session(&self, session: Session) -> Session {
        if let Some(token) = &session.token {
            self.inner.api.set_auth_token(token.clone());
        }
        if let Some(user) = &session.user {
            info!(email = %user.email, "signed in");
        }
        session
    }
}

fn build_transport(config: &ClientConfig) -> TransportConfig {
    TransportConfig::default().with_tls(match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
    })
}

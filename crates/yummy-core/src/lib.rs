// yummy-core: executors, state slices, and persistence between yummy-api and the CLI.

pub mod action;
pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod persist;
pub mod slice;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{Action, Operation, Payload};
pub use client::{Client, Outcome};
pub use config::{ClientConfig, Credentials, TlsVerification};
pub use error::CoreError;
pub use persist::{FileStorage, MemoryStorage, PersistConfig, Storage, StorageError};
pub use slice::{AuthState, MainPageState, RecipesState, Slice};
pub use store::{RootState, Store};
pub use stream::StateStream;

pub use yummy_api::AuthToken;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Category, Ingredient, IngredientInfo, Recipe, RecipeDraft, RecipeId, Session, Theme,
    UserProfile,
};

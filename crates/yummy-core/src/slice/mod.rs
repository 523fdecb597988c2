// ── State slices ──
//
// Each slice owns a disjoint subtree of client state, declares which
// operations it reacts to, and reduces actions for those operations.

mod auth;
mod main_page;
mod recipes;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use auth::AuthState;
pub use main_page::MainPageState;
pub use recipes::RecipesState;

use crate::action::{Action, Operation};
use crate::persist::PersistConfig;

/// An independently reducible subtree of the root state.
///
/// `reduce` is only called for actions whose operation passes `handles`,
/// and must define a transition for every phase (pending, fulfilled,
/// rejected) of those operations, even when the transition is a no-op.
pub trait Slice:
    Default + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// How (and whether) this subtree is mirrored to durable storage.
    const PERSIST: PersistConfig;

    /// The slice's interest set.
    fn handles(op: Operation) -> bool;

    fn reduce(&mut self, action: &Action);
}

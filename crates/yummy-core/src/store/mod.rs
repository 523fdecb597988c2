// ── Root state container ──
//
// Composes the slices into one root state. `dispatch` is the single
// mutation entry point: it runs every interested reducer inside one
// `watch` critical section, persists slices whose projection changed,
// and broadcasts the action to observers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::persist::{self, Storage, StorageError};
use crate::slice::{AuthState, MainPageState, RecipesState, Slice};
use crate::stream::StateStream;

const ACTION_CHANNEL_CAPACITY: usize = 64;

/// Snapshot of all slices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootState {
    pub auth: AuthState,
    pub recipes: RecipesState,
    pub main_page: MainPageState,
}

impl RootState {
    /// Every slice loaded from storage (or defaulted).
    pub fn rehydrated(storage: &dyn Storage) -> Self {
        Self {
            auth: persist::rehydrate(storage),
            recipes: persist::rehydrate(storage),
            main_page: persist::rehydrate(storage),
        }
    }
}

pub struct Store {
    state: watch::Sender<Arc<RootState>>,
    actions: broadcast::Sender<Arc<Action>>,
    generation: AtomicU64,
    storage: Arc<dyn Storage>,
}

impl Store {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let (state, _) = watch::channel(Arc::new(RootState::default()));
        let (actions, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);
        Self {
            state,
            actions,
            generation: AtomicU64::new(0),
            storage,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<RootState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }

    /// Every action dispatched after this call.
    pub fn actions(&self) -> broadcast::Receiver<Arc<Action>> {
        self.actions.subscribe()
    }

    /// Number of resets since the store was created.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Apply an action to every slice that handles its operation.
    ///
    /// Observers are only notified when some slice actually changed.
    pub fn dispatch(&self, action: Action) {
        debug!(action = %action.type_name(), "dispatch");
        let storage = self.storage.as_ref();

        self.state.send_if_modified(|root| {
            let mut next = RootState::clone(root);
            let changed = apply(&mut next.auth, &action, storage)
                | apply(&mut next.recipes, &action, storage)
                | apply(&mut next.main_page, &action, storage);
            if changed {
                *root = Arc::new(next);
            }
            changed
        });

        // No subscribers is fine.
        let _ = self.actions.send(Arc::new(action));
    }

    /// Replace in-memory state with persisted state.
    pub fn rehydrate(&self) {
        let restored = RootState::rehydrated(self.storage.as_ref());
        self.state.send_replace(Arc::new(restored));
        debug!("store rehydrated");
    }

    /// Drop in-memory state back to defaults and bump the generation.
    /// Persisted state is left alone.
    pub fn reset(&self) {
        self.state.send_replace(Arc::new(RootState::default()));
        self.generation.fetch_add(1, Ordering::AcqRel);
        info!(generation = self.generation(), "store reset");
    }

    /// Delete every persisted slice and reset in-memory state.
    pub fn purge(&self) -> Result<(), StorageError> {
        for key in [
            AuthState::PERSIST.storage_key(),
            RecipesState::PERSIST.storage_key(),
            MainPageState::PERSIST.storage_key(),
        ] {
            self.storage.remove_item(&key)?;
        }
        self.reset();
        Ok(())
    }
}

/// Reduce one slice and persist it if its projection changed.
/// Returns whether the slice changed at all.
fn apply<S: Slice>(slice: &mut S, action: &Action, storage: &dyn Storage) -> bool {
    if !S::handles(action.operation()) {
        return false;
    }

    let before = slice.clone();
    slice.reduce(action);
    if *slice == before {
        return false;
    }

    let projection_changed = match (persist::project(&before), persist::project(slice)) {
        (Ok(a), Ok(b)) => a != b,
        _ => true,
    };
    if projection_changed {
        if let Err(e) = persist::save(storage, slice) {
            warn!(key = S::PERSIST.key, error = %e, "failed to persist slice");
        }
    }
    true
}

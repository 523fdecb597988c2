// ── Selective persistence ──
//
// Mirrors designated slice subtrees to durable storage as versioned JSON
// envelopes and merges them back over slice defaults at startup.

mod storage;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

use crate::slice::Slice;

/// Which part of a slice is persisted, and under which key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistConfig {
    /// Slice name; stored as `persist:<key>`.
    pub key: &'static str,
    /// Top-level fields to keep. `None` persists the whole subtree.
    pub whitelist: Option<&'static [&'static str]>,
    /// Envelopes written with another version are discarded on load.
    pub version: u32,
}

impl PersistConfig {
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            whitelist: None,
            version: 1,
        }
    }

    #[must_use]
    pub const fn with_whitelist(mut self, fields: &'static [&'static str]) -> Self {
        self.whitelist = Some(fields);
        self
    }

    pub fn storage_key(&self) -> String {
        format!("persist:{}", self.key)
    }

    fn keeps(&self, field: &str) -> bool {
        self.whitelist.is_none_or(|fields| fields.contains(&field))
    }

    /// Drop every field the whitelist does not name.
    fn filter(&self, object: Map<String, Value>) -> Map<String, Value> {
        object.into_iter().filter(|(k, _)| self.keeps(k)).collect()
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    state: Map<String, Value>,
}

/// The persisted projection of a slice.
pub(crate) fn project<S: Slice>(slice: &S) -> Result<Map<String, Value>, StorageError> {
    match serde_json::to_value(slice)? {
        Value::Object(object) => Ok(S::PERSIST.filter(object)),
        other => Err(StorageError::Shape {
            key: S::PERSIST.key,
            found: json_kind(&other),
        }),
    }
}

/// Write a slice's projection under its storage key.
pub(crate) fn save<S: Slice>(storage: &dyn Storage, slice: &S) -> Result<(), StorageError> {
    let config = S::PERSIST;
    let envelope = Envelope {
        version: config.version,
        state: project(slice)?,
    };
    storage.set_item(&config.storage_key(), &serde_json::to_string(&envelope)?)?;
    debug!(key = config.key, "persisted slice");
    Ok(())
}

/// Load a slice: persisted fields merged over `S::default()`.
///
/// Missing, unreadable, corrupt or version-mismatched entries yield the
/// default; none of them is an error.
pub(crate) fn rehydrate<S: Slice>(storage: &dyn Storage) -> S {
    let config = S::PERSIST;
    match load::<S>(storage) {
        Ok(Some(slice)) => {
            debug!(key = config.key, "rehydrated slice");
            slice
        }
        Ok(None) => S::default(),
        Err(e) => {
            warn!(key = config.key, error = %e, "discarding persisted state");
            S::default()
        }
    }
}

fn load<S: Slice>(storage: &dyn Storage) -> Result<Option<S>, StorageError> {
    let config = S::PERSIST;
    let Some(raw) = storage.get_item(&config.storage_key())? else {
        return Ok(None);
    };

    let envelope: Envelope = serde_json::from_str(&raw)?;
    if envelope.version != config.version {
        return Err(StorageError::VersionMismatch {
            key: config.key,
            stored: envelope.version,
            expected: config.version,
        });
    }

    let Value::Object(mut merged) = serde_json::to_value(S::default())? else {
        return Err(StorageError::Shape {
            key: config.key,
            found: "non-object default",
        });
    };
    merged.extend(config.filter(envelope.state));

    Ok(Some(serde_json::from_value(Value::Object(merged))?))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use yummy_api::AuthToken;

    use super::*;
    use crate::model::{Theme, UserProfile};
    use crate::slice::{AuthState, MainPageState, RecipesState};

    fn signed_in() -> AuthState {
        AuthState {
            token: Some(AuthToken::new("abc")),
            is_authenticated: true,
            user: Some(UserProfile {
                id: "u1".into(),
                name: "Olena".into(),
                email: "olena@example.com".into(),
                avatar_url: None,
                theme: Theme::Dark,
            }),
            is_refreshing: false,
            is_loading: false,
            error: Some("stale".into()),
        }
    }

    #[test]
    fn auth_projection_keeps_only_token() {
        let projection = project(&signed_in()).unwrap();
        assert_eq!(Value::Object(projection), json!({ "token": "abc" }));
    }

    #[test]
    fn auth_round_trip_restores_token_only() {
        let storage = MemoryStorage::new();
        save(&storage, &signed_in()).unwrap();

        let restored: AuthState = rehydrate(&storage);
        assert_eq!(
            restored,
            AuthState {
                token: Some(AuthToken::new("abc")),
                ..AuthState::default()
            }
        );
    }

    #[test]
    fn envelope_is_versioned_under_prefixed_key() {
        let storage = MemoryStorage::new();
        save(&storage, &MainPageState::default()).unwrap();

        let raw = storage.get_item("persist:mainPage").unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], json!(1));
        assert_eq!(value["state"]["popularRecipes"], json!([]));
    }

    #[test]
    fn missing_entry_yields_default() {
        let restored: RecipesState = rehydrate(&MemoryStorage::new());
        assert_eq!(restored, RecipesState::default());
    }

    #[test]
    fn corrupt_entry_yields_default() {
        let storage = MemoryStorage::new();
        storage.set_item("persist:auth", "{not json").unwrap();
        let restored: AuthState = rehydrate(&storage);
        assert_eq!(restored, AuthState::default());
    }

    #[test]
    fn version_mismatch_yields_default() {
        let storage = MemoryStorage::new();
        storage
            .set_item("persist:auth", r#"{"version":7,"state":{"token":"abc"}}"#)
            .unwrap();
        let restored: AuthState = rehydrate(&storage);
        assert_eq!(restored.token, None);
    }

    #[test]
    fn stray_fields_outside_whitelist_are_ignored() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                "persist:auth",
                r#"{"version":1,"state":{"token":"abc","isAuthenticated":true}}"#,
            )
            .unwrap();
        let restored: AuthState = rehydrate(&storage);
        assert_eq!(restored.token, Some(AuthToken::new("abc")));
        assert!(!restored.is_authenticated);
    }

    #[test]
    fn partial_subtree_merges_over_default() {
        let storage = MemoryStorage::new();
        storage
            .set_item("persist:recipes", r#"{"version":1,"state":{"error":"offline"}}"#)
            .unwrap();
        let restored: RecipesState = rehydrate(&storage);
        assert_eq!(restored.error.as_deref(), Some("offline"));
        assert!(restored.own_recipes.is_empty());
    }
}

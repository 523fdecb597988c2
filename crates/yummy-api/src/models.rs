// Wire types for the recipe API.
//
// These mirror the server's JSON shapes (Mongo-style `_id`, `avatarURL`,
// `thumb`, `time`). `yummy-core` converts them into domain models.

use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

// ── Credential ──────────────────────────────────────────────────────

/// Bearer token issued by `users/login` and `users/signup`.
///
/// Serializes transparently (it must round-trip through persisted state),
/// but never prints its value in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(****)")
    }
}

// ── Requests ────────────────────────────────────────────────────────

#[allow(clippy::trivially_copy_pass_by_ref)]
fn expose<S: Serializer>(secret: &&SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Body of `POST users/signup`.
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(serialize_with = "expose")]
    pub password: &'a SecretString,
}

/// Body of `POST users/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    #[serde(serialize_with = "expose")]
    pub password: &'a SecretString,
}

/// Body of `PATCH user/theme`.
#[derive(Debug, Serialize)]
pub struct ThemeRequest<'a> {
    pub theme: &'a str,
}

/// Body of `PATCH users/update`.
#[derive(Debug, Serialize)]
pub struct UpdateUserRequest<'a> {
    pub name: &'a str,
}

/// One ingredient line of a recipe, as sent and received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub measure: String,
}

/// Body of `POST recipes`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecipeRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub time: String,
    pub ingredients: Vec<IngredientEntry>,
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

// ── Responses ───────────────────────────────────────────────────────

/// A user as returned by `users/*` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "object_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "avatarURL", default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

/// Response of `users/signup` and `users/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: AuthToken,
    pub user: UserResponse,
}

/// Response of `PATCH user/theme`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeResponse {
    pub theme: String,
}

/// A recipe as returned by `recipes/*` and `ownRecipes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    #[serde(rename = "_id", alias = "id", deserialize_with = "object_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A category from `recipes/category-list`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryResponse {
    #[serde(rename = "_id", alias = "id", deserialize_with = "object_id")]
    pub id: String,
    pub name: String,
}

/// An ingredient from `ingredients/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientResponse {
    #[serde(rename = "_id", alias = "id", deserialize_with = "object_id")]
    pub id: String,
    #[serde(alias = "ttl")]
    pub name: String,
    #[serde(default)]
    pub thb: Option<String>,
}

/// Accept either a plain id string or the extended-JSON `{"$oid": "..."}` form.
fn object_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Plain(String),
        Extended {
            #[serde(rename = "$oid")]
            oid: String,
        },
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Plain(s) => s,
        Raw::Extended { oid } => oid,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("super-secret");
        assert_eq!(format!("{token:?}"), "AuthToken(****)");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"super-secret\"");
    }

    #[test]
    fn login_request_exposes_password_on_the_wire() {
        let password = SecretString::from("hunter2".to_string());
        let body = LoginRequest {
            email: "cook@example.com",
            password: &password,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["password"], "hunter2");
        assert_eq!(json["email"], "cook@example.com");
    }

    #[test]
    fn ingredient_id_accepts_extended_json() {
        let raw = r#"{"_id":{"$oid":"640c2dd963a319ea671e3746"},"ttl":"Salt","thb":"salt.png"}"#;
        let ing: IngredientResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(ing.id, "640c2dd963a319ea671e3746");
        assert_eq!(ing.name, "Salt");
    }

    #[test]
    fn response_ids_accept_both_forms() {
        let recipe: RecipeResponse =
            serde_json::from_str(r#"{"_id":{"$oid":"r-oid"},"title":"Soup"}"#).unwrap();
        assert_eq!(recipe.id, "r-oid");

        let category: CategoryResponse =
            serde_json::from_str(r#"{"_id":{"$oid":"c-oid"},"name":"Dessert"}"#).unwrap();
        assert_eq!(category.id, "c-oid");

        let user: UserResponse =
            serde_json::from_str(r#"{"_id":{"$oid":"u-oid"},"name":"Olena"}"#).unwrap();
        assert_eq!(user.id, "u-oid");

        let plain: UserResponse = serde_json::from_str(r#"{"id":"u1"}"#).unwrap();
        assert_eq!(plain.id, "u1");
    }

    #[test]
    fn recipe_response_tolerates_missing_optional_fields() {
        let raw = r#"{"_id":"r1","title":"Soup"}"#;
        let recipe: RecipeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.id, "r1");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.created_at.is_none());
    }
}

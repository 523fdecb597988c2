// ── API-to-domain type conversions ──
//
// Bridges raw `yummy_api::models` response types into `yummy_core::model`
// domain types, and domain input types into request bodies.

use serde_json::Value;

use yummy_api::models::{
    AuthResponse, CategoryResponse, IngredientEntry, IngredientResponse, NewRecipeRequest,
    RecipeResponse, UserResponse,
};

use crate::error::CoreError;
use crate::model::{
    Category, Ingredient, IngredientInfo, Recipe, RecipeDraft, RecipeId, Session, Theme,
    UserProfile,
};

// ── Session ────────────────────────────────────────────────────────

/// Unknown or missing theme strings fall back to the default theme.
pub(crate) fn parse_theme(raw: Option<&str>) -> Theme {
    raw.and_then(|s| s.parse().ok()).unwrap_or_default()
}

impl From<UserResponse> for UserProfile {
    fn from(u: UserResponse) -> Self {
        Self {
            theme: parse_theme(u.theme.as_deref()),
            id: u.id,
            name: u.name,
            email: u.email,
            avatar_url: u.avatar_url,
        }
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Session::authenticated(resp.token, resp.user.into())
    }
}

// ── Recipes ────────────────────────────────────────────────────────

impl From<IngredientEntry> for Ingredient {
    fn from(e: IngredientEntry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            measure: e.measure,
        }
    }
}

impl From<&Ingredient> for IngredientEntry {
    fn from(i: &Ingredient) -> Self {
        Self {
            id: i.id.clone(),
            name: i.name.clone(),
            measure: i.measure.clone(),
        }
    }
}

impl From<RecipeResponse> for Recipe {
    fn from(r: RecipeResponse) -> Self {
        Self {
            id: RecipeId::new(r.id),
            title: r.title,
            description: r.description,
            category: r.category,
            time: r.time,
            ingredients: r.ingredients.into_iter().map(Ingredient::from).collect(),
            instructions: r.instructions,
            thumb: r.thumb,
            owner: r.owner,
            favorite_count: r.favorites.len(),
            created_at: r.created_at,
        }
    }
}

impl From<&RecipeDraft> for NewRecipeRequest {
    fn from(d: &RecipeDraft) -> Self {
        Self {
            title: d.title.clone(),
            description: d.description.clone(),
            category: d.category.clone(),
            time: d.time.clone(),
            ingredients: d.ingredients.iter().map(IngredientEntry::from).collect(),
            instructions: d.instructions.clone(),
            thumb: d.thumb.clone(),
        }
    }
}

/// Merge the server's `POST recipes` response over the submitted body.
///
/// Fields the server returns win; everything else comes from the input.
pub(crate) fn merge_created(body: &NewRecipeRequest, created: Value) -> Result<Recipe, CoreError> {
    let mut merged = serde_json::to_value(body)
        .map_err(|e| CoreError::Internal(format!("failed to encode recipe: {e}")))?;

    match (&mut merged, created) {
        (Value::Object(base), Value::Object(assigned)) => base.extend(assigned),
        (_, other) => {
            return Err(CoreError::Internal(format!(
                "unexpected create-recipe response: {other}"
            )));
        }
    }

    let resp: RecipeResponse = serde_json::from_value(merged)
        .map_err(|e| CoreError::Internal(format!("Deserialization error: {e}")))?;
    Ok(resp.into())
}

// ── Catalog ────────────────────────────────────────────────────────

impl From<CategoryResponse> for Category {
    fn from(c: CategoryResponse) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

impl From<IngredientResponse> for IngredientInfo {
    fn from(i: IngredientResponse) -> Self {
        Self {
            id: i.id,
            name: i.name,
            thumb: i.thb,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn soup_request() -> NewRecipeRequest {
        NewRecipeRequest {
            title: "Soup".into(),
            description: "Hot".into(),
            category: "c1".into(),
            time: String::new(),
            ingredients: vec![IngredientEntry {
                id: "i1".into(),
                name: Some("Salt".into()),
                measure: "g".into(),
            }],
            instructions: "Boil".into(),
            thumb: None,
        }
    }

    #[test]
    fn created_recipe_merges_input_with_server_fields() {
        let recipe = merge_created(
            &soup_request(),
            json!({ "_id": "r-1", "owner": "u1", "createdAt": "2023-03-10T12:00:00Z" }),
        )
        .unwrap();

        assert_eq!(recipe.id, RecipeId::new("r-1"));
        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.instructions, "Boil");
        assert_eq!(recipe.owner.as_deref(), Some("u1"));
        assert_eq!(recipe.ingredients[0].name.as_deref(), Some("Salt"));
        assert!(recipe.created_at.is_some());
    }

    #[test]
    fn server_fields_override_input() {
        let recipe =
            merge_created(&soup_request(), json!({ "_id": "r-1", "title": "Soup (v2)" })).unwrap();
        assert_eq!(recipe.title, "Soup (v2)");
    }

    #[test]
    fn non_object_response_is_internal_error() {
        let err = merge_created(&soup_request(), json!("ok")).unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
    }

    #[test]
    fn unknown_theme_falls_back_to_light() {
        assert_eq!(parse_theme(Some("sepia")), Theme::Light);
        assert_eq!(parse_theme(Some("dark")), Theme::Dark);
        assert_eq!(parse_theme(None), Theme::Light);
    }
}

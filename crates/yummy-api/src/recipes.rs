// Recipe and catalog endpoints

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CategoryResponse, IngredientResponse, NewRecipeRequest, RecipeResponse};

impl ApiClient {
    /// `POST recipes`
    ///
    /// Returns the raw response object. The server may answer with only the
    /// fields it assigned (id, owner, timestamps), so callers merge it over
    /// the request body themselves.
    pub async fn create_recipe(
        &self,
        recipe: &NewRecipeRequest,
    ) -> Result<serde_json::Value, Error> {
        self.post("recipes", recipe).await
    }

    /// `DELETE recipes/{id}`
    pub async fn delete_recipe(&self, id: &str) -> Result<serde_json::Value, Error> {
        self.delete(&format!("recipes/{id}")).await
    }

    /// `GET ownRecipes`
    pub async fn own_recipes(&self) -> Result<Vec<RecipeResponse>, Error> {
        self.get("ownRecipes").await
    }

    /// `GET recipes/{id}`
    pub async fn recipe_by_id(&self, id: &str) -> Result<RecipeResponse, Error> {
        self.get(&format!("recipes/{id}")).await
    }

    /// `GET recipes/popular`
    pub async fn popular_recipes(&self) -> Result<Vec<RecipeResponse>, Error> {
        self.get("recipes/popular").await
    }

    // ── Catalog ──────────────────────────────────────────────────────

    /// `GET recipes/category-list`
    pub async fn categories(&self) -> Result<Vec<CategoryResponse>, Error> {
        self.get("recipes/category-list").await
    }

    /// `GET ingredients/list`
    pub async fn ingredients(&self) -> Result<Vec<IngredientResponse>, Error> {
        self.get("ingredients/list").await
    }
}

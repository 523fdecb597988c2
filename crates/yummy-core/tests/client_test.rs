#![allow(clippy::unwrap_used)]
// Integration tests for `Client` executors against a wiremock server.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yummy_api::ApiClient;
use yummy_core::{
    AuthToken, Client, CoreError, Ingredient, MemoryStorage, Operation, Outcome, RecipeDraft,
    RecipeId, Storage, Theme,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client, Arc<MemoryStorage>) {
    let server = MockServer::start().await;
    let api = ApiClient::from_url(&format!("{}/api", server.uri())).unwrap();
    let storage = Arc::new(MemoryStorage::new());
    let client = Client::with_parts(api, storage.clone());
    (server, client, storage)
}

fn password() -> SecretString {
    "hunter22".to_string().into()
}

fn user_json(theme: &str) -> serde_json::Value {
    json!({
        "_id": "u1",
        "name": "Olena",
        "email": "olena@example.com",
        "avatarURL": null,
        "theme": theme
    })
}

fn recipe_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "description": "Hot",
        "category": "Soup",
        "time": "40",
        "ingredients": [{ "id": "i1", "measure": "g" }],
        "instructions": "Boil",
        "thumb": null,
        "owner": "u1",
        "favorites": []
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "tok-1", "user": user_json("light") })),
        )
        .mount(server)
        .await;
}

async fn sign_in(server: &MockServer, client: &Client) {
    mount_login(server).await;
    assert!(client.login("olena@example.com", &password()).await.is_fulfilled());
}

fn soup() -> RecipeDraft {
    RecipeDraft {
        title: "Soup".into(),
        description: "Hot".into(),
        category: "c1".into(),
        ingredients: vec![Ingredient {
            id: "i1".into(),
            name: Some("Salt".into()),
            measure: "g".into(),
        }],
        instructions: "Boil".into(),
        ..RecipeDraft::default()
    }
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn login_authenticates_and_attaches_token() {
    let (server, client, _) = setup().await;
    sign_in(&server, &client).await;

    let session = client.session();
    assert!(session.is_authenticated);
    assert_eq!(session.token, Some(AuthToken::new("tok-1")));

    Mock::given(method("GET"))
        .and(path("/api/ownRecipes"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.get_recipe_list().await.is_fulfilled());
}

#[tokio::test]
async fn login_rejection_is_recorded() {
    let (server, client, _) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Email or password is wrong" })),
        )
        .mount(&server)
        .await;

    let outcome = client.login("olena@example.com", &password()).await;
    let err = outcome.into_result().unwrap_err();
    assert!(err.is_unauthorized());

    let auth = client.snapshot().auth.clone();
    assert!(!auth.is_authenticated);
    assert!(!auth.is_loading);
    assert_eq!(auth.error.as_deref(), Some("Email or password is wrong"));
    assert!(client.api().auth_token().is_none());
}

#[tokio::test]
async fn register_rejection_leaves_session_untouched() {
    let (server, client, _) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/users/signup"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "Email in use" })))
        .mount(&server)
        .await;

    let before = client.snapshot();
    let outcome = client.register("Olena", "olena@example.com", &password()).await;

    assert!(matches!(
        outcome,
        Outcome::Rejected(CoreError::ServerRejection { status: 409, .. })
    ));
    assert_eq!(*client.snapshot(), *before);
}

#[tokio::test]
async fn register_signs_in() {
    let (server, client, _) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/users/signup"))
        .and(body_json(json!({
            "name": "Olena",
            "email": "olena@example.com",
            "password": "hunter22"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "token": "tok-new", "user": user_json("light") })),
        )
        .mount(&server)
        .await;

    let session = client
        .register("Olena", "olena@example.com", &password())
        .await
        .into_result()
        .unwrap();
    assert!(session.is_authenticated);
    assert_eq!(client.api().auth_token(), Some(AuthToken::new("tok-new")));
}

#[tokio::test]
async fn logout_clears_token_on_success() {
    let (server, client, storage) = setup().await;
    sign_in(&server, &client).await;
    Mock::given(method("POST"))
        .and(path("/api/users/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(client.logout().await.is_fulfilled());
    assert_eq!(client.snapshot().auth.token, None);
    assert!(client.api().auth_token().is_none());

    let raw = storage.get_item("persist:auth").unwrap().unwrap();
    assert!(raw.contains("\"token\":null"));
}

#[tokio::test]
async fn logout_clears_token_even_when_server_fails() {
    let (server, client, _) = setup().await;
    sign_in(&server, &client).await;
    Mock::given(method("POST"))
        .and(path("/api/users/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Server error" })))
        .mount(&server)
        .await;

    let outcome = client.logout().await;
    assert!(outcome.is_rejected());

    let auth = client.snapshot().auth.clone();
    assert_eq!(auth.token, None);
    assert!(!auth.is_authenticated);
    assert_eq!(auth.error.as_deref(), Some("Server error"));
    assert!(client.api().auth_token().is_none());
}

// ── Startup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_current_user_without_token_makes_no_request() {
    let (server, client, _) = setup().await;

    let outcome = client.fetch_current_user().await;
    assert!(matches!(outcome, Outcome::Rejected(CoreError::MissingCredential)));
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(!client.snapshot().auth.is_refreshing);
}

#[tokio::test]
async fn start_restores_session_from_persisted_token() {
    let (server, client, storage) = setup().await;
    storage
        .set_item("persist:auth", r#"{"version":1,"state":{"token":"abc"}}"#)
        .unwrap();
    Mock::given(method("GET"))
        .and(path("/api/users/current"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("dark")))
        .expect(1)
        .mount(&server)
        .await;

    let user = client.start().await.into_result().unwrap();
    assert_eq!(user.theme, Theme::Dark);

    let auth = client.snapshot().auth.clone();
    assert!(auth.is_authenticated);
    assert_eq!(auth.token, Some(AuthToken::new("abc")));
}

#[tokio::test]
async fn start_with_rejected_token_keeps_it() {
    let (server, client, storage) = setup().await;
    storage
        .set_item("persist:auth", r#"{"version":1,"state":{"token":"abc"}}"#)
        .unwrap();
    Mock::given(method("GET"))
        .and(path("/api/users/current"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Not authorized" })))
        .mount(&server)
        .await;

    assert!(client.start().await.is_rejected());
    let auth = client.snapshot().auth.clone();
    assert!(!auth.is_authenticated);
    assert_eq!(auth.token, Some(AuthToken::new("abc")));
}

// ── Profile ─────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_theme_sends_opposite_theme() {
    let (server, client, _) = setup().await;
    sign_in(&server, &client).await;
    Mock::given(method("PATCH"))
        .and(path("/api/user/theme"))
        .and(body_json(json!({ "theme": "dark" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "theme": "dark" })))
        .expect(1)
        .mount(&server)
        .await;

    let theme = client.toggle_theme().await.into_result().unwrap();
    assert_eq!(theme, Theme::Dark);
    assert_eq!(
        client.snapshot().auth.user.as_ref().map(|u| u.theme),
        Some(Theme::Dark)
    );
}

#[tokio::test]
async fn update_user_info_replaces_profile() {
    let (server, client, _) = setup().await;
    sign_in(&server, &client).await;
    Mock::given(method("PATCH"))
        .and(path("/api/users/update"))
        .and(body_json(json!({ "name": "Olena K." })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1", "name": "Olena K.", "email": "olena@example.com", "theme": "light"
        })))
        .mount(&server)
        .await;

    assert!(client.update_user_info("Olena K.").await.is_fulfilled());
    assert_eq!(
        client.snapshot().auth.user.as_ref().map(|u| u.name.clone()),
        Some("Olena K.".into())
    );
}

// ── Recipes ─────────────────────────────────────────────────────────

#[tokio::test]
async fn add_recipe_merges_server_fields_and_reloads() {
    let (server, client, _) = setup().await;
    sign_in(&server, &client).await;

    Mock::given(method("POST"))
        .and(path("/api/recipes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "r-1", "owner": "u1", "createdAt": "2023-03-10T12:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("light")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ownRecipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([recipe_json("r-1", "Soup")])))
        .expect(1)
        .mount(&server)
        .await;

    let generation = client.store().generation();
    let recipe = client.add_recipe(&soup()).await.into_result().unwrap();

    assert_eq!(recipe.id, RecipeId::new("r-1"));
    assert_eq!(recipe.title, "Soup");
    assert_eq!(recipe.instructions, "Boil");
    assert_eq!(recipe.ingredients[0].name.as_deref(), Some("Salt"));

    assert_eq!(client.store().generation(), generation + 1);
    let snap = client.snapshot();
    assert!(snap.auth.is_authenticated);
    assert_eq!(snap.recipes.own_recipes.len(), 1);
    assert_eq!(snap.recipes.own_recipes[0].id, RecipeId::new("r-1"));
}

#[tokio::test]
async fn invalid_draft_is_rejected_without_request() {
    let (server, client, _) = setup().await;
    let mut actions = client.actions();

    let draft = RecipeDraft {
        ingredients: Vec::new(),
        ..soup()
    };
    let outcome = client.add_recipe(&draft).await;

    assert!(matches!(
        outcome,
        Outcome::Rejected(CoreError::ValidationFailed { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(actions.try_recv().is_err());
}

#[tokio::test]
async fn failed_add_does_not_reload() {
    let (server, client, _) = setup().await;
    sign_in(&server, &client).await;
    Mock::given(method("POST"))
        .and(path("/api/recipes"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "Bad category" })))
        .mount(&server)
        .await;

    let generation = client.store().generation();
    let outcome = client.add_recipe(&soup()).await;

    assert_eq!(outcome.rejection().map(CoreError::reason).as_deref(), Some("Bad category"));
    assert_eq!(client.store().generation(), generation);
    assert_eq!(client.snapshot().recipes.error.as_deref(), Some("Bad category"));
}

#[tokio::test]
async fn delete_recipe_reloads() {
    let (server, client, _) = setup().await;
    sign_in(&server, &client).await;
    Mock::given(method("DELETE"))
        .and(path("/api/recipes/r-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Recipe deleted" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("light")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ownRecipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let generation = client.store().generation();
    let id = client
        .delete_recipe(&RecipeId::new("r-1"))
        .await
        .into_result()
        .unwrap();

    assert_eq!(id, RecipeId::new("r-1"));
    assert_eq!(client.store().generation(), generation + 1);
    assert!(client.snapshot().recipes.own_recipes.is_empty());
}

#[tokio::test]
async fn popular_and_details_do_not_touch_each_other() {
    let (server, client, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            recipe_json("p1", "Borscht"),
            recipe_json("p2", "Varenyky")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/r-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recipe_json("r-9", "Kvass")))
        .mount(&server)
        .await;

    let recipes_before = client.snapshot().recipes.clone();
    assert!(client.get_popular_recipes().await.is_fulfilled());
    let snap = client.snapshot();
    assert_eq!(snap.main_page.popular_recipes.len(), 2);
    assert_eq!(snap.recipes, recipes_before);

    let main_before = snap.main_page.clone();
    assert!(client.get_recipe_by_id(&RecipeId::new("r-9")).await.is_fulfilled());
    let snap = client.snapshot();
    assert_eq!(snap.recipes.selected.as_ref().map(|r| r.title.as_str()), Some("Kvass"));
    assert_eq!(snap.main_page, main_before);

    let recipes_with_details = snap.recipes.clone();
    assert!(client.get_popular_recipes().await.is_fulfilled());
    assert_eq!(client.snapshot().recipes, recipes_with_details);
}

#[tokio::test]
async fn recipe_not_found_is_rejected() {
    let (server, client, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .mount(&server)
        .await;

    let err = client
        .get_recipe_by_id(&RecipeId::new("missing"))
        .await
        .into_result()
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(client.snapshot().recipes.error.as_deref(), Some("Not found"));
}

#[tokio::test]
async fn network_failure_is_rejected_with_reason() {
    let api = ApiClient::from_url("http://127.0.0.1:1/api").unwrap();
    let client = Client::with_parts(api, Arc::new(MemoryStorage::new()));

    let err = client.get_popular_recipes().await.into_result().unwrap_err();
    assert!(matches!(err, CoreError::NetworkFailure { .. }));
    let main = client.snapshot().main_page.clone();
    assert!(!main.is_loading);
    assert!(main.error.is_some());
}

// ── Catalog ─────────────────────────────────────────────────────────

#[tokio::test]
async fn catalog_lists_are_not_dispatched() {
    let (server, client, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/category-list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "_id": "c1", "name": "Soup" }])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ingredients/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": { "$oid": "i1" }, "ttl": "Salt", "thb": "https://cdn.example.com/salt.png" }
        ])))
        .mount(&server)
        .await;

    let mut actions = client.actions();
    let categories = client.list_categories().await.into_result().unwrap();
    let ingredients = client.list_ingredients().await.into_result().unwrap();

    assert_eq!(categories[0].name, "Soup");
    assert_eq!(ingredients[0].id, "i1");
    assert_eq!(ingredients[0].name, "Salt");
    assert!(actions.try_recv().is_err());
}

// ── Observers ───────────────────────────────────────────────────────

#[tokio::test]
async fn actions_arrive_in_pending_then_outcome_order() {
    let (server, client, _) = setup().await;
    let mut actions = client.actions();
    sign_in(&server, &client).await;

    let first = actions.recv().await.unwrap();
    let second = actions.recv().await.unwrap();
    assert_eq!(first.operation(), Operation::Login);
    assert_eq!(first.type_name(), "auth/login/pending");
    assert_eq!(second.type_name(), "auth/login/fulfilled");
}

//! Recipe command handlers.

use tabled::Tabled;

use yummy_core::{Client, Ingredient, Recipe, RecipeDraft, RecipeId};

use crate::cli::{GlobalOpts, RecipeAddArgs, RecipesArgs, RecipesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RecipeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Ingredients")]
    ingredients: usize,
    #[tabled(rename = "Favorites")]
    favorites: usize,
}

impl From<&Recipe> for RecipeRow {
    fn from(r: &Recipe) -> Self {
        Self {
            id: r.id.to_string(),
            title: r.title.clone(),
            category: r.category.clone(),
            time: r.time.clone(),
            ingredients: r.ingredients.len(),
            favorites: r.favorite_count,
        }
    }
}

fn detail(r: &Recipe) -> String {
    let mut lines = vec![
        format!("ID:          {}", r.id),
        format!("Title:       {}", r.title),
        format!("Category:    {}", r.category),
        format!("Time:        {}", r.time),
        format!("Favorites:   {}", r.favorite_count),
    ];
    if let Some(created) = r.created_at {
        lines.push(format!("Created:     {}", created.format("%Y-%m-%d %H:%M")));
    }
    if let Some(thumb) = &r.thumb {
        lines.push(format!("Image:       {thumb}"));
    }
    lines.push(String::new());
    lines.push(r.description.clone());

    lines.push(String::new());
    lines.push("Ingredients:".into());
    for ing in &r.ingredients {
        let name = ing.name.as_deref().unwrap_or(&ing.id);
        if ing.measure.is_empty() {
            lines.push(format!("  - {name}"));
        } else {
            lines.push(format!("  - {name} ({})", ing.measure));
        }
    }

    if !r.instructions.is_empty() {
        lines.push(String::new());
        lines.push(r.instructions.clone());
    }
    lines.join("\n")
}

fn print_list(recipes: &[Recipe], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        recipes,
        |r: &Recipe| RecipeRow::from(r),
        |r| r.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

// ── Draft assembly ──────────────────────────────────────────────────

/// Parse an `ID[:MEASURE]` ingredient flag.
fn parse_ingredient(raw: &str) -> Ingredient {
    let (id, measure) = raw.split_once(':').unwrap_or((raw, ""));
    Ingredient {
        id: id.trim().to_owned(),
        name: None,
        measure: measure.trim().to_owned(),
    }
}

fn build_draft(args: RecipeAddArgs) -> Result<RecipeDraft, CliError> {
    if let Some(path) = &args.from_file {
        return util::read_json_file(path);
    }
    Ok(RecipeDraft {
        title: args.title.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
        category: args.category,
        time: args.time,
        ingredients: args.ingredients.iter().map(|s| parse_ingredient(s)).collect(),
        instructions: args.instructions,
        thumb: args.thumb,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Client,
    args: RecipesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RecipesCommand::Add(add) => {
            util::require_session(client)?;
            let draft = build_draft(add)?;

            let recipe = client.add_recipe(&draft).await.into_result()?;
            output::success(global, &format!("Published '{}' ({})", recipe.title, recipe.id));
            let out = output::render_single(&global.output, &recipe, detail, |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RecipesCommand::Delete { id } => {
            util::require_session(client)?;
            if !util::confirm(&format!("Delete recipe {id}?"), global.yes, "recipes delete")? {
                return Ok(());
            }

            let recipe_id = RecipeId::new(id.as_str());
            client
                .delete_recipe(&recipe_id)
                .await
                .into_result()
                .map_err(|e| util::not_found_as(e, "recipe", &id, "recipes mine"))?;
            output::success(global, &format!("Deleted recipe {id}"));
            Ok(())
        }

        RecipesCommand::Mine => {
            util::require_session(client)?;
            let recipes = client.get_recipe_list().await.into_result()?;
            print_list(&recipes, global);
            Ok(())
        }

        RecipesCommand::Show { id } => {
            let recipe = client
                .get_recipe_by_id(&RecipeId::new(id.as_str()))
                .await
                .into_result()
                .map_err(|e| util::not_found_as(e, "recipe", &id, "recipes popular"))?;
            let out = output::render_single(&global.output, &recipe, detail, |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RecipesCommand::Popular => {
            let recipes = client.get_popular_recipes().await.into_result()?;
            print_list(&recipes, global);
            Ok(())
        }
    }
}

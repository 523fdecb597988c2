use tabled::Tabled;

use yummy_core::{Category, Client, IngredientInfo};

use crate::cli::{CatalogArgs, CatalogCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct IngredientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

fn matches_filter(info: &IngredientInfo, filter: Option<&str>) -> bool {
    filter.is_none_or(|f| info.name.to_lowercase().contains(&f.to_lowercase()))
}

pub async fn handle(
    client: &Client,
    args: CatalogArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CatalogCommand::Categories => {
            let categories = client.list_categories().await.into_result()?;
            let out = output::render_list(
                &global.output,
                &categories,
                |c: &Category| CategoryRow {
                    name: c.name.clone(),
                },
                |c| c.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CatalogCommand::Ingredients { filter } => {
            let ingredients: Vec<IngredientInfo> = client
                .list_ingredients()
                .await
                .into_result()?
                .into_iter()
                .filter(|i| matches_filter(i, filter.as_deref()))
                .collect();
            let out = output::render_list(
                &global.output,
                &ingredients,
                |i: &IngredientInfo| IngredientRow {
                    id: i.id.clone(),
                    name: i.name.clone(),
                },
                |i| i.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_case_insensitive_substring() {
        let info = IngredientInfo {
            id: "i1".into(),
            name: "Chicken Breast".into(),
            thumb: None,
        };
        assert!(matches_filter(&info, None));
        assert!(matches_filter(&info, Some("chick")));
        assert!(!matches_filter(&info, Some("beef")));
    }
}

use yummy_core::{Client, Theme};

use crate::cli::{GlobalOpts, ThemeArgs, ThemeChoice, ThemeCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(client: &Client, args: ThemeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    util::require_session(client)?;

    let theme = match args.command {
        ThemeCommand::Toggle => client.toggle_theme().await.into_result()?,
        ThemeCommand::Set { theme } => {
            let theme = match theme {
                ThemeChoice::Light => Theme::Light,
                ThemeChoice::Dark => Theme::Dark,
            };
            client.set_theme(theme).await.into_result()?
        }
    };

    output::success(global, &format!("Theme set to {theme}"));
    Ok(())
}

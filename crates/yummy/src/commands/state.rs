//! Persisted client state: inspect and purge.

use serde_json::Value;

use yummy_core::{Client, ClientConfig, RootState};

use crate::cli::{GlobalOpts, StateArgs, StateCommand};
use crate::error::CliError;
use crate::output;

use super::util;

const REDACTED: &str = "****";

/// The root state as JSON, with the session token masked.
fn redacted(state: &RootState) -> Result<Value, CliError> {
    let mut value = serde_json::to_value(state)?;
    if let Some(token) = value.pointer_mut("/auth/token").filter(|t| !t.is_null()) {
        *token = Value::String(REDACTED.into());
    }
    Ok(value)
}

fn summary(state: &RootState, config: &ClientConfig) -> String {
    let user = state
        .auth
        .user
        .as_ref()
        .map_or_else(|| "-".to_owned(), |u| format!("{} <{}>", u.name, u.email));
    [
        format!("Data dir:        {}", config.data_dir.display()),
        format!(
            "Session token:   {}",
            if state.auth.token.is_some() { "stored" } else { "none" }
        ),
        format!("User:            {user}"),
        format!("Own recipes:     {}", state.recipes.own_recipes.len()),
        format!("Popular recipes: {}", state.main_page.popular_recipes.len()),
    ]
    .join("\n")
}

pub fn handle(
    client: &Client,
    config: &ClientConfig,
    args: StateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StateCommand::Show => {
            client.store().rehydrate();
            let state = client.snapshot();
            let view = redacted(&state)?;
            let out = output::render_single(
                &global.output,
                &view,
                |_| summary(&state, config),
                |_| config.data_dir.display().to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StateCommand::Purge => {
            let prompt = format!(
                "Delete all persisted state in {}? This signs you out locally.",
                config.data_dir.display()
            );
            if !util::confirm(&prompt, global.yes, "state purge")? {
                return Ok(());
            }
            client.purge()?;
            output::success(global, "Persisted state cleared");
            Ok(())
        }
    }
}

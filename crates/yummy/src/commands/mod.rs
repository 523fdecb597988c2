//! Command dispatch: bridges CLI args -> core executors -> output formatting.

pub mod auth;
pub mod catalog;
pub mod config_cmd;
pub mod profile;
pub mod recipes;
pub mod state;
pub mod theme;
pub mod util;

use yummy_core::{Client, ClientConfig, CoreError, Outcome};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &Client,
    config: &ClientConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // State commands work on persisted data only; everything else starts
    // the client, restoring the session from the stored token.
    if let Command::State(args) = cmd {
        return state::handle(client, config, args, global);
    }
    start(client).await;

    match cmd {
        Command::Auth(args) => auth::handle(client, config, args, global).await,
        Command::Theme(args) => theme::handle(client, args, global).await,
        Command::Profile(args) => profile::handle(client, args, global).await,
        Command::Recipes(args) => recipes::handle(client, args, global).await,
        Command::Catalog(args) => catalog::handle(client, args, global).await,
        // Handled before dispatch
        Command::State(_) | Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

async fn start(client: &Client) {
    match client.start().await {
        Outcome::Fulfilled(user) => tracing::debug!(email = %user.email, "session restored"),
        Outcome::Rejected(CoreError::MissingCredential) => tracing::debug!("no stored session"),
        Outcome::Rejected(e) => tracing::warn!(error = %e, "could not restore session"),
    }
}

use yummy_core::Client;

use crate::cli::{GlobalOpts, ProfileArgs, ProfileCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &Client,
    args: ProfileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_session(client)?;

    match args.command {
        ProfileCommand::Update { name } => {
            if name.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "name".into(),
                    reason: "name cannot be empty".into(),
                });
            }
            let user = client.update_user_info(&name).await.into_result()?;
            output::success(global, &format!("Display name set to '{}'", user.name));
            Ok(())
        }
    }
}

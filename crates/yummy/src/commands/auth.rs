//! Auth command handlers.

use dialoguer::Input;
use secrecy::SecretString;

use yummy_core::{Client, ClientConfig, UserProfile};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Detail view ─────────────────────────────────────────────────────

fn detail(user: &UserProfile) -> String {
    [
        format!("ID:     {}", user.id),
        format!("Name:   {}", user.name),
        format!("Email:  {}", user.email),
        format!("Theme:  {}", user.theme),
        format!("Avatar: {}", user.avatar_url.as_deref().unwrap_or("-")),
    ]
    .join("\n")
}

fn print_user(user: &UserProfile, global: &GlobalOpts) {
    let out = output::render_single(&global.output, user, detail, |u| u.email.clone());
    output::print_output(&out, global.quiet);
}

// ── Credential resolution ───────────────────────────────────────────

/// Email from the flag, then the profile, then an interactive prompt.
fn resolve_email(flag: Option<String>, config: &ClientConfig) -> Result<String, CliError> {
    if let Some(email) = flag.or_else(|| config.credentials.as_ref().map(|c| c.email.clone())) {
        return Ok(email);
    }
    Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(util::prompt_err)
}

/// Password stored for `email`, then `YUMMY_PASSWORD`, then a prompt.
fn resolve_password(email: &str, config: &ClientConfig) -> Result<SecretString, CliError> {
    if let Some(creds) = config.credentials.as_ref().filter(|c| c.email == email) {
        return Ok(creds.password.clone());
    }
    if let Ok(pw) = std::env::var(yummy_config::PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }
    let pw = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
    if pw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(pw))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Client,
    config: &ClientConfig,
    args: AuthArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Register { name, email } => {
            let email = resolve_email(email, config)?;
            let password = resolve_password(&email, config)?;

            let session = client.register(&name, &email, &password).await.into_result()?;
            output::success(global, &format!("Registered and signed in as {email}"));
            if let Some(user) = &session.user {
                print_user(user, global);
            }
            Ok(())
        }

        AuthCommand::Login { email } => {
            let email = resolve_email(email, config)?;
            let password = resolve_password(&email, config)?;

            let session = client.login(&email, &password).await.into_result()?;
            output::success(global, &format!("Signed in as {email}"));
            if let Some(user) = &session.user {
                print_user(user, global);
            }
            Ok(())
        }

        AuthCommand::Logout => {
            if client.session().token.is_none() {
                output::success(global, "Already signed out");
                return Ok(());
            }
            // The local session is gone either way; a server failure is
            // only worth a warning.
            if let Some(err) = client.logout().await.rejection() {
                output::warning(global, &format!("Server sign-out failed: {err}"));
            }
            output::success(global, "Signed out");
            Ok(())
        }

        AuthCommand::Whoami => {
            let session = client.session();
            match session.user {
                Some(user) if session.is_authenticated => {
                    print_user(&user, global);
                    Ok(())
                }
                _ => Err(CliError::NotSignedIn),
            }
        }
    }
}

//! CLI configuration: thin wrapper around `yummy_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --data-dir).

use clap::ArgMatches;
use clap::ValueEnum;
use clap::parser::ValueSource;
use yummy_core::ClientConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use yummy_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config, store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill `--output` and `--color` from the config's `[defaults]` table
/// when neither the flag nor its env var was given.
pub fn apply_defaults(
    global: &mut GlobalOpts,
    matches: &ArgMatches,
    defaults: &Defaults,
) -> Result<(), CliError> {
    let from_default =
        |id: &str| matches!(matches.value_source(id), None | Some(ValueSource::DefaultValue));

    if from_default("output") {
        global.output = parse_default("defaults.output", &defaults.output)?;
    }
    if from_default("color") {
        global.color = parse_default("defaults.color", &defaults.color)?;
    }
    Ok(())
}

fn parse_default<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// The active profile with flag overrides applied.
///
/// A missing profile is only an error when `--profile` named it
/// explicitly; otherwise defaults plus flags are used.
pub fn active_profile(global: &GlobalOpts) -> Result<(String, Profile), CliError> {
    let cfg = load_config_or_default();
    let name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => Profile::default(),
    };

    if let Some(url) = &global.api_url {
        profile.api_url.clone_from(url);
    }
    if let Some(dir) = &global.data_dir {
        profile.data_dir = Some(dir.clone());
    }
    Ok((name, profile))
}

/// Build the core `ClientConfig` for the active profile.
pub fn build_client_config(global: &GlobalOpts) -> Result<(String, ClientConfig), CliError> {
    let (name, profile) = active_profile(global)?;
    let config = yummy_config::profile_to_client_config(&profile, &name)?;
    Ok((name, config))
}

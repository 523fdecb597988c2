//! Clap derive structures for the `yummy` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// yummy -- share and discover recipes from the command line
#[derive(Debug, Parser)]
#[command(
    name = "yummy",
    version,
    about = "Share and discover recipes from the command line",
    long_about = "A command-line client for the So Yummy recipe service.\n\n\
        Signs in once, keeps the session token in local state, and restores\n\
        it on every run.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "YUMMY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "YUMMY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory for persisted client state (overrides profile)
    #[arg(long, env = "YUMMY_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "YUMMY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign up, sign in, sign out
    Auth(AuthArgs),

    /// Switch between light and dark theme
    Theme(ThemeArgs),

    /// Update your user profile
    Profile(ProfileArgs),

    /// Create, browse, and delete recipes
    #[command(alias = "r")]
    Recipes(RecipesArgs),

    /// Reference data for building recipes
    Catalog(CatalogArgs),

    /// Inspect or clear persisted client state
    State(StateArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Account email (defaults to the profile's email)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign in and store the session token
    Login {
        /// Account email (defaults to the profile's email)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out and forget the session token
    Logout,

    /// Show the signed-in user
    Whoami,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  THEME / PROFILE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: ThemeCommand,
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Switch to the opposite theme
    Toggle,

    /// Set a specific theme
    Set {
        /// Theme to use
        theme: ThemeChoice,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Change your display name
    Update {
        /// New display name
        #[arg(long)]
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RECIPES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RecipesArgs {
    #[command(subcommand)]
    pub command: RecipesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecipesCommand {
    /// Publish a new recipe
    Add(RecipeAddArgs),

    /// Delete one of your recipes
    #[command(alias = "rm")]
    Delete {
        /// Recipe ID
        id: String,
    },

    /// List your own recipes
    #[command(alias = "ls")]
    Mine,

    /// Show a recipe's details
    Show {
        /// Recipe ID
        id: String,
    },

    /// List popular recipes
    Popular,
}

#[derive(Debug, Args)]
pub struct RecipeAddArgs {
    /// Read the recipe from a JSON file instead of flags
    #[arg(long, short = 'F', conflicts_with_all = ["title", "description"])]
    pub from_file: Option<PathBuf>,

    /// Recipe title
    #[arg(long, required_unless_present = "from_file")]
    pub title: Option<String>,

    /// Short description
    #[arg(long, required_unless_present = "from_file")]
    pub description: Option<String>,

    /// Category name
    #[arg(long, default_value = "")]
    pub category: String,

    /// Cooking time, e.g. "30 min"
    #[arg(long, default_value = "")]
    pub time: String,

    /// Ingredient as ID[:MEASURE]; repeat for each line
    #[arg(long = "ingredient", short = 'i')]
    pub ingredients: Vec<String>,

    /// Preparation steps
    #[arg(long, default_value = "")]
    pub instructions: String,

    /// Image URL
    #[arg(long)]
    pub thumb: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATALOG / STATE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List recipe categories
    Categories,

    /// List known ingredients
    Ingredients {
        /// Only show ingredients whose name contains this text
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct StateArgs {
    #[command(subcommand)]
    pub command: StateCommand,
}

#[derive(Debug, Subcommand)]
pub enum StateCommand {
    /// Print the persisted client state
    Show,

    /// Delete all persisted client state (signs you out locally)
    Purge,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Config key (api_url, email, password_env, data_dir, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

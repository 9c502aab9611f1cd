//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, builder::PossibleValuesParser};
use cleandroid_core::domain::{DependencyMethod, PermissionLevel, dependency_entries};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cleandroid",
    bin_name = "cleandroid",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Clean Architecture scaffolding for Android projects",
    long_about = "cleandroid creates domain/data/presentation layer folders with READMEs, \
                  adds <uses-permission> declarations to AndroidManifest.xml, and adds \
                  library dependencies to the app build script or version catalog. \
                  Every step is idempotent.",
    after_help = "EXAMPLES:\n\
        \x20 cleandroid setup ./MyApp --category basic --all\n\
        \x20 cleandroid scaffold --package com.example.app\n\
        \x20 cleandroid permissions --category beginner --dry-run\n\
        \x20 cleandroid deps --method catalog --lib retrofit,okhttp\n\
        \x20 cleandroid completions bash > /usr/share/bash-completion/completions/cleandroid",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the Clean Architecture layer folders and READMEs.
    #[command(
        visible_alias = "s",
        about = "Create layer folders and READMEs",
        after_help = "EXAMPLES:\n\
            \x20 cleandroid scaffold\n\
            \x20 cleandroid scaffold ../MyApp --package com.example.myapp --dry-run"
    )]
    Scaffold(ScaffoldArgs),

    /// Add permission declarations to the manifest.
    #[command(
        visible_alias = "p",
        about = "Add manifest permissions",
        after_help = "EXAMPLES:\n\
            \x20 cleandroid permissions --category basic\n\
            \x20 cleandroid permissions --category beginner,advanced --yes"
    )]
    Permissions(PermissionsArgs),

    /// Add library dependencies to the build script or version catalog.
    #[command(
        visible_alias = "d",
        about = "Add library dependencies",
        after_help = "EXAMPLES:\n\
            \x20 cleandroid deps --all\n\
            \x20 cleandroid deps --method gradle --lib glide --lib room-runtime,room-compiler"
    )]
    Deps(DepsArgs),

    /// Run scaffold, permissions and deps in one go.
    #[command(
        about = "Scaffold, add permissions and add dependencies",
        after_help = "EXAMPLES:\n\
            \x20 cleandroid setup --category basic --all --yes\n\
            \x20 cleandroid setup ./MyApp --skip-deps"
    )]
    Setup(SetupArgs),

    /// Show the built-in catalogs.
    #[command(
        visible_alias = "ls",
        about = "List layers, permission categories or libraries",
        after_help = "EXAMPLES:\n\
            \x20 cleandroid list permissions\n\
            \x20 cleandroid list dependencies --format json"
    )]
    List(ListArgs),

    /// Initialise a cleandroid configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cleandroid init           # user config directory\n\
            \x20 cleandroid init --local   # .cleandroid.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cleandroid completions bash > ~/.local/share/bash-completion/completions/cleandroid\n\
            \x20 cleandroid completions zsh  > ~/.zfunc/_cleandroid\n\
            \x20 cleandroid completions fish > ~/.config/fish/completions/cleandroid.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the cleandroid configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cleandroid config get defaults.dependency_method\n\
            \x20 cleandroid config set defaults.permission_categories basic,beginner\n\
            \x20 cleandroid config list"
    )]
    Config(ConfigCommands),
}

// ── shared argument groups ────────────────────────────────────────────────────

/// Project root and run mode, shared by every mutating command.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Android project root (the directory containing `app/`).
    #[arg(value_name = "PROJECT", default_value = ".")]
    pub project: PathBuf,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Apply changes without asking")]
    pub yes: bool,

    /// Report what would change without writing anything.
    #[arg(long = "dry-run", help = "Show planned changes without writing")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PackageArgs {
    /// Package to generate under; read from the build script when omitted.
    #[arg(
        short = 'p',
        long = "package",
        value_name = "PACKAGE",
        help = "Package name, e.g. com.example.app"
    )]
    pub package: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct PermissionSelection {
    /// Permission categories to apply. Repeatable or comma-separated.
    #[arg(
        long = "category",
        visible_alias = "categories",
        value_name = "CATEGORY",
        value_enum,
        value_delimiter = ','
    )]
    pub categories: Vec<CategoryArg>,
}

#[derive(Debug, Clone, Args)]
pub struct DependencySelection {
    /// Where to declare dependencies.
    #[arg(short = 'm', long = "method", value_name = "METHOD", value_enum)]
    pub method: Option<MethodArg>,

    /// Libraries to add. Repeatable or comma-separated.
    #[arg(
        short = 'l',
        long = "lib",
        value_name = "LIBRARY",
        value_delimiter = ',',
        value_parser = PossibleValuesParser::new(dependency_entries().iter().map(|e| e.library)),
    )]
    pub libraries: Vec<String>,

    /// Add every known library.
    #[arg(long = "all", conflicts_with = "libraries")]
    pub all: bool,
}

// ── scaffold / permissions / deps / setup ─────────────────────────────────────

#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub package: PackageArgs,
}

#[derive(Debug, Args)]
pub struct PermissionsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub selection: PermissionSelection,
}

#[derive(Debug, Args)]
pub struct DepsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub selection: DependencySelection,
}

#[derive(Debug, Args)]
pub struct SetupArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub package: PackageArgs,

    #[command(flatten)]
    pub permissions: PermissionSelection,

    #[command(flatten)]
    pub dependencies: DependencySelection,

    #[arg(long = "skip-scaffold", help = "Do not create layer folders")]
    pub skip_scaffold: bool,

    #[arg(long = "skip-permissions", help = "Do not touch the manifest")]
    pub skip_permissions: bool,

    #[arg(long = "skip-deps", help = "Do not add dependencies")]
    pub skip_deps: bool,
}

/// Permission category names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Basic,
    Beginner,
    Intermediate,
    Advanced,
}

impl From<CategoryArg> for PermissionLevel {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Basic => Self::Basic,
            CategoryArg::Beginner => Self::Beginner,
            CategoryArg::Intermediate => Self::Intermediate,
            CategoryArg::Advanced => Self::Advanced,
        }
    }
}

/// Dependency method names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Version catalog if `gradle/libs.versions.toml` exists, else the build script.
    Auto,
    /// Versioned coordinates in `app/build.gradle(.kts)`.
    #[value(alias = "direct")]
    Gradle,
    /// Entries in `gradle/libs.versions.toml`.
    #[value(alias = "toml")]
    Catalog,
}

impl MethodArg {
    /// `None` means auto-detect.
    pub fn to_method(self) -> Option<DependencyMethod> {
        match self {
            Self::Auto => None,
            Self::Gradle => Some(DependencyMethod::GradleDirect),
            Self::Catalog => Some(DependencyMethod::VersionCatalog),
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `cleandroid list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Which catalog to show.
    #[arg(value_enum, default_value = "layers")]
    pub what: ListTarget,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListTarget {
    Layers,
    #[value(alias = "perms")]
    Permissions,
    #[value(alias = "deps", alias = "libraries")]
    Dependencies,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cleandroid init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.cleandroid.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cleandroid completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cleandroid config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.dependency_method`.
        key: String,
    },
    /// Set a configuration key in the config file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value. Lists are comma-separated.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

//! Flags shared by every subcommand, flattened into [`super::Cli`].

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log what happens to each project file on stderr.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log file lookups and patch decisions (-v, -vv, -vvv)",
        long_help = "Log to stderr while patching:
    (none)  - Warnings, e.g. a catalog key kept with a different value
    -v      - Which manifest, build script or catalog was picked
    -vv     - Every line added or already present, every directory created
    -vvv    - Line-level detail from the patchers"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print nothing but errors and skip confirmation prompts"
    )]
    pub quiet: bool,

    /// Also honoured through `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Applied over the user and project-local configuration files.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Extra configuration file with default categories and libraries"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How reports are printed; json writes one document to stdout"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Error causes and the full patch report are shown from `-v` up.
    pub fn shows_details(&self) -> bool {
        self.verbose > 0
    }
}

/// How command reports are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Colored lines with markers.
    Human,
    /// The same lines without color.
    Plain,
    /// A single JSON document: the generation report, patch outcome or
    /// setup summary.
    Json,
}

impl OutputFormat {
    /// Names accepted in `output.format`.
    pub const NAMES: [&'static str; 4] = ["auto", "human", "plain", "json"];

    /// Parse an `output.format` value, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "human" => Some(Self::Human),
            "plain" => Some(Self::Plain),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

//! Tracing subscriber setup for the `cleandroid` binary.
//!
//! The core and adapters crates only emit events (file located, line added,
//! catalog key kept); this module decides which of them reach stderr.
//!
//! | Flag(s)   | Level |
//! |-----------|-------|
//! | (none)    | WARN  |
//! | `-v`      | INFO  |
//! | `-vv`     | DEBUG |
//! | `-vvv`    | TRACE |
//! | `--quiet` | ERROR |
//!
//! `CLEANDROID_LOG`, then `RUST_LOG`, replace the table when set.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::{GlobalArgs, OutputFormat};

/// Directive variable scoped to this tool; checked before `RUST_LOG`.
pub const LOG_ENV: &str = "CLEANDROID_LOG";

/// Crates whose events are shown; dependencies stay silent.
const WORKSPACE_TARGETS: [&str; 4] = [
    "cleandroid",
    "cleandroid_cli",
    "cleandroid_core",
    "cleandroid_adapters",
];

/// Install the global subscriber. Fails if one is already registered.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);
    let filter = build_filter(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        level,
    );

    // Colored log lines interleaved with a JSON document on a shared
    // terminal are unreadable.
    let use_ansi = !args.no_color
        && args.output_format != OutputFormat::Json
        && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(level >= LevelFilter::DEBUG)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(level >= LevelFilter::TRACE)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `CLEANDROID_LOG` or `RUST_LOG` when they hold valid directives,
/// otherwise every workspace crate at `level`.
fn build_filter(own: Option<String>, rust_log: Option<String>, level: LevelFilter) -> EnvFilter {
    let fallback = workspace_directives(level);
    let directives = chosen_directives(own, rust_log).unwrap_or_else(|| fallback.clone());
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn chosen_directives(own: Option<String>, rust_log: Option<String>) -> Option<String> {
    [own, rust_log]
        .into_iter()
        .flatten()
        .find(|directives| !directives.trim().is_empty())
}

fn workspace_directives(level: LevelFilter) -> String {
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

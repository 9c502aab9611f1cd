//! `cleandroid config`: read and write configuration values.

use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Keys whose values are comma-separated lists on the command line.
const LIST_KEYS: &[&str] = &["defaults.permission_categories", "defaults.libraries"];

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.print(&display_value(&value))?;
            }
        }

        ConfigCommands::Set { key, value } => {
            let path = target_path(global.config.as_deref());
            set_config_value(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.print(&target_path(global.config.as_deref()).display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// File `config set` edits: `--config`, else a local file if one exists,
/// else the user config file.
fn target_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        local
    } else {
        AppConfig::config_path()
    }
}

fn to_table(config: &AppConfig) -> CliResult<Table> {
    match Value::try_from(config) {
        Ok(Value::Table(table)) => Ok(table),
        Ok(_) => Err(CliError::ConfigError {
            message: "Configuration did not serialise to a table".into(),
            source: None,
        }),
        Err(e) => Err(CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        }),
    }
}

fn lookup<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut current = table.get(parts.next()?)?;
    for part in parts {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let table = to_table(config)?;
    match lookup(&table, key) {
        Some(value) if !value.is_table() => Ok(value.clone()),
        _ => Err(unknown_key(key)),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Turn command-line text into a value of the same kind as `template`.
fn parse_value(key: &str, raw: &str, template: &Value) -> CliResult<Value> {
    if LIST_KEYS.contains(&key) {
        let items = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_string()))
            .collect();
        return Ok(Value::Array(items));
    }
    match template {
        Value::Boolean(_) => raw
            .trim()
            .parse::<bool>()
            .map(Value::Boolean)
            .map_err(|_| CliError::invalid_input(format!("{key} expects true or false"))),
        _ => Ok(Value::String(raw.trim().to_string())),
    }
}

fn set_config_value(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let defaults = to_table(&AppConfig::default())?;
    let template = match lookup(&defaults, key) {
        Some(value) if !value.is_table() => value,
        _ => return Err(unknown_key(key)),
    };
    let value = parse_value(key, raw, template)?;

    let mut table = if path.is_file() {
        let text = std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read '{}'", path.display()))?;
        toml::from_str::<Table>(&text)
            .with_cli_context(|| format!("Failed to parse '{}'", path.display()))?
    } else {
        Table::new()
    };

    let (section, field) = key.split_once('.').ok_or_else(|| unknown_key(key))?;
    let entry = table
        .entry(section.to_string())
        .or_insert(Value::Table(Table::new()));
    let Some(section_table) = entry.as_table_mut() else {
        return Err(CliError::ConfigError {
            message: format!("'{section}' in '{}' is not a table", path.display()),
            source: None,
        });
    };
    section_table.insert(field.to_string(), value);

    let text = toml::to_string_pretty(&table).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    AppConfig::from_toml_str(&text).map_err(CliError::config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
    debug!(key, path = %path.display(), "configuration updated");
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

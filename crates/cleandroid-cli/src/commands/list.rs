//! Implementation of the `cleandroid list` command.

use serde::Serialize;

use cleandroid_core::domain::{
    Configuration, DependencyEntry, LayerSpec, PermissionCategory, dependency_entries, layers,
    manifest::permission_line, permission_categories,
};

use crate::{
    cli::{ListArgs, ListFormat, ListTarget},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    // `--output-format json` implies `--format json`.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match args.what {
        ListTarget::Layers => render(layers(), format, &output, layer_row, |l: &LayerSpec| {
            l.name.as_str().to_string()
        }),
        ListTarget::Permissions => render(
            permission_categories(),
            format,
            &output,
            permission_row,
            |c: &PermissionCategory| c.name.as_str().to_string(),
        ),
        ListTarget::Dependencies => render(
            dependency_entries(),
            format,
            &output,
            dependency_row,
            |d: &DependencyEntry| d.library.to_string(),
        ),
    }
}

fn render<T: Serialize>(
    items: &[T],
    format: ListFormat,
    output: &OutputManager,
    row: fn(&T) -> Vec<String>,
    name: fn(&T) -> String,
) -> CliResult<()> {
    match format {
        ListFormat::Json => output.json(items)?,
        ListFormat::List => {
            for item in items {
                output.print(&name(item))?;
            }
        }
        ListFormat::Table => {
            for item in items {
                let mut lines = row(item).into_iter();
                if let Some(first) = lines.next() {
                    output.header(&first)?;
                }
                for line in lines {
                    output.print(&format!("  {line}"))?;
                }
            }
        }
    }
    Ok(())
}

fn layer_row(layer: &LayerSpec) -> Vec<String> {
    let mut lines = vec![layer.name.as_str().to_string()];
    lines.extend(layer.subfolders.iter().map(|s| format!("{s}/")));
    lines
}

fn permission_row(category: &PermissionCategory) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({} permissions)",
        category.name.as_str(),
        category.permissions.len()
    )];
    lines.extend(category.permissions.iter().map(|p| permission_line(p)));
    lines
}

fn dependency_row(entry: &DependencyEntry) -> Vec<String> {
    let mut first = format!("{:<24} {}", entry.library, entry.coordinates());
    if entry.configuration != Configuration::Implementation {
        first.push_str(&format!("  [{}]", entry.configuration.as_str()));
    }
    match &entry.plugin {
        Some(plugin) => vec![first, format!("plugin {}", plugin.id)],
        None => vec![first],
    }
}

//! Pieces shared by the project-mutating commands: service construction,
//! selection resolution, confirmation and result reporting.

use std::io;

use tracing::debug;

use cleandroid_adapters::{LocalFilesystem, WalkdirLocator};
use cleandroid_core::{
    application::{GenerationReport, PatchOutcome, ProjectService},
    domain::{
        DependencyEntry, DependencyMethod, PermissionCategory, PermissionLevel, dependency_entries,
        find_dependency,
    },
};

use crate::{
    cli::{DependencySelection, PermissionSelection, ProjectArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub(crate) fn project_service() -> ProjectService {
    ProjectService::new(Box::new(LocalFilesystem::new()), Box::new(WalkdirLocator::new()))
}

pub(crate) fn filesystem() -> Box<LocalFilesystem> {
    Box::new(LocalFilesystem::new())
}

// ── selection ─────────────────────────────────────────────────────────────────

/// Command line, then configured defaults, then an interactive prompt.
pub(crate) fn permission_categories(
    selection: &PermissionSelection,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<Vec<&'static PermissionCategory>> {
    let mut levels: Vec<PermissionLevel> = selection
        .categories
        .iter()
        .map(|&arg| PermissionLevel::from(arg))
        .collect();

    if levels.is_empty() {
        levels = config.permission_levels();
        if !levels.is_empty() {
            debug!(?levels, "permission categories from configuration");
        }
    }
    if levels.is_empty() {
        let names: Vec<&str> = PermissionLevel::ALL.iter().map(|l| l.as_str()).collect();
        levels = prompt_multi_select("Permission categories", &names, output)?
            .into_iter()
            .map(|i| PermissionLevel::ALL[i])
            .collect();
    }
    if levels.is_empty() {
        return Err(CliError::NoSelection {
            what: "permission categories",
            flag: "--category",
        });
    }

    let mut unique: Vec<PermissionLevel> = Vec::with_capacity(levels.len());
    for level in levels {
        if !unique.contains(&level) {
            unique.push(level);
        }
    }
    Ok(unique.into_iter().map(PermissionLevel::category).collect())
}

/// `--all`, then `--lib`, then configured defaults, then a prompt.
pub(crate) fn dependency_entries_for(
    selection: &DependencySelection,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<Vec<&'static DependencyEntry>> {
    if selection.all {
        return Ok(dependency_entries().iter().collect());
    }

    let mut names: Vec<String> = selection.libraries.clone();
    if names.is_empty() {
        names = config.defaults.libraries.clone();
        if !names.is_empty() {
            debug!(?names, "libraries from configuration");
        }
    }

    let mut entries = Vec::new();
    if names.is_empty() {
        let all: Vec<&str> = dependency_entries().iter().map(|e| e.library).collect();
        for i in prompt_multi_select("Libraries", &all, output)? {
            entries.push(&dependency_entries()[i]);
        }
    } else {
        for name in &names {
            let entry = find_dependency(name).map_err(|e| CliError::InvalidInput {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;
            if !entries.iter().any(|known: &&DependencyEntry| known.library == entry.library) {
                entries.push(entry);
            }
        }
    }

    if entries.is_empty() {
        return Err(CliError::NoSelection {
            what: "libraries",
            flag: "--lib or --all",
        });
    }
    Ok(entries)
}

/// `None` means auto-detect.
pub(crate) fn dependency_method(
    selection: &DependencySelection,
    config: &AppConfig,
) -> CliResult<Option<DependencyMethod>> {
    match selection.method {
        Some(arg) => Ok(arg.to_method()),
        None => config.dependency_method().map_err(CliError::config),
    }
}

#[cfg(feature = "interactive")]
fn prompt_multi_select(
    prompt: &str,
    items: &[&str],
    output: &OutputManager,
) -> CliResult<Vec<usize>> {
    use std::io::IsTerminal as _;

    if output.is_quiet() || !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return Ok(Vec::new());
    }
    let chosen = dialoguer::MultiSelect::new()
        .with_prompt(format!("{prompt} (space to toggle, enter to confirm)"))
        .items(items)
        .interact_opt()
        .map_err(|e| CliError::IoError {
            message: "Failed to read selection".into(),
            source: io::Error::other(e),
        })?;
    // Esc aborts the whole command rather than applying nothing.
    chosen.ok_or(CliError::Cancelled)
}

#[cfg(not(feature = "interactive"))]
fn prompt_multi_select(
    _prompt: &str,
    _items: &[&str],
    _output: &OutputManager,
) -> CliResult<Vec<usize>> {
    Ok(Vec::new())
}

// ── confirmation ──────────────────────────────────────────────────────────────

/// Ask before touching the project, unless `--yes`, `--dry-run` or `--quiet`.
pub(crate) fn confirm(args: &ProjectArgs, output: &OutputManager) -> CliResult<()> {
    if args.yes || args.dry_run || output.is_quiet() {
        return Ok(());
    }

    output.prompt("Continue? [Y/n]").map_err(|e| CliError::IoError {
        message: "failed to write confirmation prompt".into(),
        source: e,
    })?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    // End of input (a closed or empty pipe) is not consent.
    if read == 0 {
        return Err(CliError::Cancelled);
    }
    match input.trim().to_lowercase().as_str() {
        "" | "y" | "yes" => Ok(()),
        _ => Err(CliError::Cancelled),
    }
}

// ── reporting ─────────────────────────────────────────────────────────────────

pub(crate) fn report_generation(
    report: &GenerationReport,
    dry_run: bool,
    output: &OutputManager,
) -> CliResult<()> {
    let verb = if dry_run { "Would create" } else { "Created" };
    for dir in &report.created_dirs {
        output.item("+", &format!("{}/", dir.display()))?;
    }
    for readme in &report.written_readmes {
        output.item("+", &readme.display().to_string())?;
    }
    for readme in &report.preserved_readmes {
        output.item("=", &format!("{} (kept)", readme.display()))?;
    }

    if report.is_noop() {
        output.success("Layer folders already in place")?;
    } else {
        output.success(&format!(
            "{verb} {} folder(s) and {} README(s)",
            report.created_dirs.len(),
            report.written_readmes.len()
        ))?;
    }
    Ok(())
}

pub(crate) fn report_patch(
    outcome: &PatchOutcome,
    what: &str,
    dry_run: bool,
    output: &OutputManager,
) -> CliResult<()> {
    for line in &outcome.report.added {
        output.item("+", line)?;
    }
    if !outcome.report.already_present.is_empty() {
        output.item(
            "=",
            &format!("{} already present", outcome.report.already_present.len()),
        )?;
    }

    let path = outcome.path.display();
    let added = outcome.report.added.len();
    if outcome.report.is_noop() {
        output.success(&format!("{path}: all {what} already present"))?;
    } else if dry_run {
        output.info(&format!("{path}: would add {added} {what} (dry run)"))?;
    } else {
        output.success(&format!("{path}: added {added} {what}"))?;
    }
    Ok(())
}

pub(crate) fn method_label(method: DependencyMethod) -> &'static str {
    match method {
        DependencyMethod::GradleDirect => "build script",
        DependencyMethod::VersionCatalog => "version catalog",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CategoryArg, GlobalArgs, MethodArg, OutputFormat};

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn deps(libraries: &[&str], all: bool, method: Option<MethodArg>) -> DependencySelection {
        DependencySelection {
            method,
            libraries: libraries.iter().map(|s| s.to_string()).collect(),
            all,
        }
    }

    #[test]
    fn flags_win_over_configured_categories() {
        let mut config = AppConfig::default();
        config.defaults.permission_categories = vec!["advanced".into()];
        let selection = PermissionSelection {
            categories: vec![CategoryArg::Basic],
        };

        let cats = permission_categories(&selection, &config, &quiet_output()).unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].name, PermissionLevel::Basic);
    }

    #[test]
    fn configured_categories_fill_in() {
        let mut config = AppConfig::default();
        config.defaults.permission_categories = vec!["beginner".into()];
        let selection = PermissionSelection { categories: vec![] };

        let cats = permission_categories(&selection, &config, &quiet_output()).unwrap();
        assert_eq!(cats[0].name, PermissionLevel::Beginner);
    }

    #[test]
    fn nothing_selected_is_an_error() {
        let selection = PermissionSelection { categories: vec![] };
        let err =
            permission_categories(&selection, &AppConfig::default(), &quiet_output()).unwrap_err();
        assert!(matches!(err, CliError::NoSelection { .. }));
    }

    #[test]
    fn all_selects_every_library() {
        let entries =
            dependency_entries_for(&deps(&[], true, None), &AppConfig::default(), &quiet_output())
                .unwrap();
        assert_eq!(entries.len(), dependency_entries().len());
    }

    #[test]
    fn repeated_libraries_are_added_once() {
        let entries = dependency_entries_for(
            &deps(&["glide", "glide", "okhttp"], false, None),
            &AppConfig::default(),
            &quiet_output(),
        )
        .unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.library).collect();
        assert_eq!(names, vec!["glide", "okhttp"]);
    }

    #[test]
    fn no_libraries_is_an_error() {
        let err = dependency_entries_for(
            &deps(&[], false, None),
            &AppConfig::default(),
            &quiet_output(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn method_flag_beats_configuration() {
        let mut config = AppConfig::default();
        config.defaults.dependency_method = "catalog".into();

        assert_eq!(
            dependency_method(&deps(&[], true, Some(MethodArg::Gradle)), &config).unwrap(),
            Some(DependencyMethod::GradleDirect)
        );
        assert_eq!(
            dependency_method(&deps(&[], true, Some(MethodArg::Auto)), &config).unwrap(),
            None
        );
        assert_eq!(
            dependency_method(&deps(&[], true, None), &config).unwrap(),
            Some(DependencyMethod::VersionCatalog)
        );
    }
}

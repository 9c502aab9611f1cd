//! `cleandroid deps`: add library declarations to the build script or the
//! version catalog.

use std::path::Path;

use tracing::{info, instrument};

use cleandroid_core::{
    application::{DependencyService, PatchOutcome},
    domain::{DependencyEntry, DependencyMethod},
};

use crate::{
    cli::DepsArgs,
    commands::support,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.project.project.display()))]
pub fn execute(args: DepsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.project.project.as_path();
    let project = support::project_service();
    project.ensure_project(root)?;

    let entries = support::dependency_entries_for(&args.selection, &config, &output)?;
    let requested = support::dependency_method(&args.selection, &config)?;
    let (method, target) = project.resolve_method(root, requested)?;
    info!(%method, target = %target.display(), "dependency target resolved");

    output.header(&format!(
        "Dependencies via {} ({})",
        support::method_label(method),
        target.display()
    ))?;
    output.info(&format!("{} librar(ies): {}", entries.len(), names(&entries)))?;
    support::confirm(&args.project, &output)?;

    let outcome = run(&target, &entries, method, args.project.dry_run)?;
    if output.is_json() {
        output.json(&outcome)?;
    } else {
        support::report_patch(&outcome, "line(s)", args.project.dry_run, &output)?;
    }
    Ok(())
}

pub(crate) fn names(entries: &[&DependencyEntry]) -> String {
    entries
        .iter()
        .map(|e| e.library)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn run(
    target: &Path,
    entries: &[&DependencyEntry],
    method: DependencyMethod,
    dry_run: bool,
) -> CliResult<PatchOutcome> {
    let outcome = DependencyService::new(support::filesystem())
        .add_dependencies(target, entries, method, dry_run)?;
    Ok(outcome)
}

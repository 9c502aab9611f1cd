//! `cleandroid setup`: scaffold, permissions and dependencies in one run.
//!
//! Every selection is resolved and every file located before anything is
//! written, so a missing manifest or an empty selection fails the whole run
//! up front. After that the steps run in order and stop at the first error;
//! what earlier steps wrote stays, and a re-run picks up from there.

use serde::Serialize;
use tracing::{info, instrument};

use cleandroid_core::{
    application::{GenerationReport, PatchOutcome},
    domain::{DependencyMethod, ProjectFile},
};

use crate::{
    cli::SetupArgs,
    commands::{deps, permissions, scaffold, support},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// JSON shape of a setup run. Skipped steps are `null`.
#[derive(Debug, Serialize)]
struct SetupSummary {
    dry_run: bool,
    scaffold: Option<GenerationReport>,
    permissions: Option<PatchOutcome>,
    dependency_method: Option<DependencyMethod>,
    dependencies: Option<PatchOutcome>,
}

#[instrument(skip_all, fields(project = %args.project.project.display(), dry_run = args.project.dry_run))]
pub fn execute(args: SetupArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.project.project.as_path();
    let dry_run = args.project.dry_run;
    let project = support::project_service();
    project.ensure_project(root)?;

    output.header(&format!("Setting up {}", root.display()))?;

    // ── plan ──────────────────────────────────────────────────────────────
    let package = if args.skip_scaffold {
        None
    } else {
        let package = scaffold::resolve_package(root, &args.package)?;
        output.info(&format!("Layers under package {package}"))?;
        Some(package)
    };

    let manifest_plan = if args.skip_permissions {
        None
    } else {
        let categories = support::permission_categories(&args.permissions, &config, &output)?;
        let manifest = project.locate(root, ProjectFile::Manifest)?;
        output.info(&format!(
            "{} in {}",
            permissions::describe(&categories),
            manifest.display()
        ))?;
        Some((manifest, categories))
    };

    let deps_plan = if args.skip_deps {
        None
    } else {
        let entries = support::dependency_entries_for(&args.dependencies, &config, &output)?;
        let requested = support::dependency_method(&args.dependencies, &config)?;
        let (method, target) = project.resolve_method(root, requested)?;
        output.info(&format!(
            "{} librar(ies) via {} in {}",
            entries.len(),
            support::method_label(method),
            target.display()
        ))?;
        Some((method, target, entries))
    };

    support::confirm(&args.project, &output)?;

    // ── apply ─────────────────────────────────────────────────────────────
    let mut summary = SetupSummary {
        dry_run,
        scaffold: None,
        permissions: None,
        dependency_method: None,
        dependencies: None,
    };

    if let Some(package) = &package {
        let report = scaffold::run(root, package, dry_run)?;
        if !output.is_json() {
            support::report_generation(&report, dry_run, &output)?;
        }
        summary.scaffold = Some(report);
    }

    if let Some((manifest, categories)) = &manifest_plan {
        let outcome = permissions::run(manifest, categories, dry_run)?;
        if !output.is_json() {
            support::report_patch(&outcome, "permission(s)", dry_run, &output)?;
        }
        summary.permissions = Some(outcome);
    }

    if let Some((method, target, entries)) = &deps_plan {
        let outcome = deps::run(target, entries, *method, dry_run)?;
        if !output.is_json() {
            support::report_patch(&outcome, "line(s)", dry_run, &output)?;
        }
        summary.dependency_method = Some(*method);
        summary.dependencies = Some(outcome);
    }

    info!(
        scaffolded = summary.scaffold.is_some(),
        permissions = summary.permissions.is_some(),
        dependencies = summary.dependencies.is_some(),
        "setup finished"
    );

    if output.is_json() {
        output.json(&summary)?;
    } else if dry_run {
        output.info("Dry run: no files were changed")?;
    }
    Ok(())
}

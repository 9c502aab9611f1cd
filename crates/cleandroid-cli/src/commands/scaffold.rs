//! `cleandroid scaffold`: create the layer folders and READMEs.

use std::path::Path;

use tracing::{debug, instrument};

use cleandroid_core::{
    application::{GenerationReport, ScaffoldService},
    domain::{PackageName, ProjectFile, layers},
};

use crate::{
    cli::{PackageArgs, ScaffoldArgs},
    commands::support,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.project.project.display()))]
pub fn execute(args: ScaffoldArgs, output: OutputManager) -> CliResult<()> {
    let root = args.project.project.as_path();
    support::project_service().ensure_project(root)?;

    output.header(&format!("Scaffolding {}", root.display()))?;
    let package = resolve_package(root, &args.package)?;
    output.info(&format!("Package {package}"))?;
    support::confirm(&args.project, &output)?;

    let report = run(root, &package, args.project.dry_run)?;
    if output.is_json() {
        output.json(&report)?;
    } else {
        support::report_generation(&report, args.project.dry_run, &output)?;
    }
    Ok(())
}

/// `--package` when given, otherwise the one declared by the build script.
pub(crate) fn resolve_package(root: &Path, args: &PackageArgs) -> CliResult<PackageName> {
    match &args.package {
        Some(name) => PackageName::parse(name).map_err(|e| CliError::InvalidInput {
            message: e.to_string(),
            source: Some(Box::new(e)),
        }),
        None => {
            let package = support::project_service().detect_package(root)?;
            debug!(%package, "package from build script");
            Ok(package)
        }
    }
}

pub(crate) fn run(root: &Path, package: &PackageName, dry_run: bool) -> CliResult<GenerationReport> {
    let report = ScaffoldService::new(support::filesystem()).generate(
        &ProjectFile::source_root(root),
        package,
        layers(),
        dry_run,
    )?;
    Ok(report)
}

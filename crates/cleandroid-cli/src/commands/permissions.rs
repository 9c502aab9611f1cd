//! `cleandroid permissions`: add `<uses-permission>` lines to the manifest.

use std::path::Path;

use tracing::instrument;

use cleandroid_core::{
    application::{ManifestService, PatchOutcome},
    domain::{PermissionCategory, ProjectFile, manifest::union_permissions},
};

use crate::{
    cli::PermissionsArgs,
    commands::support,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.project.project.display()))]
pub fn execute(args: PermissionsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.project.project.as_path();
    let project = support::project_service();
    project.ensure_project(root)?;

    let categories = support::permission_categories(&args.selection, &config, &output)?;
    let manifest = project.locate(root, ProjectFile::Manifest)?;

    output.header(&format!("Permissions for {}", manifest.display()))?;
    output.info(&describe(&categories))?;
    support::confirm(&args.project, &output)?;

    let outcome = run(&manifest, &categories, args.project.dry_run)?;
    if output.is_json() {
        output.json(&outcome)?;
    } else {
        support::report_patch(&outcome, "permission(s)", args.project.dry_run, &output)?;
    }
    Ok(())
}

pub(crate) fn describe(categories: &[&PermissionCategory]) -> String {
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    format!(
        "{} permission(s) from {}",
        union_permissions(categories).len(),
        names.join(", ")
    )
}

pub(crate) fn run(
    manifest: &Path,
    categories: &[&PermissionCategory],
    dry_run: bool,
) -> CliResult<PatchOutcome> {
    let outcome =
        ManifestService::new(support::filesystem()).add_permissions(manifest, categories, dry_run)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleandroid_core::domain::PermissionLevel;

    #[test]
    fn description_counts_the_union() {
        let text = describe(&[
            PermissionLevel::Basic.category(),
            PermissionLevel::Beginner.category(),
        ]);
        assert_eq!(text, "7 permission(s) from basic, beginner");
    }
}
